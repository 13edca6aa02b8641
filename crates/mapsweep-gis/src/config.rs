//! Session resolution from the process environment.
//!
//! `MAPSWEEP_GISDBASE`, `MAPSWEEP_LOCATION` and `MAPSWEEP_MAPSET` select
//! the store. Variables left unset fall back to the optional TOML config
//! file named by `MAPSWEEP_CONFIG`.

use crate::{GisError, Session};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_GISDBASE: &str = "MAPSWEEP_GISDBASE";
pub const ENV_LOCATION: &str = "MAPSWEEP_LOCATION";
pub const ENV_MAPSET: &str = "MAPSWEEP_MAPSET";
pub const ENV_CONFIG: &str = "MAPSWEEP_CONFIG";

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    pub gisdbase: Option<PathBuf>,
    pub location: Option<String>,
    pub mapset: Option<String>,
}

impl Config {
    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns `GisError::Io` when the file cannot be read and
    /// `GisError::MalformedConfig` when it does not parse.
    pub fn load(path: &Path) -> Result<Self, GisError> {
        let text = fs::read_to_string(path).map_err(|e| GisError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&text).map_err(|e| GisError::MalformedConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Resolve the session from the environment.
///
/// # Errors
///
/// Returns `GisError::MissingEnvironment` naming the first part that is
/// resolvable from neither the environment nor the config file.
pub fn session_from_env() -> Result<Session, GisError> {
    let config = match env::var_os(ENV_CONFIG) {
        Some(path) => Config::load(Path::new(&path))?,
        None => Config::default(),
    };
    resolve(
        config,
        env::var_os(ENV_GISDBASE).map(PathBuf::from),
        env::var(ENV_LOCATION).ok(),
        env::var(ENV_MAPSET).ok(),
    )
}

fn resolve(
    config: Config,
    gisdbase: Option<PathBuf>,
    location: Option<String>,
    mapset: Option<String>,
) -> Result<Session, GisError> {
    let gisdbase = gisdbase
        .or(config.gisdbase)
        .ok_or(GisError::MissingEnvironment(ENV_GISDBASE))?;
    let location = location
        .or(config.location)
        .ok_or(GisError::MissingEnvironment(ENV_LOCATION))?;
    let mapset = mapset
        .or(config.mapset)
        .ok_or(GisError::MissingEnvironment(ENV_MAPSET))?;
    Ok(Session::new(gisdbase, location, mapset))
}
