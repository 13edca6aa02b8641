//! Computational region persistence.
//!
//! The region fixes the spatial extent and resolution raster operations
//! run under. It is stored per mapset as a TOML file.

use crate::{GisError, Session};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

pub const REGION_FILE: &str = "region.toml";

/// Spatial extent and resolution of the current mapset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub ns_res: f64,
    pub ew_res: f64,
}

impl Region {
    #[must_use]
    pub fn new(north: f64, south: f64, east: f64, west: f64, res: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
            ns_res: res,
            ew_res: res,
        }
    }

    /// Grid rows covered by the extent at the current resolution.
    #[must_use]
    pub fn rows(&self) -> usize {
        ((self.north - self.south) / self.ns_res).round() as usize
    }

    /// Grid columns covered by the extent at the current resolution.
    #[must_use]
    pub fn cols(&self) -> usize {
        ((self.east - self.west) / self.ew_res).round() as usize
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new(1.0, 0.0, 1.0, 0.0, 1.0)
    }
}

/// Read the mapset region.
///
/// # Errors
///
/// Returns `GisError::MalformedRegion` for unparsable or degenerate
/// region files, `GisError::Io` when the file cannot be read.
pub fn read_region(session: &Session) -> Result<Region, GisError> {
    let path = session.mapset_path().join(REGION_FILE);
    let text = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            GisError::MalformedRegion {
                path: path.clone(),
                message: "region file is missing".to_string(),
            }
        } else {
            GisError::Io {
                path: path.clone(),
                source: e,
            }
        }
    })?;

    let region: Region = toml::from_str(&text).map_err(|e| GisError::MalformedRegion {
        path: path.clone(),
        message: e.to_string(),
    })?;

    if region.north <= region.south || region.east <= region.west {
        return Err(GisError::MalformedRegion {
            path,
            message: "region extent is empty".to_string(),
        });
    }
    if region.ns_res <= 0.0 || region.ew_res <= 0.0 {
        return Err(GisError::MalformedRegion {
            path,
            message: "region resolution must be positive".to_string(),
        });
    }
    Ok(region)
}

/// Write the mapset region.
///
/// # Errors
///
/// Returns `GisError::Io` when the file cannot be written.
pub fn write_region(session: &Session, region: &Region) -> Result<(), GisError> {
    let path = session.mapset_path().join(REGION_FILE);
    let text = toml::to_string(region).map_err(|e| GisError::MalformedRegion {
        path: path.clone(),
        message: e.to_string(),
    })?;
    fs::write(&path, text).map_err(|e| GisError::Io { path, source: e })
}

/// Guard that installs a region and restores the previous one on drop.
///
/// Test suites use this to run fixtures under a small region without
/// leaking it into the mapset.
#[derive(Debug)]
pub struct TempRegion<'a> {
    session: &'a Session,
    saved: Region,
}

impl<'a> TempRegion<'a> {
    /// Save the current region and install `region` in its place.
    ///
    /// # Errors
    ///
    /// Returns `GisError` when either region file access fails.
    pub fn install(session: &'a Session, region: &Region) -> Result<Self, GisError> {
        let saved = read_region(session)?;
        write_region(session, region)?;
        Ok(Self { session, saved })
    }

    /// The region that will be restored on drop.
    #[must_use]
    pub fn saved(&self) -> &Region {
        &self.saved
    }
}

impl Drop for TempRegion<'_> {
    fn drop(&mut self) {
        // Restoration failure cannot be propagated from drop.
        let _ = write_region(self.session, &self.saved);
    }
}
