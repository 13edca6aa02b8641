//! File-backed GIS data store.
//!
//! A GIS database is a directory tree `<gisdbase>/<location>/<mapset>`.
//! Each map type owns a primary element directory used for listing plus
//! auxiliary element directories whose files are removed together with
//! the map.

pub mod config;
pub mod raster;
pub mod region;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Store errors
#[derive(thiserror::Error, Debug)]
pub enum GisError {
    #[error("Mapset <{}> not found", .0.display())]
    MapsetNotFound(PathBuf),

    #[error("<{name}> not found in the current mapset")]
    MapNotFound { name: String },

    #[error("Unknown map type <{0}>")]
    UnknownMapType(String),

    #[error("Malformed region file <{}>: {message}", .path.display())]
    MalformedRegion { path: PathBuf, message: String },

    #[error("Malformed raster header <{}>: {message}", .path.display())]
    MalformedHeader { path: PathBuf, message: String },

    #[error("Malformed config file <{}>: {message}", .path.display())]
    MalformedConfig { path: PathBuf, message: String },

    #[error("GIS environment is incomplete: {0} is not set")]
    MissingEnvironment(&'static str),

    #[error("Failed to access <{}>: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl GisError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Map layer types and their element directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapType {
    Raster,
    Raster3d,
    Vector,
    Region,
    Group,
}

impl MapType {
    pub const ALL: [Self; 5] = [
        Self::Raster,
        Self::Raster3d,
        Self::Vector,
        Self::Region,
        Self::Group,
    ];

    /// Resolve the CLI alias of a map type.
    ///
    /// # Errors
    ///
    /// Returns `GisError::UnknownMapType` for unrecognized aliases.
    pub fn from_alias(alias: &str) -> Result<Self, GisError> {
        match alias {
            "rast" => Ok(Self::Raster),
            "rast3d" => Ok(Self::Raster3d),
            "vect" => Ok(Self::Vector),
            "region" => Ok(Self::Region),
            "group" => Ok(Self::Group),
            other => Err(GisError::UnknownMapType(other.to_string())),
        }
    }

    /// Alias used on the command line and in listing output.
    #[must_use]
    pub const fn alias(self) -> &'static str {
        match self {
            Self::Raster => "rast",
            Self::Raster3d => "rast3d",
            Self::Vector => "vect",
            Self::Region => "region",
            Self::Group => "group",
        }
    }

    /// Human noun used in removal messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Raster => "raster",
            Self::Raster3d => "3D raster",
            Self::Vector => "vector",
            Self::Region => "region",
            Self::Group => "group",
        }
    }

    /// Element directory that defines which maps of this type exist.
    #[must_use]
    pub const fn primary_element(self) -> &'static str {
        match self {
            Self::Raster => "cell",
            Self::Raster3d => "grid3",
            Self::Vector => "vector",
            Self::Region => "windows",
            Self::Group => "group",
        }
    }

    /// Element directories whose files are removed with the map.
    #[must_use]
    pub const fn auxiliary_elements(self) -> &'static [&'static str] {
        match self {
            Self::Raster => &["cellhd", "cats", "colr", "cell_misc"],
            Self::Raster3d | Self::Vector | Self::Region | Self::Group => &[],
        }
    }
}

/// A resolved gisdbase/location/mapset triple.
///
/// All store operations are scoped to the session's mapset; maps in
/// other mapsets are never touched.
#[derive(Debug, Clone)]
pub struct Session {
    gisdbase: PathBuf,
    location: String,
    mapset: String,
}

impl Session {
    pub fn new(
        gisdbase: impl Into<PathBuf>,
        location: impl Into<String>,
        mapset: impl Into<String>,
    ) -> Self {
        Self {
            gisdbase: gisdbase.into(),
            location: location.into(),
            mapset: mapset.into(),
        }
    }

    #[must_use]
    pub fn gisdbase(&self) -> &Path {
        &self.gisdbase
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn mapset(&self) -> &str {
        &self.mapset
    }

    #[must_use]
    pub fn mapset_path(&self) -> PathBuf {
        self.gisdbase.join(&self.location).join(&self.mapset)
    }

    #[must_use]
    pub fn element_path(&self, element: &str) -> PathBuf {
        self.mapset_path().join(element)
    }

    #[must_use]
    pub fn map_path(&self, element: &str, name: &str) -> PathBuf {
        self.element_path(element).join(name)
    }

    /// Initialize the mapset tree with a default region.
    ///
    /// # Errors
    ///
    /// Returns `GisError::Io` when the directories cannot be created.
    pub fn create(&self) -> Result<(), GisError> {
        let path = self.mapset_path();
        fs::create_dir_all(&path).map_err(|e| GisError::io(&path, e))?;
        region::write_region(self, &region::Region::default())
    }

    /// Verify the session points at an existing mapset.
    ///
    /// # Errors
    ///
    /// Returns `GisError::MapsetNotFound` when the mapset directory is
    /// missing.
    pub fn open(&self) -> Result<(), GisError> {
        let path = self.mapset_path();
        if path.is_dir() {
            Ok(())
        } else {
            Err(GisError::MapsetNotFound(path))
        }
    }

    /// Names of all maps of a type, sorted by name.
    ///
    /// A missing element directory lists as empty rather than erroring;
    /// a mapset starts with no element directories at all.
    ///
    /// # Errors
    ///
    /// Returns `GisError::Io` when the element directory cannot be read.
    pub fn list_maps(&self, map_type: MapType) -> Result<Vec<String>, GisError> {
        let dir = self.element_path(map_type.primary_element());
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(GisError::io(&dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| GisError::io(&dir, e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// Remove one map: its primary element file plus any auxiliary
    /// element files.
    ///
    /// Absence from an auxiliary element is not an error; absence from
    /// the primary element is.
    ///
    /// # Errors
    ///
    /// Returns `GisError::MapNotFound` when the map does not exist, or
    /// `GisError::Io` when a file cannot be deleted.
    pub fn remove_map(&self, map_type: MapType, name: &str) -> Result<(), GisError> {
        let primary = self.map_path(map_type.primary_element(), name);
        match fs::remove_file(&primary) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GisError::MapNotFound {
                    name: name.to_string(),
                });
            }
            Err(e) => return Err(GisError::io(&primary, e)),
        }

        for element in map_type.auxiliary_elements() {
            let path = self.map_path(element, name);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(GisError::io(&path, e)),
            }
        }
        Ok(())
    }
}

pub(crate) fn ensure_element_dir(session: &Session, element: &str) -> Result<PathBuf, GisError> {
    let dir = session.element_path(element);
    fs::create_dir_all(&dir).map_err(|e| GisError::io(&dir, e))?;
    Ok(dir)
}
