//! Raster map primitives.
//!
//! A raster map is a TOML header in `cellhd/` describing bounds and grid
//! shape, a flat little-endian `f64` cell file in `cell/`, and a one-line
//! category file in `cats/`.

use crate::region::{self, Region};
use crate::{GisError, Session, ensure_element_dir};
use serde::{Deserialize, Serialize};
use std::fs;

/// Per-map bounds and grid shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterHeader {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub rows: usize,
    pub cols: usize,
}

impl RasterHeader {
    #[must_use]
    pub fn from_region(region: &Region) -> Self {
        Self {
            north: region.north,
            south: region.south,
            east: region.east,
            west: region.west,
            rows: region.rows(),
            cols: region.cols(),
        }
    }
}

/// Create a raster filled with a constant over the current region.
///
/// This is the fixture generator behind map-calculator expressions of
/// the form `name = value`.
///
/// # Errors
///
/// Returns `GisError` when the region cannot be read or the map files
/// cannot be written.
pub fn write_const_raster(session: &Session, name: &str, value: f64) -> Result<(), GisError> {
    let region = region::read_region(session)?;
    let header = RasterHeader::from_region(&region);

    let cellhd_dir = ensure_element_dir(session, "cellhd")?;
    let header_path = cellhd_dir.join(name);
    let header_text = toml::to_string(&header).map_err(|e| GisError::MalformedHeader {
        path: header_path.clone(),
        message: e.to_string(),
    })?;
    fs::write(&header_path, header_text).map_err(|e| GisError::Io {
        path: header_path,
        source: e,
    })?;

    let cell_dir = ensure_element_dir(session, "cell")?;
    let cell_path = cell_dir.join(name);
    let mut data = Vec::with_capacity(header.rows * header.cols * 8);
    for _ in 0..header.rows * header.cols {
        data.extend_from_slice(&value.to_le_bytes());
    }
    fs::write(&cell_path, data).map_err(|e| GisError::Io {
        path: cell_path,
        source: e,
    })?;

    let cats_dir = ensure_element_dir(session, "cats")?;
    let cats_path = cats_dir.join(name);
    fs::write(&cats_path, format!("0:{value}\n")).map_err(|e| GisError::Io {
        path: cats_path,
        source: e,
    })
}

/// Read back a raster's header.
///
/// # Errors
///
/// Returns `GisError::MapNotFound` when the header file is missing,
/// `GisError::MalformedHeader` when it does not parse.
pub fn raster_header(session: &Session, name: &str) -> Result<RasterHeader, GisError> {
    let path = session.map_path("cellhd", name);
    let text = fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GisError::MapNotFound {
                name: name.to_string(),
            }
        } else {
            GisError::Io {
                path: path.clone(),
                source: e,
            }
        }
    })?;
    toml::from_str(&text).map_err(|e| GisError::MalformedHeader {
        path,
        message: e.to_string(),
    })
}

/// Read a raster's cell values in row-major order.
///
/// # Errors
///
/// Returns `GisError::MapNotFound` when the cell file is missing.
pub fn read_cells(session: &Session, name: &str) -> Result<Vec<f64>, GisError> {
    let path = session.map_path("cell", name);
    let bytes = fs::read(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GisError::MapNotFound {
                name: name.to_string(),
            }
        } else {
            GisError::Io {
                path: path.clone(),
                source: e,
            }
        }
    })?;

    let mut cells = Vec::with_capacity(bytes.len() / 8);
    for chunk in bytes.chunks_exact(8) {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        cells.push(f64::from_le_bytes(raw));
    }
    Ok(cells)
}
