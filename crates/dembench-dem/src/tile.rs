//! Slippy-map tile coordinates for the AWS elevation tile grid.
//!
//! Tiles follow the OpenStreetMap Slippy Map naming convention:
//! - `z` is the zoom level (1-14)
//! - `x` is the column (0 to 2^z - 1, from west to east)
//! - `y` is the row (0 to 2^z - 1, from north to south)
//!
//! Each tile is a 512x512 GeoTIFF served from
//! `https://s3.amazonaws.com/elevation-tiles-prod/geotiff/{z}/{x}/{y}.tif`.

use crate::raster::GeoBounds;
use crate::{DemError, Result};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

/// AWS S3 base URL for elevation tiles.
const AWS_TILE_BASE_URL: &str = "https://s3.amazonaws.com/elevation-tiles-prod/geotiff";

/// Edge length of an AWS elevation tile in pixels.
pub const TILE_SIZE: u32 = 512;

/// Minimum valid zoom level.
pub const MIN_ZOOM: u8 = 1;

/// Maximum valid zoom level for AWS elevation tiles.
pub const MAX_ZOOM: u8 = 14;

/// Default zoom level (good balance of detail and tile count).
pub const DEFAULT_ZOOM: u8 = 12;

/// OSM-style tile coordinates (z, x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level (1-14).
    pub z: u8,
    /// X coordinate (column, 0 at 180 degrees W, increases eastward).
    pub x: u32,
    /// Y coordinate (row, 0 at ~85.05 degrees N, increases southward).
    pub y: u32,
}

impl TileCoord {
    /// Create a new tile coordinate.
    ///
    /// # Panics
    /// Panics if coordinates are out of range for the zoom level.
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        let max_coord = 1u32 << z;
        assert!(x < max_coord, "x={} out of range for zoom {}", x, z);
        assert!(y < max_coord, "y={} out of range for zoom {}", y, z);
        Self { z, x, y }
    }

    /// Convert latitude/longitude to tile coordinates.
    ///
    /// Uses the OpenStreetMap Slippy Map tiling formula:
    /// - x = floor((lon + 180) / 360 * 2^z)
    /// - y = floor((1 - ln(tan(lat) + sec(lat)) / pi) / 2 * 2^z)
    pub fn from_lat_lon(lat: f64, lon: f64, z: u8) -> Result<Self> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&z) {
            return Err(DemError::InvalidZoomLevel(z));
        }

        // Clamp latitude to the valid Web Mercator range.
        let lat_clamped = lat.clamp(-85.0511, 85.0511);

        let n = (1u32 << z) as f64;

        let x = ((lon + 180.0) / 360.0 * n).floor() as u32;

        let lat_rad = lat_clamped.to_radians();
        let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor() as u32;

        // Clamp to valid range (handles edge cases at exactly 180 degrees).
        let max_coord = (1u32 << z) - 1;
        let x = x.min(max_coord);
        let y = y.min(max_coord);

        Ok(Self { z, x, y })
    }

    /// Get the geographic bounds of this tile.
    pub fn bounds(&self) -> GeoBounds {
        let n = (1u32 << self.z) as f64;

        let min_lon = self.x as f64 / n * 360.0 - 180.0;
        let max_lon = (self.x + 1) as f64 / n * 360.0 - 180.0;

        // Inverse of the Slippy Map formula.
        let max_lat = (PI * (1.0 - 2.0 * self.y as f64 / n))
            .sinh()
            .atan()
            .to_degrees();
        let min_lat = (PI * (1.0 - 2.0 * (self.y + 1) as f64 / n))
            .sinh()
            .atan()
            .to_degrees();

        GeoBounds {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Get the cache file path for this tile.
    pub fn cache_path(&self, cache_dir: &Path) -> PathBuf {
        cache_dir
            .join(self.z.to_string())
            .join(self.x.to_string())
            .join(format!("{}.tif", self.y))
    }

    /// Get the AWS S3 URL for this tile.
    pub fn aws_url(&self) -> String {
        format!("{}/{}/{}/{}.tif", AWS_TILE_BASE_URL, self.z, self.x, self.y)
    }
}
