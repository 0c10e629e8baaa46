//! Error types for the DEM crate.

use thiserror::Error;

/// Errors that can occur when fetching or assembling DEM data.
#[derive(Debug, Error)]
pub enum DemError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF encoding or decoding error.
    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    /// Invalid GeoTIFF - missing or malformed georeferencing tags.
    #[error("Invalid GeoTIFF: {0}")]
    InvalidGeoTiff(String),

    /// The bounding box is not a valid geographic extent.
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Coordinate is outside the bounds of the raster.
    #[error("Coordinate ({lat}, {lon}) is outside raster bounds ({min_lat}-{max_lat}, {min_lon}-{max_lon})")]
    OutOfBounds {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        lon: f64,
        /// Raster minimum latitude.
        min_lat: f64,
        /// Raster maximum latitude.
        max_lat: f64,
        /// Raster minimum longitude.
        min_lon: f64,
        /// Raster maximum longitude.
        max_lon: f64,
    },

    /// No elevation data at the requested coordinate.
    #[error("No elevation data at coordinate ({lat}, {lon})")]
    NoData {
        /// Requested latitude.
        lat: f64,
        /// Requested longitude.
        lon: f64,
    },

    /// HTTP request error when fetching tiles.
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Failed to download a tile from the remote server.
    #[error("Failed to download tile z={z} x={x} y={y}: {reason}")]
    TileDownloadFailed {
        /// Zoom level.
        z: u8,
        /// X tile coordinate.
        x: u32,
        /// Y tile coordinate.
        y: u32,
        /// Reason for failure.
        reason: String,
    },

    /// Invalid zoom level.
    #[error("Invalid zoom level {0} (must be 1-14)")]
    InvalidZoomLevel(u8),
}
