//! # dembench-dem
//!
//! Copernicus DEM fetch-and-stitch for the dembench harness.
//!
//! Downloads 512x512 GeoTIFF elevation tiles from the AWS Open Data terrain
//! tile bucket, mosaics the tiles covering a requested bounding box onto a
//! regular lat/lon grid, and writes the result as a single georeferenced
//! GeoTIFF (`dem.tif`). Downloaded tiles are cached on disk so repeated runs
//! over the same extent skip the network.
//!
//! Tiles are fetched from:
//! `https://s3.amazonaws.com/elevation-tiles-prod/geotiff/{z}/{x}/{y}.tif`
//! using the OpenStreetMap Slippy Map tiling convention. Zoom 12
//! (~38m resolution at the equator) is the default.
//!
//! ## Example
//!
//! ```no_run
//! use dembench_dem::{get_dem, BoundingBox, FetchOptions};
//!
//! // Bounding box: left bottom right top (the Big Island of Hawaii).
//! let bbox = BoundingBox::new(-156.0, 18.8, -154.7, 20.3)?;
//! let dem_file = get_dem(&bbox, "output".as_ref(), &FetchOptions::default())?;
//! println!("DEM written to {}", dem_file.display());
//! # Ok::<(), dembench_dem::DemError>(())
//! ```

mod bbox;
mod error;
mod fetch;
mod raster;
mod stitch;
mod tile;

pub use bbox::{BoundingBox, MERCATOR_MAX_LAT};
pub use error::DemError;
pub use fetch::{DownloadStats, FetchOptions, TileFetcher};
pub use raster::{DemRaster, GeoBounds, NO_DATA_VALUE};
pub use stitch::{get_dem, grid_dimensions, stitch, tile_range, DEM_FILENAME};
pub use tile::{TileCoord, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, TILE_SIZE};

/// Result type for DEM operations.
pub type Result<T> = std::result::Result<T, DemError>;
