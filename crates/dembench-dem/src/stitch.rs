//! Mosaic assembly: fetch the tiles covering a bounding box and resample
//! them onto one regular lat/lon grid.

use crate::bbox::BoundingBox;
use crate::fetch::{FetchOptions, TileFetcher};
use crate::raster::{DemRaster, GeoBounds, NO_DATA_VALUE};
use crate::tile::{TileCoord, TILE_SIZE};
use crate::{DemError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Filename of the stitched output raster.
pub const DEM_FILENAME: &str = "dem.tif";

/// Tile coordinates of the northwest and southeast corner tiles covering a
/// bounding box.
pub fn tile_range(bbox: &BoundingBox, zoom: u8) -> Result<(TileCoord, TileCoord)> {
    let nw = TileCoord::from_lat_lon(bbox.top, bbox.left, zoom)?;
    let se = TileCoord::from_lat_lon(bbox.bottom, bbox.right, zoom)?;
    Ok((nw, se))
}

/// Output grid dimensions for a bounding box at a given zoom.
///
/// The grid resolution is the nominal longitude resolution of the source
/// tiles (360 degrees over 2^z tiles of 512 pixels), applied to both axes.
pub fn grid_dimensions(bbox: &BoundingBox, zoom: u8) -> (u32, u32) {
    let n = (1u32 << zoom) as f64;
    let res = 360.0 / (n * TILE_SIZE as f64);
    let width = (bbox.width_deg() / res).ceil() as u32;
    let height = (bbox.height_deg() / res).ceil() as u32;
    (width.max(1), height.max(1))
}

/// Fetch every tile covering `bbox` and resample them onto one raster.
///
/// Pixels falling on missing source data are filled with
/// [`NO_DATA_VALUE`] and the count is logged.
pub fn stitch(fetcher: &mut TileFetcher, bbox: &BoundingBox) -> Result<DemRaster> {
    let zoom = fetcher.zoom();
    let (nw, se) = tile_range(bbox, zoom)?;
    let tile_count = ((se.x - nw.x + 1) as u64) * ((se.y - nw.y + 1) as u64);
    info!(
        "stitching {} tile(s) at zoom {} for bbox {}",
        tile_count, zoom, bbox
    );

    let mut tiles: HashMap<TileCoord, DemRaster> = HashMap::new();
    for x in nw.x..=se.x {
        for y in nw.y..=se.y {
            let coord = TileCoord::new(zoom, x, y);
            let path = fetcher.fetch_tile(&coord)?;
            let tile = DemRaster::from_geotiff_with_bounds(&path, coord.bounds())?;
            tiles.insert(coord, tile);
        }
    }

    let stats = fetcher.download_stats();
    info!(
        "{} tile(s) downloaded ({} bytes), {} served from cache",
        stats.tiles_downloaded,
        stats.bytes_downloaded,
        tile_count as usize - stats.tiles_downloaded
    );

    let (width, height) = grid_dimensions(bbox, zoom);
    let res_lon = bbox.width_deg() / width as f64;
    let res_lat = bbox.height_deg() / height as f64;

    let mut data = vec![NO_DATA_VALUE; (width as usize) * (height as usize)];
    let mut missing: u64 = 0;

    for row in 0..height {
        let lat = bbox.top - (row as f64 + 0.5) * res_lat;
        for col in 0..width {
            let lon = bbox.left + (col as f64 + 0.5) * res_lon;
            let coord = TileCoord::from_lat_lon(lat, lon, zoom)?;

            let sampled = tiles.get(&coord).map(|tile| tile.sample(lat, lon));
            match sampled {
                Some(Ok(elevation)) => {
                    data[(row as usize) * (width as usize) + (col as usize)] = elevation;
                }
                Some(Err(DemError::NoData { .. })) | Some(Err(DemError::OutOfBounds { .. })) => {
                    missing += 1;
                }
                Some(Err(e)) => return Err(e),
                None => missing += 1,
            }
        }
    }

    if missing > 0 {
        warn!("{} of {} output pixels have no source data", missing, data.len());
    }

    DemRaster::new(
        data,
        width,
        height,
        GeoBounds {
            min_lat: bbox.bottom,
            max_lat: bbox.top,
            min_lon: bbox.left,
            max_lon: bbox.right,
        },
        Some(NO_DATA_VALUE),
    )
}

/// Generate a DEM GeoTIFF for the given bounding box.
///
/// Fetches the covering tiles (honoring the cache in `options`), stitches
/// them, and writes the result to `<out_dir>/dem.tif`. The output directory
/// is created if it does not exist.
///
/// Returns the path to the generated file.
pub fn get_dem(bbox: &BoundingBox, out_dir: &Path, options: &FetchOptions) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)?;

    let cache_dir = options
        .cache_dir
        .clone()
        .unwrap_or_else(|| out_dir.join("tile_cache"));
    let mut fetcher = TileFetcher::new(&cache_dir, options.zoom, options.timeout)?;

    let raster = stitch(&mut fetcher, bbox)?;

    let dem_file = out_dir.join(DEM_FILENAME);
    raster.write_geotiff(&dem_file)?;

    let (width, height) = raster.dimensions();
    info!("wrote {}x{} raster to {}", width, height, dem_file.display());

    Ok(dem_file)
}
