//! Terrain tile downloader with an on-disk cache.

use crate::tile::{TileCoord, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use crate::{DemError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Default HTTP timeout for tile downloads.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for a fetch-and-stitch run.
///
/// All knobs are explicit here; nothing is read from or written to the
/// process environment.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Tile zoom level (1-14).
    pub zoom: u8,
    /// Directory for downloaded tiles. When `None`, a `tile_cache`
    /// subdirectory of the output directory is used.
    pub cache_dir: Option<PathBuf>,
    /// HTTP timeout per tile download.
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            cache_dir: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Download statistics for the fetcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadStats {
    /// Number of tiles downloaded this session.
    pub tiles_downloaded: usize,
    /// Total bytes downloaded this session.
    pub bytes_downloaded: u64,
}

/// Downloads AWS elevation tiles into a local cache directory.
///
/// Already-cached tiles are served without touching the network, so repeated
/// benchmark runs over the same bounding box only pay the download cost once.
pub struct TileFetcher {
    /// Cache directory for downloaded tiles.
    cache_dir: PathBuf,
    /// Zoom level for all tiles fetched through this instance.
    zoom: u8,
    /// HTTP client for downloading tiles.
    client: reqwest::blocking::Client,
    /// Number of tiles downloaded this session.
    tiles_downloaded: usize,
    /// Total bytes downloaded this session.
    bytes_downloaded: u64,
}

impl std::fmt::Debug for TileFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileFetcher")
            .field("cache_dir", &self.cache_dir)
            .field("zoom", &self.zoom)
            .finish()
    }
}

impl TileFetcher {
    /// Create a new fetcher writing into `cache_dir`.
    ///
    /// The directory is created if it does not exist.
    pub fn new<P: AsRef<Path>>(cache_dir: P, zoom: u8, timeout: Duration) -> Result<Self> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            return Err(DemError::InvalidZoomLevel(zoom));
        }

        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(&cache_dir)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            cache_dir,
            zoom,
            client,
            tiles_downloaded: 0,
            bytes_downloaded: 0,
        })
    }

    /// The zoom level this fetcher operates at.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// The cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Download statistics for this session.
    pub fn download_stats(&self) -> DownloadStats {
        DownloadStats {
            tiles_downloaded: self.tiles_downloaded,
            bytes_downloaded: self.bytes_downloaded,
        }
    }

    /// Check if a tile is already cached on disk.
    pub fn is_cached(&self, coord: &TileCoord) -> bool {
        coord.cache_path(&self.cache_dir).exists()
    }

    /// Fetch a tile, using the cache if available.
    ///
    /// Returns the path to the local tile file.
    pub fn fetch_tile(&mut self, coord: &TileCoord) -> Result<PathBuf> {
        let cache_path = coord.cache_path(&self.cache_dir);

        if cache_path.exists() {
            debug!("tile z={} x={} y={} served from cache", coord.z, coord.x, coord.y);
            return Ok(cache_path);
        }

        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let url = coord.aws_url();
        info!("downloading {}", url);

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(DemError::TileDownloadFailed {
                z: coord.z,
                x: coord.x,
                y: coord.y,
                reason: format!("HTTP {}", response.status()),
            });
        }

        let bytes = response.bytes()?;
        self.tiles_downloaded += 1;
        self.bytes_downloaded += bytes.len() as u64;

        let mut file = fs::File::create(&cache_path)?;
        file.write_all(&bytes)?;

        Ok(cache_path)
    }
}
