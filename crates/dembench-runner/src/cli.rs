//! Argument definitions and entry points for the three dembench binaries.

use crate::report::{FootprintTracker, RunReport};
use crate::{Result, RunnerError, ELAPSED_FILENAME, PROFILE_FILENAME, SIMPLE_PROFILE_FILENAME};
use clap::Parser;
use dembench_compute::{exercise, ComputeOptions};
use dembench_dem::{get_dem, BoundingBox, DemRaster, FetchOptions, DEFAULT_ZOOM};
use dembench_profile::{
    load_timings, simplify_profile, SimpleProfile, TimingLog, COMPUTE_PHASE, FETCH_PHASE,
    READ_RASTER_PHASE,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Fetch and stitch a Copernicus DEM, optionally running the synthetic
/// compute workload on the result.
#[derive(Debug, Parser)]
#[command(name = "get-dem", version)]
pub struct GetDemArgs {
    /// lat/lon bounding box (example: --bbox -118.068 34.222 -118.058 34.228)
    #[arg(
        long,
        num_args = 4,
        value_names = ["LEFT", "BOTTOM", "RIGHT", "TOP"],
        allow_negative_numbers = true,
        required = true
    )]
    pub bbox: Vec<f64>,

    /// flag to crunch numbers, exercise multiple cores, and use a LOT of memory
    #[arg(short, long)]
    pub compute: bool,

    /// output directory to write DEM GeoTIFF to
    #[arg(short = 'o', long = "out_dir", value_name = "PATH")]
    pub out_dir: PathBuf,

    /// tile zoom level (1-14)
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    /// tile cache directory (default: <out_dir>/tile_cache)
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// cap on the compute matrix edge (default: full raster square)
    #[arg(long, value_name = "N")]
    pub max_edge: Option<usize>,
}

impl GetDemArgs {
    /// The validated bounding box from the four positional floats.
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        // clap enforces exactly four values.
        Ok(BoundingBox::new(
            self.bbox[0],
            self.bbox[1],
            self.bbox[2],
            self.bbox[3],
        )?)
    }
}

/// Collapse a run's detailed profiler output into a simple profile.
#[derive(Debug, Parser)]
#[command(name = "simplify-profile", version)]
pub struct SimplifyArgs {
    /// output directory to read and write profile files
    #[arg(short = 'o', long = "out_dir", value_name = "PATH")]
    pub out_dir: PathBuf,
}

/// Aggregate simplified profiles into a single, mean profile.
#[derive(Debug, Parser)]
#[command(name = "aggregate-profiles", version)]
pub struct AggregateArgs {
    /// path to a simple profile JSON file
    #[arg(value_name = "SIMPLE_PROFILE", required = true, num_args = 1..)]
    pub profile: Vec<PathBuf>,
}

/// Run the fetch-and-optionally-compute benchmark.
///
/// Always writes `dem.tif`, `elapsed.json`, and `profile.json` into the
/// output directory, so a run leaves everything `simplify-profile` needs.
pub fn run_get_dem(args: &GetDemArgs) -> Result<()> {
    let start = Instant::now();
    let mut footprint = FootprintTracker::new();
    let mut timings = TimingLog::new();

    let bbox = args.bounding_box()?;
    std::fs::create_dir_all(&args.out_dir)?;

    let options = FetchOptions {
        zoom: args.zoom,
        cache_dir: args.cache_dir.clone(),
        ..FetchOptions::default()
    };

    let dem_file = timings.time(FETCH_PHASE, || get_dem(&bbox, &args.out_dir, &options))?;
    footprint.sample();

    if args.compute {
        let raster = timings.time(READ_RASTER_PHASE, || DemRaster::from_geotiff(&dem_file))?;
        footprint.sample();

        let (width, height) = raster.dimensions();
        let compute_options = ComputeOptions {
            max_edge: args.max_edge,
        };
        timings.time(COMPUTE_PHASE, || {
            exercise(
                raster.data(),
                width as usize,
                height as usize,
                &compute_options,
            )
        })?;
        footprint.sample();
    }

    timings.write_file(args.out_dir.join(ELAPSED_FILENAME))?;

    let report = RunReport {
        max_footprint_mb: footprint.peak_mb(),
        elapsed_time_sec: start.elapsed().as_secs_f64(),
    };
    report.write_file(args.out_dir.join(PROFILE_FILENAME))?;

    Ok(())
}

/// Project `profile.json` + `elapsed.json` into `simple_profile.json`.
///
/// Returns the path of the written record.
pub fn run_simplify(args: &SimplifyArgs) -> Result<PathBuf> {
    let profile_path = args.out_dir.join(PROFILE_FILENAME);
    let detailed = read_json(&profile_path)?;

    let elapsed_path = args.out_dir.join(ELAPSED_FILENAME);
    let timings = load_timings(&elapsed_path).map_err(|source| RunnerError::ReadInput {
        path: elapsed_path.clone(),
        source,
    })?;

    let simple = simplify_profile(&detailed, &timings)?;

    let out_path = args.out_dir.join(SIMPLE_PROFILE_FILENAME);
    simple.write_file(&out_path)?;
    Ok(out_path)
}

/// Average the given simple profiles; returns the mean as pretty JSON.
pub fn run_aggregate(args: &AggregateArgs) -> Result<String> {
    let mut profiles = Vec::with_capacity(args.profile.len());
    for path in &args.profile {
        let profile =
            SimpleProfile::from_file(path).map_err(|source| RunnerError::ReadInput {
                path: path.clone(),
                source,
            })?;
        profiles.push(profile);
    }

    let mean = SimpleProfile::mean(&profiles)?;
    Ok(mean.to_pretty_json()?)
}

/// Read a JSON document with path context on failure.
fn read_json(path: &Path) -> Result<Value> {
    let load = || -> dembench_profile::Result<Value> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    };
    load().map_err(|source| RunnerError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}
