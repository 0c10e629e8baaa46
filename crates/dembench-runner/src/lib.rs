//! # dembench-runner
//!
//! CLI entry points for the dembench benchmarking harness.
//!
//! Three binaries share this library:
//! - `get-dem` fetches and stitches a DEM for a bounding box, optionally
//!   running the synthetic compute workload, and records phase timings plus
//!   peak memory footprint alongside the raster.
//! - `simplify-profile` collapses a run's `profile.json` and `elapsed.json`
//!   into a four-field `simple_profile.json`.
//! - `aggregate-profiles` averages any number of simple profiles and prints
//!   the mean record.

mod cli;
mod error;
mod report;

pub use cli::{
    run_aggregate, run_get_dem, run_simplify, AggregateArgs, GetDemArgs, SimplifyArgs,
};
pub use error::RunnerError;
pub use report::{FootprintTracker, RunReport};

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Detailed profiler report filename (input to `simplify-profile`).
pub const PROFILE_FILENAME: &str = "profile.json";

/// Function-timing report filename (input to `simplify-profile`).
pub const ELAPSED_FILENAME: &str = "elapsed.json";

/// Simple profile filename (output of `simplify-profile`).
pub const SIMPLE_PROFILE_FILENAME: &str = "simple_profile.json";

/// Initialize the tracing subscriber for a binary.
///
/// Honors `RUST_LOG`; defaults to info level.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
