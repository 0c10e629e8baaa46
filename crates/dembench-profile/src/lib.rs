//! # dembench-profile
//!
//! Summary profile records for dembench benchmark runs.
//!
//! A run of the benchmark harness produces two JSON documents: a detailed
//! profiler report (peak footprint, total wall time, raw samples) and a
//! function-timing report (phase name to elapsed seconds). This crate
//! collapses those into a compact four-field [`SimpleProfile`] record and
//! averages any number of such records.
//!
//! ## Example
//!
//! ```
//! use dembench_profile::{simplify_profile, FunctionTimings, SimpleProfile};
//! use serde_json::json;
//!
//! let detailed = json!({"max_footprint_mb": 512.5, "elapsed_time_sec": 30.2});
//! let mut timings = FunctionTimings::new();
//! timings.insert("get_dem".to_string(), 5.0);
//!
//! let profile = simplify_profile(&detailed, &timings)?;
//! assert_eq!(profile.download_and_stitch_sec, 5.0);
//!
//! let mean = SimpleProfile::mean(&[profile, profile])?;
//! assert_eq!(mean, profile);
//! # Ok::<(), dembench_profile::ProfileError>(())
//! ```

mod error;
mod record;
mod simplify;
mod timing;

pub use error::ProfileError;
pub use record::SimpleProfile;
pub use simplify::{
    simplify_profile, FunctionTimings, COMPUTE_PHASE, FETCH_PHASE, READ_RASTER_PHASE,
};
pub use timing::{load_timings, TimingLog};

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
