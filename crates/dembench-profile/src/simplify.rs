//! Projection of detailed profiler output into a [`SimpleProfile`].

use crate::{ProfileError, Result, SimpleProfile};
use serde_json::Value;
use std::collections::BTreeMap;

/// Timing-map key for the DEM fetch-and-stitch phase.
pub const FETCH_PHASE: &str = "get_dem";
/// Timing-map key for the raster read-back phase.
pub const READ_RASTER_PHASE: &str = "read_dem_as_array";
/// Timing-map key for the synthetic compute phase.
pub const COMPUTE_PHASE: &str = "do_computations";

/// Function-timing report: function name to elapsed seconds.
///
/// A `BTreeMap` so iteration (and serialization) order is deterministic.
pub type FunctionTimings = BTreeMap<String, f64>;

/// Project a detailed profiler report and a function-timing report into a
/// [`SimpleProfile`].
///
/// The detailed report must be a JSON object carrying at least the numeric
/// keys `max_footprint_mb` and `elapsed_time_sec`; any other keys are
/// ignored. Phase timings absent from `timings` default to zero.
///
/// # Errors
/// Returns [`ProfileError::MissingField`] if a required key is absent or not
/// a number.
pub fn simplify_profile(detailed: &Value, timings: &FunctionTimings) -> Result<SimpleProfile> {
    let phase = |name: &str| timings.get(name).copied().unwrap_or(0.0);

    Ok(SimpleProfile {
        max_footprint_mb: require_f64(detailed, "max_footprint_mb")?,
        total_elapsed_sec: require_f64(detailed, "elapsed_time_sec")?,
        download_and_stitch_sec: phase(FETCH_PHASE) + phase(READ_RASTER_PHASE),
        compute_sec: phase(COMPUTE_PHASE),
    })
}

/// Extract a required numeric field from a JSON object.
fn require_f64(value: &Value, key: &'static str) -> Result<f64> {
    value
        .get(key)
        .and_then(Value::as_f64)
        .ok_or(ProfileError::MissingField(key))
}
