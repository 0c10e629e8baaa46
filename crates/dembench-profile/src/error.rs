//! Error types for the profile crate.

use thiserror::Error;

/// Errors that can occur when building or aggregating profiles.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// I/O error reading or writing a profile file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A profile file did not parse as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The detailed profiler report lacks a required key, or the value
    /// under that key is not a number.
    #[error("Profiler report is missing required numeric field `{0}`")]
    MissingField(&'static str),

    /// Aggregation was requested over zero records; the mean is undefined.
    #[error("Cannot average an empty set of profiles")]
    EmptyInput,

    /// A profile field is negative, NaN, or infinite.
    #[error("Profile field `{field}` must be finite and non-negative, got {value}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}
