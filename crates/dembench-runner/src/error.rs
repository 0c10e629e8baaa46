//! Error type for the CLI runner.

use dembench_compute::ComputeError;
use dembench_dem::DemError;
use dembench_profile::ProfileError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the dembench binaries.
///
/// Any error is fatal to the invocation: the binaries report it and exit
/// non-zero without writing partial output.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A required input file is missing or malformed.
    #[error("Failed to read {path}: {source}")]
    ReadInput {
        /// The offending path.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: ProfileError,
    },

    /// DEM fetch or stitch failure.
    #[error(transparent)]
    Dem(#[from] DemError),

    /// Profile projection or aggregation failure.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Synthetic workload failure.
    #[error(transparent)]
    Compute(#[from] ComputeError),

    /// I/O error outside a profile read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
