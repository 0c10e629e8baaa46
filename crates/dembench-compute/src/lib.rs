//! # dembench-compute
//!
//! Synthetic compute workload for benchmarking batch-processing nodes.
//!
//! The workload crops an elevation raster to its largest leading square,
//! inverts the resulting dense matrix, and multiplies the inverse by the
//! original. The product is discarded; the sole purpose is to occupy the
//! CPU for an extended period and allocate a significant amount of memory.
//! The input raster is never modified.

use nalgebra::DMatrix;
use std::hint::black_box;
use thiserror::Error;
use tracing::info;

/// Errors from the synthetic workload.
#[derive(Debug, Error)]
pub enum ComputeError {
    /// The raster has no pixels to work with.
    #[error("Cannot run workload on an empty raster")]
    EmptyRaster,

    /// The cropped matrix has no inverse.
    #[error("Matrix of edge {edge} is singular; cannot invert")]
    SingularMatrix {
        /// Edge length of the square matrix.
        edge: usize,
    },
}

/// What the workload actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputeStats {
    /// Edge length of the square matrix that was inverted.
    pub edge: usize,
}

/// Configuration for the workload.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeOptions {
    /// Cap on the square matrix edge. `None` uses the full raster square;
    /// a cap bounds the O(n^3) cost on constrained machines.
    pub max_edge: Option<usize>,
}

/// Run the inverse-then-multiply workload over a raster.
///
/// `data` is the raster in row-major order with the given dimensions. The
/// matrix is the top-left `edge x edge` square of the raster, where `edge`
/// is the smaller dimension (optionally capped by
/// [`ComputeOptions::max_edge`]).
///
/// # Errors
/// [`ComputeError::EmptyRaster`] for a zero-sized input,
/// [`ComputeError::SingularMatrix`] if the crop happens to be
/// non-invertible (e.g. a constant-elevation raster).
pub fn exercise(
    data: &[f32],
    width: usize,
    height: usize,
    options: &ComputeOptions,
) -> Result<ComputeStats, ComputeError> {
    let mut edge = width.min(height);
    if let Some(max_edge) = options.max_edge {
        edge = edge.min(max_edge);
    }
    if edge == 0 || data.len() < width * height {
        return Err(ComputeError::EmptyRaster);
    }

    info!(
        "inverting {0}x{0} matrix cropped from {1}x{2} raster",
        edge, width, height
    );

    // Crop to a square so the multiplicative inverse exists dimensionally.
    let square = DMatrix::from_fn(edge, edge, |row, col| data[row * width + col] as f64);

    let inverse = square
        .clone()
        .try_inverse()
        .ok_or(ComputeError::SingularMatrix { edge })?;

    // The product is discarded; black_box keeps the optimizer honest.
    black_box(inverse * square);

    Ok(ComputeStats { edge })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_well_conditioned_raster() {
        // Diagonally dominant grid: comfortably invertible.
        let width = 8;
        let height = 6;
        let mut data = vec![1.0f32; width * height];
        for i in 0..height {
            data[i * width + i] = 100.0 + i as f32;
        }

        let stats = exercise(&data, width, height, &ComputeOptions::default()).unwrap();
        assert_eq!(stats.edge, 6);
    }

    #[test]
    fn test_max_edge_caps_workload() {
        let mut data = vec![0.0f32; 16 * 16];
        for i in 0..16 {
            data[i * 16 + i] = 50.0;
        }

        let options = ComputeOptions { max_edge: Some(4) };
        let stats = exercise(&data, 16, 16, &options).unwrap();
        assert_eq!(stats.edge, 4);
    }

    #[test]
    fn test_empty_raster_fails() {
        assert!(matches!(
            exercise(&[], 0, 0, &ComputeOptions::default()),
            Err(ComputeError::EmptyRaster)
        ));
    }

    #[test]
    fn test_singular_matrix_fails() {
        // An all-zero raster has no inverse.
        let data = vec![0.0f32; 4 * 4];
        assert!(matches!(
            exercise(&data, 4, 4, &ComputeOptions::default()),
            Err(ComputeError::SingularMatrix { edge: 4 })
        ));
    }
}
