//! The four-field summary profile record.

use crate::{ProfileError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Add;
use std::path::Path;

/// Compact summary of one benchmark run.
///
/// All fields are non-negative, finite floating-point values (seconds or
/// megabytes). A record is produced either by projecting a detailed profiler
/// report (see [`crate::simplify_profile`]) or by averaging a non-empty set
/// of records with [`SimpleProfile::mean`]. Records are plain values and are
/// never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleProfile {
    /// Peak memory footprint observed during the run, in megabytes.
    pub max_footprint_mb: f64,
    /// Total wall-clock duration of the run, in seconds.
    pub total_elapsed_sec: f64,
    /// Time attributed to DEM fetch plus raster read, in seconds.
    pub download_and_stitch_sec: f64,
    /// Time attributed to the synthetic compute phase, in seconds.
    pub compute_sec: f64,
}

impl Add for SimpleProfile {
    type Output = SimpleProfile;

    /// Field-wise addition. Associative and commutative under exact
    /// arithmetic, so any reduction order is valid.
    fn add(self, other: SimpleProfile) -> SimpleProfile {
        SimpleProfile {
            max_footprint_mb: self.max_footprint_mb + other.max_footprint_mb,
            total_elapsed_sec: self.total_elapsed_sec + other.total_elapsed_sec,
            download_and_stitch_sec: self.download_and_stitch_sec + other.download_and_stitch_sec,
            compute_sec: self.compute_sec + other.compute_sec,
        }
    }
}

impl SimpleProfile {
    /// Check that every field is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_footprint_mb", self.max_footprint_mb),
            ("total_elapsed_sec", self.total_elapsed_sec),
            ("download_and_stitch_sec", self.download_and_stitch_sec),
            ("compute_sec", self.compute_sec),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ProfileError::InvalidValue { field, value });
            }
        }
        Ok(())
    }

    /// Compute the element-wise arithmetic mean of a set of records.
    ///
    /// Sums left-to-right in slice order so the floating-point rounding is
    /// reproducible for a given input ordering.
    ///
    /// # Errors
    /// Returns [`ProfileError::EmptyInput`] if `profiles` is empty.
    pub fn mean(profiles: &[SimpleProfile]) -> Result<SimpleProfile> {
        let (first, rest) = profiles.split_first().ok_or(ProfileError::EmptyInput)?;
        let totals = rest.iter().fold(*first, |acc, p| acc + *p);
        let n = profiles.len() as f64;

        Ok(SimpleProfile {
            max_footprint_mb: totals.max_footprint_mb / n,
            total_elapsed_sec: totals.total_elapsed_sec / n,
            download_and_stitch_sec: totals.download_and_stitch_sec / n,
            compute_sec: totals.compute_sec / n,
        })
    }

    /// Load a record from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SimpleProfile> {
        let text = std::fs::read_to_string(path)?;
        let profile: SimpleProfile = serde_json::from_str(&text)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Write the record to a file as pretty-printed JSON.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_pretty_json()?)?;
        Ok(())
    }

    /// Render the record as pretty-printed JSON.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(mb: f64, total: f64, fetch: f64, compute: f64) -> SimpleProfile {
        SimpleProfile {
            max_footprint_mb: mb,
            total_elapsed_sec: total,
            download_and_stitch_sec: fetch,
            compute_sec: compute,
        }
    }

    #[test]
    fn test_mean_of_two_records() {
        let a = record(100.0, 10.0, 4.0, 6.0);
        let b = record(200.0, 20.0, 8.0, 12.0);

        let mean = SimpleProfile::mean(&[a, b]).unwrap();
        assert_eq!(mean, record(150.0, 15.0, 6.0, 9.0));
    }

    #[test]
    fn test_mean_is_commutative() {
        let a = record(100.0, 10.0, 4.0, 6.0);
        let b = record(33.3, 7.1, 2.9, 4.2);

        let ab = SimpleProfile::mean(&[a, b]).unwrap();
        let ba = SimpleProfile::mean(&[b, a]).unwrap();

        assert_relative_eq!(ab.max_footprint_mb, ba.max_footprint_mb, epsilon = 1e-12);
        assert_relative_eq!(ab.total_elapsed_sec, ba.total_elapsed_sec, epsilon = 1e-12);
        assert_relative_eq!(
            ab.download_and_stitch_sec,
            ba.download_and_stitch_sec,
            epsilon = 1e-12
        );
        assert_relative_eq!(ab.compute_sec, ba.compute_sec, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_of_single_record_is_identity() {
        let a = record(512.5, 30.2, 5.0, 20.0);
        assert_eq!(SimpleProfile::mean(&[a]).unwrap(), a);
    }

    #[test]
    fn test_mean_of_identical_records_is_identity() {
        let a = record(64.0, 8.0, 2.0, 4.0);
        let mean = SimpleProfile::mean(&[a; 5]).unwrap();
        assert_eq!(mean, a);
    }

    #[test]
    fn test_mean_of_empty_slice_fails() {
        assert!(matches!(
            SimpleProfile::mean(&[]),
            Err(ProfileError::EmptyInput)
        ));
    }

    #[test]
    fn test_add_is_field_wise() {
        let a = record(1.0, 2.0, 3.0, 4.0);
        let b = record(10.0, 20.0, 30.0, 40.0);
        assert_eq!(a + b, record(11.0, 22.0, 33.0, 44.0));
    }

    #[test]
    fn test_validate_rejects_negative_and_non_finite() {
        assert!(record(1.0, 1.0, 1.0, 1.0).validate().is_ok());
        assert!(record(-1.0, 1.0, 1.0, 1.0).validate().is_err());
        assert!(record(1.0, f64::NAN, 1.0, 1.0).validate().is_err());
        assert!(record(1.0, 1.0, f64::INFINITY, 1.0).validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simple_profile.json");

        let a = record(512.5, 30.2, 5.0, 20.0);
        a.write_file(&path).unwrap();

        let back = SimpleProfile::from_file(&path).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn test_from_file_rejects_invalid_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"max_footprint_mb": -5.0, "total_elapsed_sec": 1.0,
                "download_and_stitch_sec": 0.0, "compute_sec": 0.0}"#,
        )
        .unwrap();

        assert!(matches!(
            SimpleProfile::from_file(&path),
            Err(ProfileError::InvalidValue { .. })
        ));
    }
}
