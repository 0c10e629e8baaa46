//! Run-level profiler report: peak footprint and total wall time.

use crate::Result;
use dembench_profile::ProfileError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Detailed profiler report for one run.
///
/// Written as `profile.json` next to the harness output so that
/// `simplify-profile` can consume it. The field names are the ones the
/// simplifier requires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Peak physical memory footprint observed, in megabytes.
    pub max_footprint_mb: f64,
    /// Total wall-clock duration of the run, in seconds.
    pub elapsed_time_sec: f64,
}

impl RunReport {
    /// Write the report to a file as pretty-printed JSON.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(ProfileError::from)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Tracks the peak physical memory footprint across sample points.
///
/// Sampling happens at phase boundaries, so short-lived allocation spikes
/// inside a phase can go unobserved. That matches the coarse per-run
/// granularity the summary record needs.
#[derive(Debug)]
pub struct FootprintTracker {
    peak_mb: f64,
}

impl FootprintTracker {
    /// Create a tracker and take an initial sample.
    pub fn new() -> Self {
        let mut tracker = Self { peak_mb: 0.0 };
        tracker.sample();
        tracker
    }

    /// Sample the current footprint, updating the peak.
    ///
    /// Returns the current footprint in megabytes, or zero if the platform
    /// reports no statistics.
    pub fn sample(&mut self) -> f64 {
        let current_mb = memory_stats::memory_stats()
            .map(|stats| stats.physical_mem as f64 / (1024.0 * 1024.0))
            .unwrap_or(0.0);
        if current_mb > self.peak_mb {
            self.peak_mb = current_mb;
        }
        current_mb
    }

    /// The peak footprint observed so far, in megabytes.
    pub fn peak_mb(&self) -> f64 {
        self.peak_mb
    }
}

impl Default for FootprintTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_tracker_is_monotonic() {
        let mut tracker = FootprintTracker::new();
        let first_peak = tracker.peak_mb();

        // Allocate something noticeable, then resample.
        let ballast = vec![1u8; 8 * 1024 * 1024];
        tracker.sample();
        assert!(tracker.peak_mb() >= first_peak);
        drop(ballast);

        // Peak never decreases even after the allocation is freed.
        let peak = tracker.peak_mb();
        tracker.sample();
        assert!(tracker.peak_mb() >= peak);
    }

    #[test]
    fn test_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        let report = RunReport {
            max_footprint_mb: 512.5,
            elapsed_time_sec: 30.2,
        };
        report.write_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: RunReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back, report);
    }
}
