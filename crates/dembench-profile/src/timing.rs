//! Phase-timing recorder.
//!
//! Produces the function-timing report consumed by
//! [`crate::simplify_profile`]: a flat JSON object mapping phase name to
//! elapsed seconds.

use crate::{FunctionTimings, Result};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Records named phase durations for one benchmark run.
#[derive(Debug, Default)]
pub struct TimingLog {
    timings: FunctionTimings,
}

impl TimingLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an elapsed duration for a phase.
    ///
    /// Recording the same phase twice accumulates the durations.
    pub fn record(&mut self, name: &str, elapsed_sec: f64) {
        *self.timings.entry(name.to_string()).or_insert(0.0) += elapsed_sec;
    }

    /// Run a closure, recording its wall-clock duration under `name`.
    ///
    /// The duration is also logged at info level.
    pub fn time<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed().as_secs_f64();
        info!("{}: {:.1} seconds", name, elapsed);
        self.record(name, elapsed);
        result
    }

    /// The recorded timings.
    pub fn timings(&self) -> &FunctionTimings {
        &self.timings
    }

    /// Elapsed seconds recorded for a phase, or zero if absent.
    pub fn elapsed(&self, name: &str) -> f64 {
        self.timings.get(name).copied().unwrap_or(0.0)
    }

    /// Write the timing map to a file as pretty-printed JSON.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(&self.timings)?)?;
        Ok(())
    }
}

/// Load a function-timing report from a JSON file.
pub fn load_timings<P: AsRef<Path>>(path: P) -> Result<FunctionTimings> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
