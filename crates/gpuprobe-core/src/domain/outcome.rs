//! Per-backend benchmark outcomes.

use std::time::Duration;

use serde::Serialize;

use super::Backend;

/// Stream throughput figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Throughput {
    pub frames: u64,
    pub seconds: f64,
    pub fps: f64,
}

impl Throughput {
    /// `fps` is `frames / seconds`, or `0.0` when no time elapsed.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(frames: u64, seconds: f64) -> Self {
        let fps = if seconds > 0.0 {
            frames as f64 / seconds
        } else {
            0.0
        };
        Self {
            frames,
            seconds,
            fps,
        }
    }
}

/// Metadata attached to a successful measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeasurementDetail {
    /// Single-frame probe: opaque text describing what the pipeline returned.
    Latency { result_type: String },
    /// Stream benchmark.
    Throughput(Throughput),
}

/// Timing data for a successful delegate run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub elapsed_ms: f64,
    #[serde(flatten)]
    pub detail: MeasurementDetail,
}

impl Measurement {
    pub fn latency(elapsed: Duration, result_type: impl Into<String>) -> Self {
        Self {
            elapsed_ms: duration_ms(elapsed),
            detail: MeasurementDetail::Latency {
                result_type: result_type.into(),
            },
        }
    }

    pub fn throughput(elapsed: Duration, frames: u64) -> Self {
        Self {
            elapsed_ms: duration_ms(elapsed),
            detail: MeasurementDetail::Throughput(Throughput::new(frames, elapsed.as_secs_f64())),
        }
    }
}

fn duration_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

/// Success with timing, or failure with a message. Never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Success(Measurement),
    Failure { error: String },
}

/// Result of benchmarking one backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelegateOutcome {
    pub backend: Backend,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl DelegateOutcome {
    pub const fn success(backend: Backend, measurement: Measurement) -> Self {
        Self {
            backend,
            outcome: Outcome::Success(measurement),
        }
    }

    /// Failure outcome. An empty message is replaced so the error is never blank.
    pub fn failure(backend: Backend, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "unknown error".to_string();
        }
        Self {
            backend,
            outcome: Outcome::Failure { error },
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    pub const fn elapsed_ms(&self) -> Option<f64> {
        match &self.outcome {
            Outcome::Success(m) => Some(m.elapsed_ms),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure { error } => Some(error),
        }
    }

    pub const fn throughput(&self) -> Option<&Throughput> {
        match &self.outcome {
            Outcome::Success(Measurement {
                detail: MeasurementDetail::Throughput(t),
                ..
            }) => Some(t),
            _ => None,
        }
    }
}
