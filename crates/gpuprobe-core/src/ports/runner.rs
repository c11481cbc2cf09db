//! Probe runner port.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::{BenchmarkInput, CapabilityReport, InferenceResults, ProbeReport};

/// Runs the environment probe and both delegate benchmarks.
///
/// Every method is infallible once the model is available: failures are
/// recorded in the returned data.
#[async_trait]
pub trait ProbeRunnerPort: Send + Sync {
    /// Environment capability report only.
    async fn environment(&self) -> CapabilityReport;

    /// CPU then GPU, sequentially.
    async fn run_delegates(&self, model_path: &Path, input: &BenchmarkInput) -> InferenceResults;

    /// Environment probe merged with both delegate outcomes.
    async fn run_all(&self, model_path: &Path, input: &BenchmarkInput) -> ProbeReport {
        let environment = self.environment().await;
        let inference = self.run_delegates(model_path, input).await;
        ProbeReport {
            environment,
            inference,
        }
    }
}
