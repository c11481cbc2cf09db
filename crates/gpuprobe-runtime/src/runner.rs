//! Dual-backend runner.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use gpuprobe_core::{
    Backend, BenchmarkInput, CapabilityProbePort, CapabilityReport, InferenceResults,
    ProbeRunnerPort,
};
use tracing::info;

use crate::benchmark::DelegateBenchmark;

/// Capability probe plus CPU then GPU delegate benchmarks.
///
/// Each backend's outcome is independent: nothing here inspects one
/// outcome before running the other.
pub struct DualBackendRunner {
    probe: Arc<dyn CapabilityProbePort>,
    benchmark: DelegateBenchmark,
}

impl DualBackendRunner {
    pub fn new(probe: Arc<dyn CapabilityProbePort>, benchmark: DelegateBenchmark) -> Self {
        Self { probe, benchmark }
    }
}

#[async_trait]
impl ProbeRunnerPort for DualBackendRunner {
    async fn environment(&self) -> CapabilityReport {
        self.probe.probe().await
    }

    async fn run_delegates(&self, model_path: &Path, input: &BenchmarkInput) -> InferenceResults {
        info!(model = %model_path.display(), stream = input.is_stream(), "Benchmarking delegates");
        let cpu = self.benchmark.run(Backend::Cpu, model_path, input).await;
        let gpu = self.benchmark.run(Backend::Gpu, model_path, input).await;
        InferenceResults { cpu, gpu }
    }
}
