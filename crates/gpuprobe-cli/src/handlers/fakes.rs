//! Fake ports for handler tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gpuprobe_core::{
    Backend, BenchmarkInput, CapabilityReport, ContextInitResult, DelegateOutcome,
    HarnessConfig, InferenceResults, Measurement, ModelProvisionerPort, ModelSource,
    ProbeRunnerPort, ProbeService, ProvisionError, ToolResult,
};

use crate::bootstrap::CliContext;

struct FakeProvisioner {
    fail: bool,
}

#[async_trait]
impl ModelProvisionerPort for FakeProvisioner {
    async fn ensure(&self, source: &ModelSource) -> Result<PathBuf, ProvisionError> {
        if self.fail {
            return Err(ProvisionError::Fetch {
                url: source.url.clone(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(source.path.clone())
    }
}

/// CPU succeeds, GPU fails to construct.
struct FakeRunner;

#[async_trait]
impl ProbeRunnerPort for FakeRunner {
    async fn environment(&self) -> CapabilityReport {
        let mut driver_tools = BTreeMap::new();
        driver_tools.insert(
            "nvidia-smi".to_string(),
            ToolResult::failed("nvidia-smi: failed to start: No such file or directory"),
        );
        CapabilityReport {
            gpu_device_nodes: vec![],
            driver_tools,
            graphics_context: ContextInitResult::failed("no EGL library"),
            environment: BTreeMap::new(),
        }
    }

    async fn run_delegates(&self, _model_path: &Path, input: &BenchmarkInput) -> InferenceResults {
        let cpu = match input {
            BenchmarkInput::Stream(_) => Measurement::throughput(Duration::from_secs(2), 100),
            BenchmarkInput::SyntheticFrame { .. } => {
                Measurement::latency(Duration::from_millis(8), "1 outputs; output f32[1, 1000]")
            }
        };
        InferenceResults {
            cpu: DelegateOutcome::success(Backend::Cpu, cpu),
            gpu: DelegateOutcome::failure(
                Backend::Gpu,
                "failed to create gpu pipeline: CUDA execution provider unavailable",
            ),
        }
    }
}

pub fn context(fail_provision: bool) -> CliContext {
    let service = ProbeService::new(
        Arc::new(FakeProvisioner {
            fail: fail_provision,
        }),
        Arc::new(FakeRunner),
    );
    CliContext::new(service, HarnessConfig::default())
}
