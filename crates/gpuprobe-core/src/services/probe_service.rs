//! Probe service - sequences model provisioning before probing.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ModelSource;
use crate::domain::{BenchmarkInput, CapabilityReport, InferenceResults, ProbeReport};
use crate::ports::{CoreError, ModelProvisionerPort, ProbeRunnerPort};

/// Entry point shared by every wrapper (CLI, HTTP handler).
///
/// Provisioning is a hard prerequisite: if the model cannot be made
/// available, no benchmark runs and the error is returned. Everything after
/// that is infallible.
#[derive(Clone)]
pub struct ProbeService {
    provisioner: Arc<dyn ModelProvisionerPort>,
    runner: Arc<dyn ProbeRunnerPort>,
}

impl ProbeService {
    pub fn new(provisioner: Arc<dyn ModelProvisionerPort>, runner: Arc<dyn ProbeRunnerPort>) -> Self {
        Self {
            provisioner,
            runner,
        }
    }

    /// Make sure the model exists locally and return its path.
    pub async fn prepare_model(&self, source: &ModelSource) -> Result<PathBuf, CoreError> {
        debug!(path = %source.path.display(), url = %source.url, "Ensuring model is available");
        let path = self.provisioner.ensure(source).await?;
        info!(path = %path.display(), "Model ready");
        Ok(path)
    }

    /// Provision, then environment probe plus both delegate benchmarks.
    pub async fn run_all(
        &self,
        source: &ModelSource,
        input: &BenchmarkInput,
    ) -> Result<ProbeReport, CoreError> {
        let model_path = self.prepare_model(source).await?;
        Ok(self.runner.run_all(&model_path, input).await)
    }

    /// Provision, then both delegate benchmarks without the environment probe.
    pub async fn run_delegates(
        &self,
        source: &ModelSource,
        input: &BenchmarkInput,
    ) -> Result<InferenceResults, CoreError> {
        let model_path = self.prepare_model(source).await?;
        Ok(self.runner.run_delegates(&model_path, input).await)
    }

    /// Environment capability report. Needs no model.
    pub async fn environment(&self) -> CapabilityReport {
        self.runner.environment().await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{Backend, ContextInitResult, DelegateOutcome, Measurement};
    use crate::ports::ProvisionError;

    struct FakeProvisioner {
        fail: bool,
    }

    #[async_trait]
    impl ModelProvisionerPort for FakeProvisioner {
        async fn ensure(&self, source: &ModelSource) -> Result<PathBuf, ProvisionError> {
            if self.fail {
                Err(ProvisionError::Fetch {
                    url: source.url.clone(),
                    reason: "connection refused".to_string(),
                })
            } else {
                Ok(source.path.clone())
            }
        }
    }

    #[derive(Default)]
    struct FakeRunner {
        called: AtomicBool,
    }

    #[async_trait]
    impl ProbeRunnerPort for FakeRunner {
        async fn environment(&self) -> CapabilityReport {
            CapabilityReport {
                gpu_device_nodes: vec![],
                driver_tools: BTreeMap::new(),
                graphics_context: ContextInitResult::failed("no EGL"),
                environment: BTreeMap::new(),
            }
        }

        async fn run_delegates(
            &self,
            model_path: &Path,
            _input: &BenchmarkInput,
        ) -> InferenceResults {
            self.called.store(true, Ordering::SeqCst);
            InferenceResults {
                cpu: DelegateOutcome::success(
                    Backend::Cpu,
                    Measurement::latency(Duration::from_millis(1), model_path.display().to_string()),
                ),
                gpu: DelegateOutcome::failure(Backend::Gpu, "no GPU"),
            }
        }
    }

    fn source() -> ModelSource {
        ModelSource::new("/models/test.onnx", "http://127.0.0.1:1/test.onnx")
    }

    fn input() -> BenchmarkInput {
        BenchmarkInput::SyntheticFrame {
            width: 4,
            height: 4,
        }
    }

    #[tokio::test]
    async fn test_run_all_uses_provisioned_path() {
        let runner = Arc::new(FakeRunner::default());
        let service = ProbeService::new(Arc::new(FakeProvisioner { fail: false }), runner.clone());

        let report = service.run_all(&source(), &input()).await.unwrap();

        assert!(runner.called.load(Ordering::SeqCst));
        assert!(report.inference.cpu.is_success());
        assert_eq!(report.inference.gpu.error(), Some("no GPU"));
        assert!(!report.environment.graphics_context.ok);
    }

    #[tokio::test]
    async fn test_provision_failure_skips_benchmarks() {
        let runner = Arc::new(FakeRunner::default());
        let service = ProbeService::new(Arc::new(FakeProvisioner { fail: true }), runner.clone());

        let err = service.run_all(&source(), &input()).await.unwrap_err();

        assert!(matches!(err, CoreError::Provision(ProvisionError::Fetch { .. })));
        assert!(!runner.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_environment_needs_no_model() {
        let runner = Arc::new(FakeRunner::default());
        let service = ProbeService::new(Arc::new(FakeProvisioner { fail: true }), runner.clone());

        let report = service.environment().await;

        assert!(report.gpu_device_nodes.is_empty());
        assert!(!runner.called.load(Ordering::SeqCst));
    }
}
