//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Capability probe, ONNX Runtime factory and ffmpeg opener (via gpuprobe-runtime)
//! - HTTP model provisioner (via gpuprobe-download)
//! - `ProbeService` (via gpuprobe-core)
//!
//! Command handlers receive the composed [`CliContext`] and delegate to it.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use gpuprobe_core::{
    BenchmarkConfig, BenchmarkInput, HarnessConfig, ModelSource, ProbeConfig, ProbeService,
};
use gpuprobe_download::HttpModelProvisioner;
use gpuprobe_runtime::{
    DefaultCapabilityProbe, DelegateBenchmark, DualBackendRunner, FfmpegStreamOpener,
    OrtPipelineFactory,
};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Model, probe and benchmark settings.
    pub harness: HarnessConfig,
    /// Draw a download progress bar.
    pub show_progress: bool,
}

impl CliConfig {
    /// Resolve configuration from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.tool_timeout == 0 {
            return Err(CliError::Arguments(
                "--tool-timeout must be at least 1 second".to_string(),
            ));
        }

        let mut model = ModelSource::new(&cli.model.model_path, &cli.model.model_url);
        if let Some(digest) = &cli.model.model_sha256 {
            model = model.with_sha256(digest);
        }

        let harness = HarnessConfig {
            model,
            probe: ProbeConfig::default().with_tool_timeout(Duration::from_secs(cli.tool_timeout)),
            benchmark: BenchmarkConfig::default(),
        };
        harness.validate()?;

        Ok(Self {
            harness,
            show_progress: std::io::stderr().is_terminal(),
        })
    }

    /// Use a different local model file.
    #[must_use]
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.harness.model.path = path.into();
        self
    }

    /// Fetch the model from a different URL when it is missing.
    #[must_use]
    pub fn with_model_url(mut self, url: impl Into<String>) -> Self {
        self.harness.model.url = url.into();
        self
    }
}

/// Defaults from `defaults` that `lookup` reports unset, in order.
pub fn missing_env_defaults(
    defaults: &[(String, String)],
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<(String, String)> {
    defaults
        .iter()
        .filter(|(name, _)| lookup(name).is_none())
        .cloned()
        .collect()
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    service: ProbeService,
    harness: HarnessConfig,
}

impl CliContext {
    pub const fn new(service: ProbeService, harness: HarnessConfig) -> Self {
        Self { service, harness }
    }

    pub const fn service(&self) -> &ProbeService {
        &self.service
    }

    pub const fn harness(&self) -> &HarnessConfig {
        &self.harness
    }

    pub const fn model(&self) -> &ModelSource {
        &self.harness.model
    }

    /// Stream input for `video`, the configured synthetic frame otherwise.
    pub fn benchmark_input(&self, video: Option<PathBuf>) -> BenchmarkInput {
        BenchmarkInput::from_video(
            video,
            self.harness.benchmark.frame_width,
            self.harness.benchmark.frame_height,
        )
    }
}

/// Wire the real adapters.
pub fn bootstrap(config: CliConfig) -> CliContext {
    let probe = Arc::new(DefaultCapabilityProbe::new(config.harness.probe.clone()));
    let benchmark = DelegateBenchmark::new(
        Arc::new(OrtPipelineFactory::default()),
        Arc::new(FfmpegStreamOpener::default()),
    );
    let runner = Arc::new(DualBackendRunner::new(probe, benchmark));
    let provisioner = Arc::new(HttpModelProvisioner::new().with_progress(config.show_progress));

    CliContext::new(ProbeService::new(provisioner, runner), config.harness)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_from_cli_applies_overrides() {
        let cli = Cli::parse_from([
            "gpuprobe",
            "--tool-timeout",
            "4",
            "--model-path",
            "/tmp/m.onnx",
            "--model-url",
            "http://127.0.0.1:1/m.onnx",
            "--model-sha256",
            "ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789",
            "environment",
        ]);
        let config = CliConfig::from_cli(&cli).unwrap();

        assert_eq!(config.harness.probe.tool_timeout, Duration::from_secs(4));
        assert_eq!(config.harness.model.path, PathBuf::from("/tmp/m.onnx"));
        assert_eq!(config.harness.model.url, "http://127.0.0.1:1/m.onnx");
        assert_eq!(
            config.harness.model.sha256.as_deref(),
            Some("abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789")
        );
    }

    #[test]
    fn test_malformed_digest_is_configuration_error() {
        let cli = Cli::parse_from(["gpuprobe", "--model-sha256", "not-a-digest", "environment"]);
        let err = CliConfig::from_cli(&cli).unwrap_err();
        assert_eq!(err.exit_code(), 78);
        assert!(err.to_string().contains("sha256"), "{err}");
    }

    #[test]
    fn test_missing_env_defaults_skips_set_variables() {
        let defaults = vec![
            ("XDG_RUNTIME_DIR".to_string(), "/tmp".to_string()),
            ("GPUPROBE_EXAMPLE".to_string(), "1".to_string()),
        ];

        let missing = missing_env_defaults(&defaults, |name| {
            (name == "XDG_RUNTIME_DIR").then(|| "/run/user/1000".to_string())
        });
        assert_eq!(missing, vec![("GPUPROBE_EXAMPLE".to_string(), "1".to_string())]);

        assert_eq!(missing_env_defaults(&defaults, |_| None), defaults);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let cli = Cli::parse_from(["gpuprobe", "--tool-timeout", "0", "environment"]);
        let err = CliConfig::from_cli(&cli).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_with_model_path_overrides() {
        let cli = Cli::parse_from(["gpuprobe", "environment"]);
        let config = CliConfig::from_cli(&cli)
            .unwrap()
            .with_model_path("/srv/other.onnx")
            .with_model_url("https://models.example/other.onnx");
        assert_eq!(config.harness.model.path, PathBuf::from("/srv/other.onnx"));
        assert_eq!(config.harness.model.url, "https://models.example/other.onnx");
    }
}
