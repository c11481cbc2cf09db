//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the real adapters are wired together
//! for the HTTP handler.

use std::sync::Arc;

use anyhow::Result;
use gpuprobe_core::{HarnessConfig, ProbeService};
use gpuprobe_download::HttpModelProvisioner;
use gpuprobe_runtime::{
    DefaultCapabilityProbe, DelegateBenchmark, DualBackendRunner, FfmpegStreamOpener,
    OrtPipelineFactory,
};
use tokio::sync::{Mutex, MutexGuard};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Model, probe and benchmark settings used for every run.
    pub harness: HarnessConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            harness: HarnessConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn with_harness(mut self, harness: HarnessConfig) -> Self {
        self.harness = harness;
        self
    }

    #[must_use]
    pub fn with_address(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Provisioning plus probing, shared with the CLI.
    pub service: ProbeService,
    /// Settings applied to every request.
    pub harness: HarnessConfig,
    run_lock: Mutex<()>,
}

impl AxumContext {
    pub fn new(service: ProbeService, harness: HarnessConfig) -> Self {
        Self {
            service,
            harness,
            run_lock: Mutex::new(()),
        }
    }

    /// Held for the duration of a benchmark run.
    pub async fn lock_run(&self) -> MutexGuard<'_, ()> {
        self.run_lock.lock().await
    }
}

/// Wire the real probe, ONNX Runtime, ffmpeg and HTTP provisioner.
pub fn bootstrap(config: &ServerConfig) -> AxumContext {
    let probe = Arc::new(DefaultCapabilityProbe::new(config.harness.probe.clone()));
    let benchmark = DelegateBenchmark::new(
        Arc::new(OrtPipelineFactory::default()),
        Arc::new(FfmpegStreamOpener::default()),
    );
    let runner = Arc::new(DualBackendRunner::new(probe, benchmark));
    let provisioner = Arc::new(HttpModelProvisioner::new());

    tracing::info!(
        target: "gpuprobe.paths",
        model_path = %config.harness.model.path.display(),
        model_url = %config.harness.model.url,
        "Axum bootstrap resolved model source"
    );

    AxumContext::new(
        ProbeService::new(provisioner, runner),
        config.harness.clone(),
    )
}

/// Bootstrap and serve until the listener fails.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    config.harness.validate()?;
    let ctx = bootstrap(&config);
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("gpuprobe handler listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(
            config.with_address("127.0.0.1", 9000).bind_address(),
            "127.0.0.1:9000"
        );
    }
}
