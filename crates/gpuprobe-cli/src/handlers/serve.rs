use gpuprobe_axum::{ServerConfig, start_server};
use tracing::info;

use crate::bootstrap::CliConfig;
use crate::error::CliError;

/// Serve probe runs over HTTP until the server stops.
pub async fn execute(
    config: CliConfig,
    host: String,
    port: u16,
    cors_origins: Vec<String>,
) -> Result<(), CliError> {
    let mut server = ServerConfig::default()
        .with_harness(config.harness)
        .with_address(host, port);
    if !cors_origins.is_empty() {
        server = server.with_allowed_origins(cors_origins);
    }
    info!(address = %server.bind_address(), "Starting HTTP handler");

    start_server(server)
        .await
        .map_err(|e: anyhow::Error| CliError::Server(format!("{e:#}")))
}
