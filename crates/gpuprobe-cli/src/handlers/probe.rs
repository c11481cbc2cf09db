use std::path::PathBuf;

use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{self, OutputFormat};

/// Provision, probe the environment and run both delegates.
pub async fn render(
    ctx: &CliContext,
    video: Option<PathBuf>,
    format: OutputFormat,
) -> Result<String, CliError> {
    let input = ctx.benchmark_input(video);
    info!(stream = input.is_stream(), "Running full probe");
    let report = ctx.service().run_all(ctx.model(), &input).await?;
    presentation::render_report(&report, format)
}

pub async fn execute(
    ctx: &CliContext,
    video: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), CliError> {
    println!("{}", render(ctx, video, format).await?);
    Ok(())
}
