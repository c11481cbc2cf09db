use std::path::PathBuf;

use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{self, OutputFormat};

/// Provision, then decode `video` to the end on each delegate.
pub async fn render(
    ctx: &CliContext,
    video: PathBuf,
    format: OutputFormat,
) -> Result<String, CliError> {
    info!(video = %video.display(), "Running stream benchmark");
    let input = ctx.benchmark_input(Some(video));
    let results = ctx.service().run_delegates(ctx.model(), &input).await?;
    presentation::render_inference(&results, format)
}

pub async fn execute(
    ctx: &CliContext,
    video: PathBuf,
    format: OutputFormat,
) -> Result<(), CliError> {
    println!("{}", render(ctx, video, format).await?);
    Ok(())
}
