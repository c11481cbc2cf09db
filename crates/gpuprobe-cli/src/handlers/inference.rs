use tracing::info;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{self, OutputFormat};

/// Provision, then one synthetic frame per delegate. No environment section.
pub async fn render(ctx: &CliContext, format: OutputFormat) -> Result<String, CliError> {
    let input = ctx.benchmark_input(None);
    info!(model = %ctx.model().path.display(), "Running single-frame inference");
    let results = ctx.service().run_delegates(ctx.model(), &input).await?;
    presentation::render_inference(&results, format)
}

pub async fn execute(ctx: &CliContext, format: OutputFormat) -> Result<(), CliError> {
    println!("{}", render(ctx, format).await?);
    Ok(())
}
