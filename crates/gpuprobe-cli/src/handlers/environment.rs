use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{self, OutputFormat};

/// Capability report only. No model is provisioned.
pub async fn render(ctx: &CliContext, format: OutputFormat) -> Result<String, CliError> {
    let report = ctx.service().environment().await;
    presentation::render_environment(&report, format)
}

pub async fn execute(ctx: &CliContext, format: OutputFormat) -> Result<(), CliError> {
    println!("{}", render(ctx, format).await?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::fakes;

    #[tokio::test]
    async fn test_environment_skips_provisioning() {
        // The provisioner would fail; the environment command must not reach it.
        let ctx = fakes::context(true);
        let text = render(&ctx, OutputFormat::Text).await.unwrap();
        assert!(text.contains("nvidia-smi"), "{text}");
    }
}
