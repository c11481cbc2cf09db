//! Report rendering.
//!
//! JSON mirrors the serialized data model with two-space indentation; text is
//! a colored summary for terminals.

pub mod text;

use clap::ValueEnum;
use gpuprobe_core::{CapabilityReport, InferenceResults, ProbeReport};

use crate::error::CliError;

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable summary
    Text,
}

pub fn render_report(report: &ProbeReport, format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Text => text::report(report),
    })
}

pub fn render_inference(
    results: &InferenceResults,
    format: OutputFormat,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(results)?,
        OutputFormat::Text => text::inference(results),
    })
}

pub fn render_environment(
    report: &CapabilityReport,
    format: OutputFormat,
) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Text => text::environment(report),
    })
}
