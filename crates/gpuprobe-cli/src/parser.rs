//! Main CLI parser and top-level argument handling.
//!
//! Global options resolve flag, then environment variable, then the
//! documented default.

use std::path::PathBuf;

use clap::{Args, Parser};
use gpuprobe_core::config::{DEFAULT_MODEL_PATH, DEFAULT_MODEL_URL};

use crate::commands::Commands;
use crate::presentation::OutputFormat;

/// Command-line interface for the GPU delegate probe.
#[derive(Parser)]
#[command(name = "gpuprobe")]
#[command(about = "Probe GPU inference capability and compare CPU and GPU delegates")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// Timeout in seconds for each external diagnostic tool
    #[arg(
        long = "tool-timeout",
        env = "GPUPROBE_TOOL_TIMEOUT",
        default_value_t = 10,
        global = true
    )]
    pub tool_timeout: u64,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the model lives and where to fetch it from.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Local model path; downloaded there when absent
    #[arg(long = "model-path", env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH, global = true)]
    pub model_path: PathBuf,

    /// URL the model is fetched from when missing
    #[arg(long = "model-url", env = "MODEL_URL", default_value = DEFAULT_MODEL_URL, global = true)]
    pub model_url: String,

    /// Expected SHA-256 of a freshly downloaded model
    #[arg(long = "model-sha256", env = "MODEL_SHA256", global = true)]
    pub model_sha256: Option<String>,
}
