//! Subcommand definitions.

use std::path::PathBuf;

use clap::Subcommand;
use gpuprobe_core::config::DEFAULT_VIDEO_PATH;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe the environment and run one frame through each delegate
    Probe {
        /// Decode this video and report throughput instead of latency
        #[arg(long)]
        video: Option<PathBuf>,
    },
    /// Run one frame through each delegate without the environment probe
    Inference {
        /// Model path, overriding --model-path
        model: Option<PathBuf>,
    },
    /// Measure video throughput on each delegate
    Benchmark {
        /// Video file to decode
        #[arg(long, env = "VIDEO_PATH", default_value = DEFAULT_VIDEO_PATH)]
        video: PathBuf,
        /// Model path for this benchmark, overriding --model-path
        #[arg(long = "benchmark-model-path", env = "BENCHMARK_MODEL_PATH")]
        model_path: Option<PathBuf>,
        /// Model URL for this benchmark, overriding --model-url
        #[arg(long = "benchmark-model-url", env = "BENCHMARK_MODEL_URL")]
        model_url: Option<String>,
    },
    /// Report GPU device nodes, driver tools, EGL and environment only
    Environment,
    /// Serve probe runs over HTTP
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
        /// Interface to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Allowed CORS origin; repeat for several. Any origin when omitted
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },
}
