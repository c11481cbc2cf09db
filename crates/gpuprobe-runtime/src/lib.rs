//! Active probing and benchmarking for gpuprobe.
//!
//! This crate implements the core ports against the real host:
//!
//! - [`DefaultCapabilityProbe`]: device nodes, diagnostic tools, EGL and the
//!   environment allow-list
//! - [`DelegateBenchmark`]: one backend, one pipeline, isolated on a blocking
//!   thread so that panics become failure outcomes
//! - [`DualBackendRunner`]: the probe plus CPU then GPU benchmarks
//! - [`OrtPipelineFactory`]: ONNX Runtime pipelines
//! - [`FfmpegStreamOpener`]: video decoding through `ffmpeg`

#![deny(unsafe_code)]

pub mod benchmark;
pub mod onnx;
mod panic;
mod runner;
pub mod system;
pub mod video;

pub use benchmark::{BenchmarkError, DelegateBenchmark};
pub use onnx::{OrtPipelineConfig, OrtPipelineFactory};
pub use runner::DualBackendRunner;
pub use system::{DefaultCapabilityProbe, EnvLookup, best_effort};
pub use video::FfmpegStreamOpener;
