//! Core domain types, ports and services for gpuprobe.
//!
//! gpuprobe answers one question on an arbitrary host: can a vision model run
//! on the GPU delegate here, and how does it compare with the CPU delegate?
//!
//! This crate is pure. It owns:
//!
//! - the report data model ([`domain`]): capability findings, per-backend
//!   outcomes and the merged [`ProbeReport`]
//! - the port traits ([`ports`]) that runtime adapters implement: capability
//!   probing, pipeline construction, frame streams, model provisioning and the
//!   dual-backend runner
//! - the explicit configuration structs ([`config`]) with documented defaults
//! - [`ProbeService`], which sequences provisioning before probing
//!
//! Active probing (commands, device nodes, EGL, ONNX Runtime, ffmpeg) lives in
//! `gpuprobe-runtime`; HTTP model retrieval lives in `gpuprobe-download`.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

pub use config::{
    BenchmarkConfig, DevicePattern, DiagnosticTool, HarnessConfig, ModelSource, ProbeConfig,
};
pub use domain::{
    Backend, BenchmarkInput, CapabilityReport, ContextInitResult, DelegateOutcome, Frame,
    FrameError, InferenceResults, Measurement, MeasurementDetail, Outcome, PixelLayout,
    ProbeReport, Throughput, ToolResult,
};
pub use ports::{
    CapabilityProbePort, CoreError, FrameSource, InferencePipeline, ModelProvisionerPort,
    PipelineError, PipelineFactory, ProbeRunnerPort, ProvisionError, StreamError, StreamOpener,
};
pub use services::ProbeService;
