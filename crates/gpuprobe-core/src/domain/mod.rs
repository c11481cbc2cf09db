//! Domain types for probe reports.
//!
//! Everything in here is plain data: no I/O, no probing. The serialized shape
//! of [`ProbeReport`] is a stable contract, since downstream tooling compares
//! `inference.cpu` against `inference.gpu` by field name.

mod backend;
mod capability;
mod frame;
mod input;
mod outcome;
mod report;

pub use backend::Backend;
pub use capability::{CapabilityReport, ContextInitResult, ToolResult};
pub use frame::{Frame, FrameError, PixelLayout};
pub use input::BenchmarkInput;
pub use outcome::{DelegateOutcome, Measurement, MeasurementDetail, Outcome, Throughput};
pub use report::{InferenceResults, ProbeReport};
