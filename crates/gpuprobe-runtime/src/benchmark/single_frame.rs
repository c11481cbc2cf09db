use std::path::Path;
use std::time::Instant;

use gpuprobe_core::{Backend, Frame, Measurement, PipelineFactory};
use tracing::debug;

use super::BenchmarkError;

/// Build a pipeline and time one inference on an all-black frame.
///
/// Only the inference call is timed; pipeline construction is not.
pub fn measure_latency(
    factory: &dyn PipelineFactory,
    backend: Backend,
    model_path: &Path,
    width: u32,
    height: u32,
) -> Result<Measurement, BenchmarkError> {
    let mut pipeline = factory.create(backend, model_path)?;
    let frame = Frame::blank(width, height);
    debug!(%backend, width, height, "Running single-frame inference");

    let start = Instant::now();
    let result_type = pipeline.infer(&frame)?;
    let elapsed = start.elapsed();

    Ok(Measurement::latency(elapsed, result_type))
}
