use std::path::Path;
use std::time::Instant;

use gpuprobe_core::{Backend, Measurement, PipelineFactory, StreamOpener};
use tracing::debug;

use super::BenchmarkError;

/// Run one inference per frame of the video at `video`, to exhaustion.
///
/// The clock starts once the stream is open. The frame source is dropped on
/// every exit path, and an error part-way through discards the frame count.
pub fn measure_stream(
    factory: &dyn PipelineFactory,
    streams: &dyn StreamOpener,
    backend: Backend,
    model_path: &Path,
    video: &Path,
) -> Result<Measurement, BenchmarkError> {
    let mut pipeline = factory.create(backend, model_path)?;
    let mut source = streams.open(video)?;
    debug!(%backend, video = %video.display(), "Streaming frames");

    let start = Instant::now();
    let mut frames: u64 = 0;
    while let Some(frame) = source.next_frame()? {
        let frame = frame.into_rgb();
        pipeline.infer(&frame)?;
        frames += 1;
    }
    let elapsed = start.elapsed();
    drop(source);

    debug!(%backend, frames, "Stream exhausted");
    Ok(Measurement::throughput(elapsed, frames))
}
