//! Per-backend delegate benchmarks.
//!
//! A benchmark never fails past its boundary. Construction errors,
//! inference errors, stream errors and panics all become a failure
//! [`DelegateOutcome`] for that backend alone.

mod single_frame;
mod stream;

use std::path::Path;
use std::sync::Arc;

use gpuprobe_core::{
    Backend, BenchmarkInput, DelegateOutcome, Measurement, PipelineError, PipelineFactory,
    StreamError, StreamOpener,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::panic::panic_message;

pub use single_frame::measure_latency;
pub use stream::measure_stream;

/// Failure inside a single benchmark attempt.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Runs one backend against one input on a blocking thread.
#[derive(Clone)]
pub struct DelegateBenchmark {
    factory: Arc<dyn PipelineFactory>,
    streams: Arc<dyn StreamOpener>,
}

impl DelegateBenchmark {
    pub fn new(factory: Arc<dyn PipelineFactory>, streams: Arc<dyn StreamOpener>) -> Self {
        Self { factory, streams }
    }

    /// Benchmark `backend`. Always returns a well-formed outcome.
    pub async fn run(
        &self,
        backend: Backend,
        model_path: &Path,
        input: &BenchmarkInput,
    ) -> DelegateOutcome {
        let factory = Arc::clone(&self.factory);
        let streams = Arc::clone(&self.streams);
        let model_path = model_path.to_path_buf();
        let input = input.clone();

        let joined = tokio::task::spawn_blocking(move || {
            measure(factory.as_ref(), streams.as_ref(), backend, &model_path, &input)
        })
        .await;

        let outcome = match joined {
            Ok(Ok(measurement)) => DelegateOutcome::success(backend, measurement),
            Ok(Err(e)) => DelegateOutcome::failure(backend, e.to_string()),
            Err(e) if e.is_panic() => DelegateOutcome::failure(
                backend,
                format!("{backend} delegate panicked: {}", panic_message(&*e.into_panic())),
            ),
            Err(e) => DelegateOutcome::failure(backend, format!("{backend} delegate task failed: {e}")),
        };

        match (outcome.elapsed_ms(), outcome.error()) {
            (Some(elapsed_ms), _) => info!(%backend, elapsed_ms, "Delegate benchmark succeeded"),
            (None, error) => warn!(%backend, error = error.unwrap_or_default(), "Delegate benchmark failed"),
        }
        outcome
    }
}

fn measure(
    factory: &dyn PipelineFactory,
    streams: &dyn StreamOpener,
    backend: Backend,
    model_path: &Path,
    input: &BenchmarkInput,
) -> Result<Measurement, BenchmarkError> {
    match input {
        BenchmarkInput::SyntheticFrame { width, height } => {
            measure_latency(factory, backend, model_path, *width, *height)
        }
        BenchmarkInput::Stream(path) => measure_stream(factory, streams, backend, model_path, path),
    }
}


#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use gpuprobe_core::Outcome;

    use super::fakes::{Behavior, FakeFactory, FakeStreams};
    use super::*;

    fn synthetic() -> BenchmarkInput {
        BenchmarkInput::SyntheticFrame {
            width: 256,
            height: 256,
        }
    }

    fn bench(cpu: Behavior, gpu: Behavior, streams: FakeStreams) -> DelegateBenchmark {
        DelegateBenchmark::new(Arc::new(FakeFactory::new(cpu, gpu)), Arc::new(streams))
    }

    #[tokio::test]
    async fn test_single_frame_success() {
        let bench = bench(Behavior::Works, Behavior::Works, FakeStreams::new(0));
        let outcome = bench
            .run(Backend::Cpu, Path::new("/models/m.onnx"), &synthetic())
            .await;

        assert_eq!(outcome.backend, Backend::Cpu);
        match outcome.outcome {
            Outcome::Success(m) => {
                assert!(m.elapsed_ms >= 0.0);
                assert_eq!(
                    m.detail,
                    gpuprobe_core::MeasurementDetail::Latency {
                        result_type: "1 outputs; 256x256".to_string()
                    }
                );
            }
            Outcome::Failure { error } => panic!("unexpected failure: {error}"),
        }
    }

    #[tokio::test]
    async fn test_construction_failure_is_outcome() {
        let bench = bench(Behavior::Works, Behavior::FailsToBuild, FakeStreams::new(0));
        let outcome = bench
            .run(Backend::Gpu, Path::new("/models/m.onnx"), &synthetic())
            .await;

        assert_eq!(outcome.backend, Backend::Gpu);
        let error = outcome.error().unwrap();
        assert!(error.contains("failed to create gpu pipeline"), "{error}");
    }

    #[tokio::test]
    async fn test_panic_is_contained() {
        let bench = bench(Behavior::Panics, Behavior::Works, FakeStreams::new(0));
        let outcome = bench
            .run(Backend::Cpu, Path::new("/models/m.onnx"), &synthetic())
            .await;

        let error = outcome.error().unwrap();
        assert!(error.contains("panicked"), "{error}");
        assert!(error.contains("delegate crashed"), "{error}");
    }

    #[tokio::test]
    async fn test_inference_failure_is_outcome() {
        let bench = bench(Behavior::FailsToInfer, Behavior::Works, FakeStreams::new(0));
        let outcome = bench
            .run(Backend::Cpu, Path::new("/models/m.onnx"), &synthetic())
            .await;

        assert_eq!(outcome.error(), Some("inference failed: tensor shape mismatch"));
    }

    #[tokio::test]
    async fn test_stream_counts_frames_and_releases() {
        let streams = FakeStreams::new(5);
        let released = Arc::clone(&streams.released);
        let factory = Arc::new(FakeFactory::new(Behavior::Works, Behavior::Works));
        let bench = DelegateBenchmark::new(factory.clone(), Arc::new(streams));

        let outcome = bench
            .run(
                Backend::Gpu,
                Path::new("/models/m.onnx"),
                &BenchmarkInput::Stream("/data/sample.mp4".into()),
            )
            .await;

        let throughput = outcome.throughput().copied().unwrap();
        assert_eq!(throughput.frames, 5);
        assert!(throughput.seconds >= 0.0);
        assert!(released.load(Ordering::SeqCst));

        let layouts = factory.seen_layouts.lock().unwrap();
        assert_eq!(layouts.len(), 5);
        assert!(layouts.iter().all(|&l| l == gpuprobe_core::PixelLayout::Rgb));
    }

    #[tokio::test]
    async fn test_stream_open_failure_names_path() {
        let bench = bench(Behavior::Works, Behavior::Works, FakeStreams::new(3));
        let outcome = bench
            .run(
                Backend::Cpu,
                Path::new("/models/m.onnx"),
                &BenchmarkInput::Stream("/nonexistent.mp4".into()),
            )
            .await;

        let error = outcome.error().unwrap();
        assert!(error.starts_with("failed to open video: /nonexistent.mp4"), "{error}");
    }

    #[tokio::test]
    async fn test_mid_stream_error_is_not_partial_success() {
        let streams = FakeStreams::failing_at(10, 4);
        let released = Arc::clone(&streams.released);
        let bench = DelegateBenchmark::new(
            Arc::new(FakeFactory::new(Behavior::Works, Behavior::Works)),
            Arc::new(streams),
        );

        let outcome = bench
            .run(
                Backend::Cpu,
                Path::new("/models/m.onnx"),
                &BenchmarkInput::Stream("/data/sample.mp4".into()),
            )
            .await;

        assert!(!outcome.is_success());
        assert!(outcome.error().unwrap().contains("corrupt packet"));
        assert!(released.load(Ordering::SeqCst));
    }
}
