//! ONNX Runtime inference pipelines.
//!
//! The CPU backend registers the CPU execution provider; the GPU backend
//! registers CUDA. Both are registered with `error_on_failure`, so a GPU
//! request on a host without CUDA fails construction instead of quietly
//! running on the CPU.

mod preprocess;

use std::path::Path;

use gpuprobe_core::{Backend, Frame, InferencePipeline, PipelineError, PipelineFactory};
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
use ort::session::Session;
use ort::value::Tensor;
use tracing::debug;

pub use preprocess::to_nchw;

/// Model input geometry and session options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrtPipelineConfig {
    pub input_width: u32,
    pub input_height: u32,
    /// Intra-op thread count; ONNX Runtime picks when unset.
    pub intra_threads: Option<usize>,
}

impl Default for OrtPipelineConfig {
    fn default() -> Self {
        Self {
            input_width: 224,
            input_height: 224,
            intra_threads: None,
        }
    }
}

/// Builds ONNX Runtime sessions bound to one backend.
#[derive(Debug, Clone, Default)]
pub struct OrtPipelineFactory {
    config: OrtPipelineConfig,
}

impl OrtPipelineFactory {
    pub const fn new(config: OrtPipelineConfig) -> Self {
        Self { config }
    }
}

fn construction(backend: Backend) -> impl Fn(String) -> PipelineError {
    move |reason| PipelineError::Construction { backend, reason }
}

impl PipelineFactory for OrtPipelineFactory {
    fn create(
        &self,
        backend: Backend,
        model_path: &Path,
    ) -> Result<Box<dyn InferencePipeline>, PipelineError> {
        let fail = construction(backend);
        let provider = match backend {
            Backend::Cpu => CPUExecutionProvider::default().build(),
            Backend::Gpu => CUDAExecutionProvider::default().build(),
        }
        .error_on_failure();

        let mut builder = Session::builder()
            .map_err(|e| fail(e.to_string()))?
            .with_execution_providers([provider])
            .map_err(|e| fail(e.to_string()))?;
        if let Some(threads) = self.config.intra_threads {
            builder = builder
                .with_intra_threads(threads)
                .map_err(|e| fail(e.to_string()))?;
        }
        let session = builder
            .commit_from_file(model_path)
            .map_err(|e| fail(e.to_string()))?;

        debug!(%backend, model = %model_path.display(), "ONNX Runtime session ready");
        Ok(Box::new(OrtPipeline {
            session,
            width: self.config.input_width,
            height: self.config.input_height,
        }))
    }
}

struct OrtPipeline {
    session: Session,
    width: u32,
    height: u32,
}

impl InferencePipeline for OrtPipeline {
    fn infer(&mut self, frame: &Frame) -> Result<String, PipelineError> {
        let data = to_nchw(frame, self.width, self.height);
        let shape = [1_usize, 3, self.height as usize, self.width as usize];
        let input =
            Tensor::from_array((shape, data)).map_err(|e| PipelineError::Input(e.to_string()))?;

        let outputs = self
            .session
            .run(ort::inputs![input])
            .map_err(|e| PipelineError::Inference(e.to_string()))?;

        let count = outputs.len();
        let first = outputs.iter().next().map(|(name, value)| {
            match value.try_extract_tensor::<f32>() {
                Ok((shape, _)) => {
                    let dims: Vec<String> = shape.iter().map(ToString::to_string).collect();
                    format!("{name} f32[{}]", dims.join(", "))
                }
                Err(_) => format!("{name} (non-f32)"),
            }
        });

        Ok(match first {
            Some(first) => format!("{count} outputs; {first}"),
            None => format!("{count} outputs"),
        })
    }
}
