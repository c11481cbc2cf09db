//! Probe and benchmark handlers.

use std::path::PathBuf;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use gpuprobe_core::{BenchmarkInput, CapabilityReport, ProbeReport};
use serde::Deserialize;
use tracing::info;

use crate::error::HttpError;
use crate::state::AppState;

/// Optional body of `POST /run`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunRequest {
    /// Decode this video and measure throughput instead of one frame.
    #[serde(default)]
    pub video_path: Option<PathBuf>,
}

impl RunRequest {
    /// An empty body selects the single-frame probe.
    pub fn parse(body: &[u8]) -> Result<Self, HttpError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| HttpError::BadRequest(format!("invalid run request: {e}")))
    }
}

/// Provision the model, then probe and benchmark both delegates.
pub async fn run(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProbeReport>, HttpError> {
    let request = RunRequest::parse(&body)?;
    let benchmark = &state.harness.benchmark;
    let input = BenchmarkInput::from_video(
        request.video_path,
        benchmark.frame_width,
        benchmark.frame_height,
    );

    let _guard = state.lock_run().await;
    info!(stream = input.is_stream(), "Starting probe run");
    let report = state.service.run_all(&state.harness.model, &input).await?;
    Ok(Json(report))
}

/// Capability report only. Needs no model.
pub async fn environment(State(state): State<AppState>) -> Json<CapabilityReport> {
    Json(state.service.environment().await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_single_frame() {
        assert!(RunRequest::parse(b"").unwrap().video_path.is_none());
        assert!(RunRequest::parse(b"  \n").unwrap().video_path.is_none());
        assert!(RunRequest::parse(b"{}").unwrap().video_path.is_none());
    }

    #[test]
    fn test_video_path_is_read() {
        let request = RunRequest::parse(br#"{"video_path": "/data/sample.mp4"}"#).unwrap();
        assert_eq!(request.video_path, Some(PathBuf::from("/data/sample.mp4")));
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        assert!(matches!(
            RunRequest::parse(b"{not json"),
            Err(HttpError::BadRequest(_))
        ));
        assert!(matches!(
            RunRequest::parse(br#"{"video": "x"}"#),
            Err(HttpError::BadRequest(_))
        ));
    }
}
