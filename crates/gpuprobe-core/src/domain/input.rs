//! What a delegate benchmark is fed.

use std::path::PathBuf;

/// Input shape for one benchmark attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchmarkInput {
    /// A single all-black frame; measures one-shot latency.
    SyntheticFrame { width: u32, height: u32 },
    /// A video file decoded to exhaustion; measures throughput.
    Stream(PathBuf),
}

impl BenchmarkInput {
    /// Stream input when a video path is given, synthetic frame otherwise.
    pub fn from_video(video: Option<PathBuf>, width: u32, height: u32) -> Self {
        video.map_or(Self::SyntheticFrame { width, height }, Self::Stream)
    }

    pub const fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }
}
