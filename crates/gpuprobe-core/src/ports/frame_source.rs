//! Video frame source port.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::Frame;

/// Errors from opening or reading a frame stream.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("failed to open video: {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    #[error("failed to decode frame: {0}")]
    Decode(String),
}

/// A finite sequence of decoded frames.
///
/// Dropping the source releases any underlying decoder resources.
pub trait FrameSource: Send {
    /// Next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>, StreamError>;
}

/// Opens frame sources by path.
pub trait StreamOpener: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn FrameSource>, StreamError>;
}
