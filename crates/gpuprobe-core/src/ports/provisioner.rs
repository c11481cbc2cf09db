//! Model provisioning port.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ModelSource;

/// Errors making the model artifact available locally.
///
/// Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("failed to create directory {}: {reason}", path.display())]
    CreateDir { path: PathBuf, reason: String },

    /// Network failure, bad URL or non-success HTTP status.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    #[error("integrity check failed for {}: expected sha256 {expected}, got {actual}", path.display())]
    IntegrityMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// The target path has no file name to write to.
    #[error("invalid model path: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Idempotent fetch-if-absent of the model artifact.
#[async_trait]
pub trait ModelProvisionerPort: Send + Sync {
    /// Return `source.path`, downloading it from `source.url` first if absent.
    ///
    /// An existing file is returned as-is without touching the network.
    async fn ensure(&self, source: &ModelSource) -> Result<PathBuf, ProvisionError>;
}
