//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use gpuprobe_core::{CoreError, ProvisionError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The model could not be downloaded or failed verification.
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report could not be rendered.
    #[error("Output error: {0}")]
    Output(String),

    /// The HTTP server stopped with an error.
    #[error("Server error: {0}")]
    Server(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where a category fits.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Output(_) => 70, // EX_SOFTWARE
            Self::Server(_) => 71, // EX_OSERR
            Self::Io(_) => 74,     // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

impl From<ProvisionError> for CliError {
    fn from(err: ProvisionError) -> Self {
        match err {
            ProvisionError::Fetch { .. } | ProvisionError::IntegrityMismatch { .. } => {
                Self::Unavailable(err.to_string())
            }
            ProvisionError::CreateDir { .. } | ProvisionError::Write { .. } => {
                Self::Io(err.to_string())
            }
            ProvisionError::InvalidPath(_) => Self::Config(err.to_string()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Provision(e) => e.into(),
            CoreError::Configuration(msg) => Self::Config(msg),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Output(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_provision_errors_map_to_exit_codes() {
        let fetch: CliError = CoreError::Provision(ProvisionError::Fetch {
            url: "http://127.0.0.1:1/m.onnx".to_string(),
            reason: "connection refused".to_string(),
        })
        .into();
        assert_eq!(fetch.exit_code(), 69);
        assert!(fetch.to_string().contains("connection refused"));

        let write: CliError = ProvisionError::Write {
            path: PathBuf::from("/models/m.onnx"),
            reason: "read-only file system".to_string(),
        }
        .into();
        assert_eq!(write.exit_code(), 74);

        let invalid: CliError = ProvisionError::InvalidPath(PathBuf::from("/")).into();
        assert_eq!(invalid.exit_code(), 78);
    }

    #[test]
    fn test_configuration_error_is_config() {
        let err: CliError = CoreError::Configuration("bad".to_string()).into();
        assert_eq!(err.exit_code(), 78);
    }
}
