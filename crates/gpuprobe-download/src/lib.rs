//! HTTP model provisioning for gpuprobe.
//!
//! [`HttpModelProvisioner`] implements `ModelProvisionerPort`: an existing
//! model file is returned untouched, otherwise the artifact is streamed from
//! its URL into `<path>.part`, optionally checked against a SHA-256 digest,
//! and renamed into place.

mod progress;
mod provisioner;

pub use provisioner::{HttpModelProvisioner, partial_path};

// Re-export the port and its error for adapter convenience.
pub use gpuprobe_core::ports::{ModelProvisionerPort, ProvisionError};
