//! Environment capability probe port.

use async_trait::async_trait;

use crate::domain::CapabilityReport;

/// Read-only host inspection.
///
/// Infallible: every sub-check that fails is recorded as a negative finding
/// inside the report.
#[async_trait]
pub trait CapabilityProbePort: Send + Sync {
    async fn probe(&self) -> CapabilityReport;
}
