//! The merged probe report.

use serde::Serialize;

use super::{Backend, CapabilityReport, DelegateOutcome};

/// Outcomes for both backends. Both are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceResults {
    pub cpu: DelegateOutcome,
    pub gpu: DelegateOutcome,
}

impl InferenceResults {
    pub const fn get(&self, backend: Backend) -> &DelegateOutcome {
        match backend {
            Backend::Cpu => &self.cpu,
            Backend::Gpu => &self.gpu,
        }
    }

    /// Outcomes in benchmark order.
    pub fn iter(&self) -> impl Iterator<Item = &DelegateOutcome> {
        [&self.cpu, &self.gpu].into_iter()
    }
}

/// Environment findings merged with per-backend inference outcomes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeReport {
    pub environment: CapabilityReport,
    pub inference: InferenceResults,
}

impl ProbeReport {
    /// Two-space indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use super::*;
    use crate::domain::{ContextInitResult, Measurement};

    fn report() -> ProbeReport {
        ProbeReport {
            environment: CapabilityReport {
                gpu_device_nodes: vec![],
                driver_tools: BTreeMap::new(),
                graphics_context: ContextInitResult::failed("libEGL.so.1: not found"),
                environment: BTreeMap::new(),
            },
            inference: InferenceResults {
                cpu: DelegateOutcome::success(
                    Backend::Cpu,
                    Measurement::latency(Duration::from_millis(3), "1 outputs"),
                ),
                gpu: DelegateOutcome::failure(Backend::Gpu, "CUDA unavailable"),
            },
        }
    }

    #[test]
    fn test_json_has_stable_top_level_keys() {
        let json = report().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["environment"]["gpu_device_nodes"].is_array());
        assert!(value["environment"]["driver_tools"].is_object());
        assert_eq!(value["environment"]["graphics_context"]["ok"], false);
        assert_eq!(value["inference"]["cpu"]["status"], "success");
        assert_eq!(value["inference"]["gpu"]["status"], "failure");
        assert!(json.contains("\n  \"environment\""));
    }

    #[test]
    fn test_get_and_iter_follow_backend_order() {
        let report = report();
        let backends: Vec<_> = report.inference.iter().map(|o| o.backend).collect();
        assert_eq!(backends, Backend::ALL.to_vec());
        assert!(report.inference.get(Backend::Cpu).is_success());
        assert!(!report.inference.get(Backend::Gpu).is_success());
    }
}
