//! Environment capability findings.
//!
//! Every type here has an explicit negative form. A probe that could not run
//! is recorded as `ok: false` with a description, never as a missing field.

use std::collections::BTreeMap;

use serde::Serialize;

/// Result of invoking one external diagnostic tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    /// The tool ran and exited successfully.
    pub ok: bool,
    /// Captured output on success, error description otherwise.
    pub output: String,
}

impl ToolResult {
    /// A tool that ran and exited zero.
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            ok: true,
            output: output.into(),
        }
    }

    /// A tool that was missing, exited nonzero or timed out.
    pub fn failed(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            output: description.into(),
        }
    }
}

/// Result of attempting to initialize a low-level graphics context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextInitResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContextInitResult {
    /// Context initialized; `version` is `"<major>.<minor>"`.
    pub fn initialized(version: impl Into<String>) -> Self {
        Self {
            ok: true,
            version: Some(version.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            version: None,
            error: Some(error.into()),
        }
    }
}

/// Structured evidence of what GPU hardware and software is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityReport {
    /// Device nodes matching the GPU patterns, sorted. Empty on GPU-less hosts.
    pub gpu_device_nodes: Vec<String>,
    /// Diagnostic tool results keyed by tool name.
    pub driver_tools: BTreeMap<String, ToolResult>,
    /// Outcome of the EGL default-display initialization attempt.
    pub graphics_context: ContextInitResult,
    /// Allow-listed environment variables that are set. Unset ones are omitted.
    pub environment: BTreeMap<String, String>,
}

impl CapabilityReport {
    /// True when at least one GPU device node was found.
    pub fn has_gpu_devices(&self) -> bool {
        !self.gpu_device_nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_result_omits_absent_fields() {
        let failed = serde_json::to_value(ContextInitResult::failed("no display")).unwrap();
        assert_eq!(failed, serde_json::json!({"ok": false, "error": "no display"}));

        let ok = serde_json::to_value(ContextInitResult::initialized("1.5")).unwrap();
        assert_eq!(ok, serde_json::json!({"ok": true, "version": "1.5"}));
    }

    #[test]
    fn test_report_without_device_nodes_has_no_gpu() {
        let mut tools = BTreeMap::new();
        tools.insert("eglinfo".to_string(), ToolResult::failed("not found"));
        tools.insert("nvidia_smi".to_string(), ToolResult::ok("GPU 0: Tesla T4"));
        let report = CapabilityReport {
            gpu_device_nodes: vec![],
            driver_tools: tools,
            graphics_context: ContextInitResult::failed("missing libEGL"),
            environment: BTreeMap::new(),
        };

        assert!(!report.has_gpu_devices());
        assert_eq!(
            serde_json::to_value(&report).unwrap()["driver_tools"]["eglinfo"],
            serde_json::json!({"ok": false, "output": "not found"})
        );
    }
}
