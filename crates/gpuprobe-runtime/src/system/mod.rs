//! Environment capability probe implementation.
//!
//! [`DefaultCapabilityProbe`] implements `CapabilityProbePort` from
//! gpuprobe-core by inspecting the live host: device nodes, diagnostic
//! tools, the EGL default display and an environment allow-list. Every
//! sub-check runs through [`best_effort`], so the probe itself never fails.

mod best_effort;
mod commands;
mod devices;
mod egl;
mod env;

use std::collections::BTreeMap;
use std::convert::Infallible;

use async_trait::async_trait;
use gpuprobe_core::{
    CapabilityProbePort, CapabilityReport, ContextInitResult, ProbeConfig, ToolResult,
};
use tracing::{debug, warn};

pub use best_effort::best_effort;
pub use commands::{ToolError, run_tool};
pub use devices::enumerate_device_nodes;
pub use egl::{EglError, probe_egl};
pub use env::{EnvLookup, capture_environment, process_env};

/// Default implementation of `CapabilityProbePort`.
///
/// Construct it in the adapter's bootstrap and hand it to the runner.
pub struct DefaultCapabilityProbe {
    config: ProbeConfig,
    env: EnvLookup,
}

impl DefaultCapabilityProbe {
    /// Probe reading the real process environment.
    pub fn new(config: ProbeConfig) -> Self {
        Self::with_env_lookup(config, process_env())
    }

    /// Probe with an injected environment lookup.
    pub fn with_env_lookup(config: ProbeConfig, env: EnvLookup) -> Self {
        Self { config, env }
    }

    async fn probe_tools(&self) -> BTreeMap<String, ToolResult> {
        let mut results = BTreeMap::new();
        for tool in &self.config.tools {
            let result = best_effort(&tool.program, || {
                run_tool(
                    tool,
                    self.config.tool_timeout,
                    &self.config.child_env_defaults,
                    self.env.as_ref(),
                )
            })
            .await;
            let result = match result {
                Ok(output) => ToolResult::ok(output),
                Err(error) => ToolResult::failed(error),
            };
            results.insert(tool.name.clone(), result);
        }
        results
    }
}

#[async_trait]
impl CapabilityProbePort for DefaultCapabilityProbe {
    async fn probe(&self) -> CapabilityReport {
        let gpu_device_nodes = best_effort("device enumeration", || async {
            Ok::<_, Infallible>(enumerate_device_nodes(&self.config.device_patterns).await)
        })
        .await
        .unwrap_or_else(|error| {
            warn!(%error, "Device enumeration failed");
            Vec::new()
        });

        let driver_tools = self.probe_tools().await;

        let graphics_context = match best_effort("EGL", || {
            probe_egl(self.config.egl_libraries.clone(), self.config.tool_timeout)
        })
        .await
        {
            Ok(version) => ContextInitResult::initialized(version),
            Err(error) => ContextInitResult::failed(error),
        };

        let environment = best_effort("environment capture", || async {
            Ok::<_, Infallible>(capture_environment(
                &self.config.env_allowlist,
                self.env.as_ref(),
            ))
        })
        .await
        .unwrap_or_default();

        debug!(
            devices = gpu_device_nodes.len(),
            egl_ok = graphics_context.ok,
            "Capability probe complete"
        );

        CapabilityReport {
            gpu_device_nodes,
            driver_tools,
            graphics_context,
            environment,
        }
    }
}
