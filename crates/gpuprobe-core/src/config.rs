//! Explicit configuration for probe runs.
//!
//! Core functions never read environment variables or other global state;
//! the adapters resolve flags and env vars into these structs and pass them in.

use std::path::PathBuf;
use std::time::Duration;

use crate::ports::CoreError;

/// Default on-disk location of the single-frame model.
pub const DEFAULT_MODEL_PATH: &str = "/models/mobilenetv2-12.onnx";

/// Default source of the single-frame model.
pub const DEFAULT_MODEL_URL: &str = "https://github.com/onnx/models/raw/main/validated/vision/classification/mobilenet/model/mobilenetv2-12.onnx";

/// Default video used by the throughput benchmark.
pub const DEFAULT_VIDEO_PATH: &str = "/data/sample.mp4";

/// Upper bound on a single diagnostic tool invocation.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(10);

/// Edge length of the synthetic frame.
pub const DEFAULT_FRAME_SIZE: u32 = 256;

/// Environment variables worth recording in a capability report.
pub const GPU_ENV_ALLOWLIST: [&str; 4] = [
    "NVIDIA_VISIBLE_DEVICES",
    "NVIDIA_DRIVER_CAPABILITIES",
    "CUDA_VISIBLE_DEVICES",
    "XDG_RUNTIME_DIR",
];

/// A `dir/prefix*` device node pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevicePattern {
    pub dir: PathBuf,
    /// Entry-name prefix; empty matches every entry.
    pub prefix: String,
}

impl DevicePattern {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Parse a pattern of the form `/dev/nvidia*` or `/dev/dri/*`.
    ///
    /// Only a single trailing `*` is understood. A pattern without one
    /// matches the named entry exactly.
    pub fn parse(pattern: &str) -> Self {
        let stem = pattern.strip_suffix('*').unwrap_or(pattern);
        match stem.rfind('/') {
            Some(idx) => {
                let dir = if idx == 0 { "/" } else { &stem[..idx] };
                Self::new(dir, &stem[idx + 1..])
            }
            None => Self::new(".", stem),
        }
    }
}

/// An external diagnostic command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticTool {
    /// Key under which the result is reported.
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    /// Keep only the first N lines of output.
    pub max_lines: Option<usize>,
}

impl DiagnosticTool {
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            max_lines: None,
        }
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    /// `nvidia-smi -L`
    pub fn nvidia_smi() -> Self {
        Self::new("nvidia_smi", "nvidia-smi").with_args(["-L"])
    }

    /// `eglinfo`, first 50 lines.
    pub fn eglinfo() -> Self {
        Self::new("eglinfo", "eglinfo").with_max_lines(50)
    }
}

/// Settings for the environment capability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub device_patterns: Vec<DevicePattern>,
    pub tools: Vec<DiagnosticTool>,
    pub env_allowlist: Vec<String>,
    pub tool_timeout: Duration,
    /// Candidate EGL library names, tried in order.
    pub egl_libraries: Vec<String>,
    /// Variables set on diagnostic child processes when not already present.
    /// The CLI also applies them to its own process at startup so in-process
    /// EGL loading sees the same values.
    pub child_env_defaults: Vec<(String, String)>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            device_patterns: vec![
                DevicePattern::parse("/dev/nvidia*"),
                DevicePattern::parse("/dev/dri/*"),
            ],
            tools: vec![DiagnosticTool::nvidia_smi(), DiagnosticTool::eglinfo()],
            env_allowlist: GPU_ENV_ALLOWLIST.iter().map(ToString::to_string).collect(),
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
            egl_libraries: vec!["libEGL.so.1".to_string(), "libEGL.so".to_string()],
            child_env_defaults: vec![("XDG_RUNTIME_DIR".to_string(), "/tmp".to_string())],
        }
    }
}

impl ProbeConfig {
    #[must_use]
    pub const fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_tools(mut self, tools: Vec<DiagnosticTool>) -> Self {
        self.tools = tools;
        self
    }

    #[must_use]
    pub fn with_device_patterns(mut self, patterns: Vec<DevicePattern>) -> Self {
        self.device_patterns = patterns;
        self
    }

    #[must_use]
    pub fn with_egl_libraries(mut self, libraries: Vec<String>) -> Self {
        self.egl_libraries = libraries;
        self
    }
}

/// Settings for delegate benchmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkConfig {
    pub frame_width: u32,
    pub frame_height: u32,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            frame_width: DEFAULT_FRAME_SIZE,
            frame_height: DEFAULT_FRAME_SIZE,
        }
    }
}

/// Where the model lives and where to get it if it does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSource {
    pub path: PathBuf,
    pub url: String,
    /// Lowercase hex digest checked after a fresh download.
    pub sha256: Option<String>,
}

impl ModelSource {
    pub fn new(path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
            sha256: None,
        }
    }

    #[must_use]
    pub fn with_sha256(mut self, digest: impl Into<String>) -> Self {
        self.sha256 = Some(digest.into().to_ascii_lowercase());
        self
    }
}

impl Default for ModelSource {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_PATH, DEFAULT_MODEL_URL)
    }
}

/// Everything a wrapper needs to run a probe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessConfig {
    pub model: ModelSource,
    pub probe: ProbeConfig,
    pub benchmark: BenchmarkConfig,
}

impl HarnessConfig {
    /// Reject settings no run could succeed with.
    pub fn validate(&self) -> Result<(), CoreError> {
        let invalid = |msg: String| Err(CoreError::Configuration(msg));

        if !(self.model.url.starts_with("http://") || self.model.url.starts_with("https://")) {
            return invalid(format!("model URL must be http(s): {}", self.model.url));
        }
        if let Some(digest) = &self.model.sha256 {
            if digest.len() != 64 || !digest.bytes().all(|b| b.is_ascii_hexdigit()) {
                return invalid(format!("model sha256 must be 64 hex characters: {digest}"));
            }
        }
        if self.benchmark.frame_width == 0 || self.benchmark.frame_height == 0 {
            return invalid(format!(
                "synthetic frame must be non-empty: {}x{}",
                self.benchmark.frame_width, self.benchmark.frame_height
            ));
        }
        if self.probe.tool_timeout.is_zero() {
            return invalid("tool timeout must be positive".to_string());
        }
        Ok(())
    }
}
