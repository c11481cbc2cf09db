//! Delegate backend identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hardware execution target for an inference delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Cpu,
    Gpu,
}

impl Backend {
    /// Benchmark order. CPU always runs before GPU.
    pub const ALL: [Self; 2] = [Self::Cpu, Self::Gpu];

    /// Stable lowercase key used in reports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
