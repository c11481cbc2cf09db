//! Environment variable capture.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Injectable environment lookup.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Lookup backed by the real process environment.
pub fn process_env() -> EnvLookup {
    Arc::new(|name: &str| std::env::var(name).ok())
}

/// Values of allow-listed variables that are set. Unset names are omitted.
pub fn capture_environment(
    allowlist: &[String],
    lookup: &(dyn Fn(&str) -> Option<String> + Send + Sync),
) -> BTreeMap<String, String> {
    allowlist
        .iter()
        .filter_map(|name| lookup(name).map(|value| (name.clone(), value)))
        .collect()
}
