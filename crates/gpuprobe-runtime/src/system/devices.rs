//! GPU device node enumeration.

use std::io;

use gpuprobe_core::DevicePattern;
use tracing::warn;

/// List entries matching any pattern, sorted and de-duplicated.
///
/// A missing directory matches nothing. Dotfiles never match. A pattern whose
/// directory cannot be read is skipped; the other patterns still count.
pub async fn enumerate_device_nodes(patterns: &[DevicePattern]) -> Vec<String> {
    let mut nodes = Vec::new();
    for pattern in patterns {
        match matching_entries(pattern).await {
            Ok(matches) => nodes.extend(matches),
            Err(error) => warn!(
                dir = %pattern.dir.display(),
                prefix = %pattern.prefix,
                %error,
                "Skipping unreadable device directory"
            ),
        }
    }
    nodes.sort();
    nodes.dedup();
    nodes
}

async fn matching_entries(pattern: &DevicePattern) -> io::Result<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(&pattern.dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut matches = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || !name.starts_with(pattern.prefix.as_str()) {
            continue;
        }
        matches.push(entry.path().to_string_lossy().into_owned());
    }
    Ok(matches)
}
