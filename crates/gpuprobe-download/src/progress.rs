//! Terminal progress bar for model downloads.

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})";

/// Bar sized to `total_bytes`; a spinner when the length is unknown.
pub fn download_bar(total_bytes: Option<u64>) -> ProgressBar {
    let Some(total) = total_bytes else {
        return ProgressBar::new_spinner();
    };
    let style = ProgressStyle::default_bar()
        .template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    ProgressBar::new(total).with_style(style)
}
