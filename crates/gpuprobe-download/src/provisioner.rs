use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::StreamExt;
use gpuprobe_core::ModelSource;
use gpuprobe_core::ports::{ModelProvisionerPort, ProvisionError};
use reqwest::Client;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::progress::download_bar;

const USER_AGENT: &str = concat!("gpuprobe/", env!("CARGO_PKG_VERSION"));

/// Fetch-if-absent provisioner backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpModelProvisioner {
    client: Client,
    show_progress: bool,
}

impl Default for HttpModelProvisioner {
    fn default() -> Self {
        Self::with_client(Client::new())
    }
}

impl HttpModelProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
            show_progress: false,
        }
    }

    /// Draw an `indicatif` bar on stderr while downloading.
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Stream `url` into `dest`, returning the lowercase hex SHA-256 of the body.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<String, ProvisionError> {
        let fetch_error = |reason: String| ProvisionError::Fetch {
            url: url.to_string(),
            reason,
        };
        let write_error = |e: std::io::Error| ProvisionError::Write {
            path: dest.to_path_buf(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {status}")));
        }

        let progress = self
            .show_progress
            .then(|| download_bar(response.content_length()));
        let mut file = tokio::fs::File::create(dest).await.map_err(write_error)?;
        let mut hasher = Sha256::new();
        let mut downloaded: u64 = 0;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| fetch_error(e.to_string()))?;
            hasher.update(&chunk);
            file.write_all(&chunk).await.map_err(write_error)?;
            downloaded += chunk.len() as u64;
            if let Some(bar) = &progress {
                bar.set_position(downloaded);
            }
        }
        file.flush().await.map_err(write_error)?;
        file.sync_all().await.map_err(write_error)?;

        if let Some(bar) = progress {
            bar.finish_with_message("Download complete");
        }
        debug!(url, bytes = downloaded, "Download finished");
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// Sibling path a download is staged in before being renamed into place.
pub fn partial_path(path: &Path) -> Result<PathBuf, ProvisionError> {
    let name = path
        .file_name()
        .ok_or_else(|| ProvisionError::InvalidPath(path.to_path_buf()))?;
    let mut staged = name.to_os_string();
    staged.push(".part");
    Ok(path.with_file_name(staged))
}

#[async_trait]
impl ModelProvisionerPort for HttpModelProvisioner {
    async fn ensure(&self, source: &ModelSource) -> Result<PathBuf, ProvisionError> {
        let path = &source.path;
        if tokio::fs::metadata(path).await.is_ok_and(|m| m.is_file()) {
            debug!(path = %path.display(), "Model already present");
            return Ok(path.clone());
        }

        let staged = partial_path(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ProvisionError::CreateDir {
                    path: parent.to_path_buf(),
                    reason: e.to_string(),
                })?;
        }

        info!(url = %source.url, path = %path.display(), "Downloading model");
        let digest = match self.fetch(&source.url, &staged).await {
            Ok(digest) => digest,
            Err(e) => {
                discard(&staged).await;
                return Err(e);
            }
        };

        if let Some(expected) = &source.sha256 {
            if !expected.eq_ignore_ascii_case(&digest) {
                discard(&staged).await;
                return Err(ProvisionError::IntegrityMismatch {
                    path: path.clone(),
                    expected: expected.clone(),
                    actual: digest,
                });
            }
        }

        tokio::fs::rename(&staged, path)
            .await
            .map_err(|e| ProvisionError::Write {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        info!(path = %path.display(), sha256 = %digest, "Model downloaded");
        Ok(path.clone())
    }
}

async fn discard(staged: &Path) {
    if let Err(e) = tokio::fs::remove_file(staged).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %staged.display(), error = %e, "Failed to remove partial download");
        }
    }
}
