// provider/file.rs
// Offline snapshots from a JSON dump on disk

use async_trait::async_trait;
use metagraph_common::Snapshot;
use std::path::{Path, PathBuf};
use tracing::info;

use super::errors::ProviderError;
use super::http::DEFAULT_NETWORK;
use super::traits::SnapshotProvider;
use super::types::SnapshotPayload;

pub struct FileSnapshotProvider {
    path: PathBuf,
    network: String,
}

impl FileSnapshotProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            network: DEFAULT_NETWORK.to_string(),
        }
    }

    pub fn with_network(mut self, network: &str) -> Self {
        self.network = network.to_string();
        self
    }
}

#[async_trait]
impl SnapshotProvider for FileSnapshotProvider {
    async fn fetch(&self) -> Result<Snapshot, ProviderError> {
        info!("Loading metagraph snapshot from {}", self.path.display());

        let bytes = tokio::fs::read(&self.path).await?;
        // BOM aus Windows-Exports entfernen
        let content = String::from_utf8_lossy(&bytes);
        let payload: SnapshotPayload =
            serde_json::from_str(content.trim_start_matches('\u{feff}'))?;

        Ok(payload.into_snapshot(&self.network)?)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
