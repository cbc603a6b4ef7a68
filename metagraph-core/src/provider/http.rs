// ====
// Metagraph HTTP Provider
// ====
// Pulls a full snapshot from a node-side JSON endpoint
// ====

use async_trait::async_trait;
use metagraph_common::Snapshot;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::errors::ProviderError;
use super::traits::SnapshotProvider;
use super::types::SnapshotPayload;

/// Default network queried when the config names none
pub const DEFAULT_NETWORK: &str = "nakamoto";

pub struct HttpSnapshotProvider {
    /// HTTP client
    client: Client,
    /// API base URL
    base_url: Url,
    /// Network name passed as query parameter
    network: String,
}

impl HttpSnapshotProvider {
    pub fn new(endpoint: &str, network: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let mut base_url = Url::parse(endpoint)
            .map_err(|e| ProviderError::Parse(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
        // Ohne abschließenden Slash würde join() das letzte Segment ersetzen
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            network: network.to_string(),
        })
    }

    /// `{endpoint}/metagraph?network={network}`
    pub fn snapshot_url(&self) -> Result<Url, ProviderError> {
        let mut url = self
            .base_url
            .join("metagraph")
            .map_err(|e| ProviderError::Parse(e.to_string()))?;
        url.query_pairs_mut().append_pair("network", &self.network);
        Ok(url)
    }
}

#[async_trait]
impl SnapshotProvider for HttpSnapshotProvider {
    async fn fetch(&self) -> Result<Snapshot, ProviderError> {
        let url = self.snapshot_url()?;
        info!("Fetching metagraph snapshot from {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let payload: SnapshotPayload = response.json().await?;
        debug!("Received payload with {} hotkeys", payload.hotkeys.len());

        Ok(payload.into_snapshot(&self.network)?)
    }

    fn describe(&self) -> String {
        format!("http {} ({})", self.base_url, self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_url_carries_network() {
        let provider =
            HttpSnapshotProvider::new("http://127.0.0.1:9944/api/", "nakamoto", Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            provider.snapshot_url().unwrap().as_str(),
            "http://127.0.0.1:9944/api/metagraph?network=nakamoto"
        );
    }

    #[test]
    fn test_endpoint_without_trailing_slash_keeps_path() {
        let provider =
            HttpSnapshotProvider::new("http://127.0.0.1:9944/api", "nakamoto", Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            provider.snapshot_url().unwrap().as_str(),
            "http://127.0.0.1:9944/api/metagraph?network=nakamoto"
        );

        let bare = HttpSnapshotProvider::new("http://127.0.0.1:9944", "nakamoto", Duration::from_secs(5))
            .unwrap();
        assert_eq!(
            bare.snapshot_url().unwrap().as_str(),
            "http://127.0.0.1:9944/metagraph?network=nakamoto"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let result = HttpSnapshotProvider::new("not a url", DEFAULT_NETWORK, Duration::from_secs(5));
        assert!(matches!(result, Err(ProviderError::Parse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_node_surfaces_network_error() {
        // Port 9 (discard) ist lokal praktisch nie offen
        let provider =
            HttpSnapshotProvider::new("http://127.0.0.1:9/", DEFAULT_NETWORK, Duration::from_secs(2))
                .unwrap();
        let err = provider.fetch().await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
