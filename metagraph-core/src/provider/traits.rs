// provider/traits.rs

use async_trait::async_trait;
use metagraph_common::Snapshot;

use crate::provider::errors::ProviderError;

#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Holt einen vollständigen Snapshot. Wird pro Prozess höchstens einmal
    /// aufgerufen; Fehler gehen unverändert an den Aufrufer.
    async fn fetch(&self) -> Result<Snapshot, ProviderError>;

    /// Short human-readable source description for logs
    fn describe(&self) -> String;
}
