use std::future::Future;
use std::sync::{Arc, OnceLock};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::types::Snapshot;

static GLOBAL_CACHE: OnceLock<Arc<SnapshotCache>> = OnceLock::new();

/// Single-assignment snapshot cache.
///
/// The first caller runs the fetch and stores the result; every other
/// caller, including ones racing the first, awaits and shares that value.
/// A failed fetch stores nothing. There is no invalidation.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    cell: OnceCell<Arc<Snapshot>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Process-wide instance, survives repeated render passes
    pub fn global() -> Arc<SnapshotCache> {
        Arc::clone(GLOBAL_CACHE.get_or_init(|| Arc::new(SnapshotCache::new())))
    }

    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<Arc<Snapshot>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Snapshot, E>>,
    {
        if let Some(snapshot) = self.cell.get() {
            debug!("Snapshot cache hit: block={}", snapshot.block);
            return Ok(Arc::clone(snapshot));
        }

        let snapshot = self
            .cell
            .get_or_try_init(|| async move {
                let snapshot = fetch().await?;
                info!(
                    "Snapshot cached: network={}, block={}, participants={}",
                    snapshot.network,
                    snapshot.block,
                    snapshot.len()
                );
                Ok::<_, E>(Arc::new(snapshot))
            })
            .await?;

        Ok(Arc::clone(snapshot))
    }

    pub fn get(&self) -> Option<Arc<Snapshot>> {
        self.cell.get().cloned()
    }

    pub fn is_filled(&self) -> bool {
        self.cell.initialized()
    }
}
