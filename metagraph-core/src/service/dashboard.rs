// service/dashboard.rs
// Glue between provider, snapshot cache and the ranking functions

use metagraph_common::data::{
    Heatmap, MatrixKind, NetworkSummary, ParticipantRow, Ranking, Snapshot, SnapshotCache,
};
use metagraph_common::ranking::{filter_by_range, heatmap, join_rows, rank_metric};
use metagraph_common::Metric;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::errors::ServiceError;
use crate::config::{ProviderKind, Settings};
use crate::provider::{FileSnapshotProvider, HttpSnapshotProvider, SnapshotProvider};

/// Everything one render pass of the dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub summary: NetworkSummary,
    pub rankings: Vec<Ranking>,
    pub filter_field: Metric,
    pub filtered: Vec<ParticipantRow>,
    pub heatmap: Heatmap,
}

pub struct DashboardService {
    provider: Arc<dyn SnapshotProvider>,
    cache: Arc<SnapshotCache>,
}

impl DashboardService {
    pub fn new(provider: Arc<dyn SnapshotProvider>, cache: Arc<SnapshotCache>) -> Self {
        Self { provider, cache }
    }

    /// Service backed by the process-wide snapshot cache
    pub fn with_global_cache(provider: Arc<dyn SnapshotProvider>) -> Self {
        Self::new(provider, SnapshotCache::global())
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ServiceError> {
        settings.validate()?;

        let provider: Arc<dyn SnapshotProvider> = match settings.provider.kind {
            ProviderKind::Http => Arc::new(HttpSnapshotProvider::new(
                &settings.provider.endpoint,
                &settings.provider.network,
                settings.provider.timeout(),
            )?),
            ProviderKind::File => Arc::new(
                FileSnapshotProvider::new(&settings.provider.path)
                    .with_network(&settings.provider.network),
            ),
        };

        info!("Snapshot provider: {}", provider.describe());
        Ok(Self::with_global_cache(provider))
    }

    // =================================================================
    // Snapshot Access
    // =================================================================

    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, ServiceError> {
        let provider = Arc::clone(&self.provider);
        self.cache
            .get_or_fetch(|| async move { provider.fetch().await })
            .await
            .map_err(|e| {
                error!("Failed to fetch snapshot: {}", e);
                ServiceError::from(e)
            })
    }

    pub async fn summary(&self) -> Result<NetworkSummary, ServiceError> {
        let snapshot = self.snapshot().await?;
        Ok(NetworkSummary::from_snapshot(&snapshot))
    }

    // =================================================================
    // Rankings & Tables
    // =================================================================

    pub async fn ranking(&self, metric: Metric, n: i64) -> Result<Ranking, ServiceError> {
        let snapshot = self.snapshot().await?;
        let ranking = rank_metric(&snapshot, metric, n)?;

        if ranking.entries.is_empty() {
            warn!("Ranking for {} is empty", metric);
        }
        debug!("Ranked {}: {} entries", metric, ranking.entries.len());
        Ok(ranking)
    }

    pub async fn rankings(&self, metrics: &[Metric], n: i64) -> Result<Vec<Ranking>, ServiceError> {
        let mut rankings = Vec::with_capacity(metrics.len());
        for metric in metrics {
            rankings.push(self.ranking(*metric, n).await?);
        }
        Ok(rankings)
    }

    pub async fn table(&self) -> Result<Vec<ParticipantRow>, ServiceError> {
        let snapshot = self.snapshot().await?;
        Ok(join_rows(&snapshot)?)
    }

    pub async fn filtered(
        &self,
        field: Metric,
        min_value: f64,
        max_value: f64,
    ) -> Result<Vec<ParticipantRow>, ServiceError> {
        let rows = self.table().await?;
        let kept = filter_by_range(&rows, field, min_value, max_value)?;
        debug!(
            "Filter {} in [{}, {}]: {} of {} rows",
            field,
            min_value,
            max_value,
            kept.len(),
            rows.len()
        );
        Ok(kept)
    }

    /// Matrix window over the `size` participants ranked highest by `by`
    pub async fn heatmap(
        &self,
        kind: MatrixKind,
        by: Metric,
        size: i64,
    ) -> Result<Heatmap, ServiceError> {
        let snapshot = self.snapshot().await?;
        let ranking = rank_metric(&snapshot, by, size)?;
        Ok(heatmap(&snapshot, kind, &ranking.indices())?)
    }

    /// All tables configured in `settings`, from one cached snapshot
    pub async fn report(&self, settings: &Settings) -> Result<DashboardReport, ServiceError> {
        let metrics = settings.metrics()?;
        let filter_field = settings.filter_field()?;
        let dashboard = &settings.dashboard;

        let summary = self.summary().await?;
        info!(
            "Network {} at block {}: {} participants, {} active",
            summary.network, summary.block, summary.participants, summary.active_count
        );

        let rankings = self.rankings(&metrics, dashboard.top_n).await?;
        let filtered = self
            .filtered(filter_field, dashboard.filter.min, dashboard.filter.max)
            .await?;
        let by = metrics.first().copied().unwrap_or(Metric::Rank);
        let heatmap = self
            .heatmap(settings.heatmap_kind()?, by, dashboard.heatmap.size)
            .await?;

        Ok(DashboardReport {
            summary,
            rankings,
            filter_field,
            filtered,
            heatmap,
        })
    }
}
