// metagraph-core/src/config.rs
// Dashboard configuration: defaults, optional config file, METAGRAPH__* env

use config::{Config, ConfigError, Environment, File};
use metagraph_common::data::MatrixKind;
use metagraph_common::Metric;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::service::errors::ServiceError;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Http,
    File,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Provider {
    pub kind: ProviderKind,
    pub endpoint: String,
    pub network: String,
    pub timeout_secs: u64,
    pub path: String,
}

impl Provider {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RangeFilter {
    pub field: String,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HeatmapSettings {
    pub kind: String,
    pub size: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Dashboard {
    pub top_n: i64,
    pub metrics: Vec<String>,
    pub filter: RangeFilter,
    pub heatmap: HeatmapSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub provider: Provider,
    pub dashboard: Dashboard,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // .env ist optional
        let _ = dotenvy::dotenv();
        Self::from_config(
            Self::builder()?
                .add_source(File::with_name("config").required(false))
                .add_source(Self::environment())
                .build()?,
        )
    }

    /// `METAGRAPH__DASHBOARD__TOP_N=5`, `METAGRAPH__DASHBOARD__METRICS=stake,trust`
    pub fn environment() -> Environment {
        Environment::with_prefix("METAGRAPH")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("dashboard.metrics")
    }

    /// Defaults only, used by `new` and by tests
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("provider.kind", "http")?
            .set_default("provider.endpoint", "http://127.0.0.1:9944")?
            .set_default("provider.network", "nakamoto")?
            .set_default("provider.timeout_secs", 30)?
            .set_default("provider.path", "data/metagraph.json")?
            .set_default("dashboard.top_n", 30)?
            .set_default(
                "dashboard.metrics",
                vec!["rank", "stake", "trust", "consensus", "incentive", "dividends", "emission"],
            )?
            .set_default("dashboard.filter.field", "stake")?
            .set_default("dashboard.filter.min", 0.0)?
            .set_default("dashboard.filter.max", f64::MAX)?
            .set_default("dashboard.heatmap.kind", "weight")?
            .set_default("dashboard.heatmap.size", 10)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.try_deserialize()
    }

    /// Checks everything serde cannot: metric names, endpoint URL, counts
    pub fn validate(&self) -> Result<(), ServiceError> {
        self.metrics()?;
        self.filter_field()?;
        self.heatmap_kind()?;

        if self.provider.kind == ProviderKind::Http {
            Url::parse(&self.provider.endpoint).map_err(|e| {
                ServiceError::Config(format!("Invalid endpoint '{}': {}", self.provider.endpoint, e))
            })?;
        }

        if self.dashboard.top_n < 0 {
            return Err(ServiceError::Config(format!(
                "dashboard.top_n must be non-negative, got {}",
                self.dashboard.top_n
            )));
        }

        if self.dashboard.heatmap.size < 0 {
            return Err(ServiceError::Config(format!(
                "dashboard.heatmap.size must be non-negative, got {}",
                self.dashboard.heatmap.size
            )));
        }

        Ok(())
    }

    pub fn metrics(&self) -> Result<Vec<Metric>, ServiceError> {
        self.dashboard
            .metrics
            .iter()
            .map(|name| name.parse::<Metric>().map_err(|e| ServiceError::Config(e.to_string())))
            .collect()
    }

    pub fn filter_field(&self) -> Result<Metric, ServiceError> {
        self.dashboard
            .filter
            .field
            .parse()
            .map_err(|e: metagraph_common::DataError| ServiceError::Config(e.to_string()))
    }

    pub fn heatmap_kind(&self) -> Result<MatrixKind, ServiceError> {
        self.dashboard
            .heatmap
            .kind
            .parse()
            .map_err(|e: metagraph_common::DataError| ServiceError::Config(e.to_string()))
    }
}
