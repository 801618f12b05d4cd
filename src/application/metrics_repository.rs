// Repository trait for upstream metrics access
use crate::domain::profile::Domain;
use async_trait::async_trait;

/// Most recent single reading from the live air quality endpoint,
/// independent of the hourly history series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveAir {
    pub aqi: Option<f64>,
    pub pm2_5: Option<f64>,
    pub city: Option<String>,
}

#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Hourly analytics series for one domain (feeds cards and charts).
    /// Returned raw: the normalizer owns shape handling, and a non-array
    /// body is a valid empty dataset rather than an error.
    async fn fetch_hourly(&self, domain: Domain) -> anyhow::Result<serde_json::Value>;

    /// Flat hourly rows used by the combined overview tables.
    async fn fetch_hourly_flat(&self, domain: Domain) -> anyhow::Result<serde_json::Value>;

    /// Live air quality snapshot.
    async fn fetch_live_air(&self) -> anyhow::Result<LiveAir>;
}
