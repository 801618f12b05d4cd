// HTTP repository against the UrbanPulse metrics API
use crate::application::metrics_repository::{LiveAir, MetricsRepository};
use crate::domain::profile::Domain;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Upstream fetch failure taxonomy. An empty dataset is not an error, and
/// a well-formed body of the wrong shape is left to the normalizer, which
/// treats non-arrays as empty.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("undecodable response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone)]
pub struct HttpMetricsRepository {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct LiveAirEnvelope {
    #[serde(default)]
    air_quality: Option<LiveAirBody>,
}

#[derive(Debug, Deserialize)]
struct LiveAirBody {
    #[serde(default)]
    aqi: Option<f64>,
    #[serde(default)]
    pm2_5: Option<f64>,
    #[serde(default)]
    city: Option<String>,
}

impl HttpMetricsRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    // No retries, no cache, default client timeouts: every page request
    // re-fetches from scratch.
    async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status(),
                url,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }
}

#[async_trait]
impl MetricsRepository for HttpMetricsRepository {
    async fn fetch_hourly(&self, domain: Domain) -> Result<Value> {
        let path = format!("/api/analytics/{}/hourly", domain.as_str());
        let value = self
            .get_json(&path)
            .await
            .with_context(|| format!("hourly analytics fetch for {}", domain.as_str()))?;
        Ok(value)
    }

    async fn fetch_hourly_flat(&self, domain: Domain) -> Result<Value> {
        let path = format!("/api/{}/hourly", domain.as_str());
        let value = self
            .get_json(&path)
            .await
            .with_context(|| format!("flat hourly fetch for {}", domain.as_str()))?;
        Ok(value)
    }

    async fn fetch_live_air(&self) -> Result<LiveAir> {
        let value = self
            .get_json("/air_quality")
            .await
            .context("live air quality fetch")?;
        let envelope: LiveAirEnvelope =
            serde_json::from_value(value).context("live air quality shape")?;

        Ok(envelope
            .air_quality
            .map(|body| LiveAir {
                aqi: body.aqi,
                pm2_5: body.pm2_5,
                city: body.city,
            })
            .unwrap_or_default())
    }
}
