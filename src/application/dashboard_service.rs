// Dashboard service - assembles one page payload per request
use crate::application::aggregator::AggregateOptions;
use crate::application::metrics_repository::{LiveAir, MetricsRepository};
use crate::application::normalizer::normalize;
use crate::application::view::{select, RowFilter, View};
use crate::domain::air_quality::aqi_category;
use crate::domain::dashboard::{
    CardData, ChartData, ChartKind, ChartPoint, Dashboard, SeriesData, TableData,
};
use crate::domain::profile::Domain;
use crate::domain::sample::Sample;
use crate::infrastructure::config::{CardConfig, ChartConfig, PageWidgets, WidgetsConfig};
use std::sync::Arc;

/// Chart views show the raw tail of the hourly series unless a calendar
/// granularity is selected.
const CHART_TAIL: usize = 10;
/// Overview tables show the most recent rows only.
const TABLE_TAIL: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Traffic,
    Weather,
    Air,
    Overview,
}

impl Page {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "traffic" => Some(Page::Traffic),
            "weather" => Some(Page::Weather),
            "air" => Some(Page::Air),
            "overview" => Some(Page::Overview),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Traffic => "traffic",
            Page::Weather => "weather",
            Page::Air => "air",
            Page::Overview => "overview",
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn MetricsRepository>,
    widgets_config: WidgetsConfig,
    aggregate_options: AggregateOptions,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn MetricsRepository>,
        widgets_config: WidgetsConfig,
        aggregate_options: AggregateOptions,
    ) -> Self {
        Self {
            repository,
            widgets_config,
            aggregate_options,
        }
    }

    pub async fn get_dashboard(
        &self,
        page: Page,
        view_param: Option<&str>,
        filter: &RowFilter,
    ) -> Dashboard {
        match page {
            Page::Traffic => {
                self.domain_dashboard(Domain::Traffic, "Traffic Analytics", view_param)
                    .await
            }
            Page::Weather => {
                self.domain_dashboard(Domain::Weather, "Weather Analytics", view_param)
                    .await
            }
            Page::Air => self.air_dashboard(view_param).await,
            Page::Overview => self.overview_dashboard(filter).await,
        }
    }

    /// Traffic and weather pages: one hourly fetch, cards off the latest
    /// sample, charts off the selected view. A fetch failure degrades to
    /// placeholder cards and no charts, matching the pages' fail-soft
    /// behavior.
    async fn domain_dashboard(
        &self,
        domain: Domain,
        title: &str,
        view_param: Option<&str>,
    ) -> Dashboard {
        let sequence = match self.repository.fetch_hourly(domain).await {
            Ok(raw) => normalize(&raw, domain.profile()),
            Err(e) => {
                tracing::warn!("{} hourly fetch failed: {:#}", domain.as_str(), e);
                Vec::new()
            }
        };

        let latest = sequence.last();
        let widgets = self.widgets(domain.as_str());

        let cards = widgets
            .map(|w| build_cards(&w.cards, |metric| latest.and_then(|s| s.metric(metric))))
            .unwrap_or_default();

        let view = View::parse(view_param, CHART_TAIL);
        let selected = select(&sequence, view, self.aggregate_options);
        let charts = widgets
            .map(|w| build_charts(&w.charts, &selected))
            .unwrap_or_default();

        Dashboard::new(title.to_string(), cards, charts, Vec::new(), None)
    }

    /// Air page: the hourly series and the live snapshot are fetched
    /// concurrently and feed independent slices of the payload. Card
    /// values prefer live over the latest hourly sample. A failed live
    /// fetch falls back to hourly; a failed hourly fetch surfaces an
    /// error and suppresses charts.
    async fn air_dashboard(&self, view_param: Option<&str>) -> Dashboard {
        let (hourly, live) = futures::join!(
            self.repository.fetch_hourly(Domain::Air),
            self.repository.fetch_live_air(),
        );

        let live = match live {
            Ok(live) => live,
            Err(e) => {
                tracing::warn!("air live fetch failed: {:#}", e);
                LiveAir::default()
            }
        };

        let (sequence, error) = match hourly {
            Ok(raw) => (normalize(&raw, Domain::Air.profile()), None),
            Err(e) => {
                tracing::error!("air hourly fetch failed: {:#}", e);
                (Vec::new(), Some("Failed to load hourly data".to_string()))
            }
        };

        let latest = sequence.last();
        let aqi = live.aqi.or_else(|| latest.and_then(|s| s.metric("avg_aqi")));
        let pm25 = live
            .pm2_5
            .or_else(|| latest.and_then(|s| s.metric("avg_pm25")));

        let widgets = self.widgets("air");
        let mut cards = widgets
            .map(|w| {
                build_cards(&w.cards, |metric| match metric {
                    "avg_aqi" => aqi,
                    "avg_pm25" => pm25,
                    other => latest.and_then(|s| s.metric(other)),
                })
            })
            .unwrap_or_default();

        let category = aqi_category(aqi);
        cards.push(CardData::new(
            "air-category".to_string(),
            "Air Quality Level".to_string(),
            String::new(),
            aqi,
            0,
            Some(category.label.to_string()),
        ));

        let charts = if error.is_some() {
            Vec::new()
        } else {
            let view = View::parse(view_param, CHART_TAIL);
            let selected = select(&sequence, view, self.aggregate_options);
            widgets
                .map(|w| build_charts(&w.charts, &selected))
                .unwrap_or_default()
        };

        Dashboard::new(
            "Air Quality Analytics".to_string(),
            cards,
            charts,
            Vec::new(),
            error,
        )
    }

    /// Overview page: the three flat hourly endpoints are fetched
    /// concurrently; each becomes a table of its most recent rows after
    /// the row filters are applied. A failed fetch yields an empty table.
    async fn overview_dashboard(&self, filter: &RowFilter) -> Dashboard {
        let (traffic, weather, air) = futures::join!(
            self.repository.fetch_hourly_flat(Domain::Traffic),
            self.repository.fetch_hourly_flat(Domain::Weather),
            self.repository.fetch_hourly_flat(Domain::Air),
        );

        let tables = vec![
            overview_table(Domain::Traffic, traffic, filter),
            overview_table(Domain::Weather, weather, filter),
            overview_table(Domain::Air, air, filter),
        ];

        Dashboard::new(
            "UrbanPulse Overview".to_string(),
            Vec::new(),
            Vec::new(),
            tables,
            None,
        )
    }

    fn widgets(&self, page: &str) -> Option<&PageWidgets> {
        self.widgets_config.for_page(page)
    }
}

fn build_cards(configs: &[CardConfig], value_for: impl Fn(&str) -> Option<f64>) -> Vec<CardData> {
    configs
        .iter()
        .map(|config| {
            CardData::new(
                config.id.clone(),
                config.title.clone(),
                config.unit.clone(),
                value_for(&config.metric),
                config.precision,
                None,
            )
        })
        .collect()
}

fn build_charts(configs: &[ChartConfig], selected: &[Sample]) -> Vec<ChartData> {
    if selected.is_empty() {
        return Vec::new();
    }

    configs
        .iter()
        .map(|config| {
            let series = config
                .series
                .iter()
                .map(|series_config| {
                    let points = selected
                        .iter()
                        .map(|sample| ChartPoint {
                            timestamp: sample.timestamp.clone(),
                            epoch_ms: sample.epoch_ms,
                            value: sample.metric(&series_config.metric),
                        })
                        .collect();
                    SeriesData::new(
                        series_config.id.clone(),
                        series_config.name.clone(),
                        series_config.color.clone(),
                        points,
                    )
                })
                .collect();

            let kind = match config.kind.as_str() {
                "multiLine" => ChartKind::MultiLine,
                "bar" => ChartKind::Bar,
                "area" => ChartKind::Area,
                _ => ChartKind::Line,
            };

            ChartData::new(
                config.id.clone(),
                config.title.clone(),
                config.unit.clone(),
                kind,
                series,
            )
        })
        .collect()
}

fn overview_table(
    domain: Domain,
    fetched: anyhow::Result<serde_json::Value>,
    filter: &RowFilter,
) -> TableData {
    let sequence = match fetched {
        Ok(raw) => normalize(&raw, domain.flat_profile()),
        Err(e) => {
            tracing::warn!("{} flat hourly fetch failed: {:#}", domain.as_str(), e);
            Vec::new()
        }
    };

    let kept: Vec<&Sample> = sequence
        .iter()
        .filter(|sample| filter.matches(sample))
        .collect();
    let start = kept.len().saturating_sub(TABLE_TAIL);
    let rows = kept[start..]
        .iter()
        .map(|sample| table_row(domain, sample))
        .collect();

    let (id, title, columns) = table_layout(domain);
    TableData::new(
        id.to_string(),
        title.to_string(),
        columns.iter().map(|c| c.to_string()).collect(),
        rows,
    )
}

fn table_layout(domain: Domain) -> (&'static str, &'static str, &'static [&'static str]) {
    match domain {
        Domain::Traffic => (
            "traffic-trends",
            "Traffic Trends",
            &["Location", "Avg Speed", "Free Flow", "Samples"],
        ),
        Domain::Weather => (
            "weather-overview",
            "Weather Overview",
            &["City", "Avg Temp", "Humidity", "Samples"],
        ),
        Domain::Air => (
            "air-insights",
            "Air Quality Insights",
            &["City", "PM2.5", "AQI", "Samples"],
        ),
    }
}

fn table_row(domain: Domain, sample: &Sample) -> Vec<String> {
    let label = sample.label.clone().unwrap_or_else(|| "—".to_string());
    let count = sample
        .samples
        .map(|n| n.to_string())
        .unwrap_or_else(|| "—".to_string());

    match domain {
        Domain::Traffic => vec![
            label,
            format!("{} km/h", fmt(sample.metric("avg_speed"), 2)),
            format!("{} km/h", fmt(sample.metric("free_flow_avg"), 2)),
            count,
        ],
        Domain::Weather => vec![
            label,
            format!("{} °C", fmt(sample.metric("avg_temp"), 1)),
            format!("{}%", fmt(sample.metric("avg_humidity"), 0)),
            count,
        ],
        Domain::Air => vec![
            label,
            fmt(sample.metric("avg_pm25"), 1),
            fmt(sample.metric("avg_aqi"), 0),
            count,
        ],
    }
}

/// Missing readings render as a dash, never as zero.
fn fmt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "—".to_string(),
    }
}
