use serde::Deserialize;

/// Process-wide settings. The upstream base URL lives here and nowhere
/// else; it was previously repeated as a literal per call site.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Legacy averaging compatibility; see AggregateOptions.
    #[serde(default)]
    pub zero_fill_missing: bool,
}

fn default_api_base() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct WidgetsConfig {
    #[serde(default)]
    pub pages: Vec<PageWidgets>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageWidgets {
    pub page: String,
    #[serde(default)]
    pub cards: Vec<CardConfig>,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CardConfig {
    pub id: String,
    pub title: String,
    pub unit: String,
    /// Canonical metric name the card reads from the latest sample.
    pub metric: String,
    pub precision: i32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub unit: Option<String>,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub id: String,
    pub name: String,
    pub metric: String,
    pub color: Option<String>,
}

impl WidgetsConfig {
    pub fn for_page(&self, page: &str) -> Option<&PageWidgets> {
        self.pages.iter().find(|p| p.page == page)
    }
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/urbanpulse").required(false))
        .add_source(config::Environment::with_prefix("URBANPULSE"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_widgets_config() -> anyhow::Result<WidgetsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/widgets"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
