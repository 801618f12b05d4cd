// Dashboard payload domain model
use serde::Serialize;

/// One point on a chart axis. `value: None` renders as a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub timestamp: String,
    pub epoch_ms: Option<i64>,
    pub value: Option<f64>,
}

/// Summary card. `value: None` renders as a placeholder dash; `badge`
/// carries a derived label such as the AQI category.
#[derive(Debug, Clone, Serialize)]
pub struct CardData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: Option<f64>,
    pub precision: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl CardData {
    pub fn new(
        id: String,
        title: String,
        unit: String,
        value: Option<f64>,
        precision: i32,
        badge: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            value,
            precision,
            badge,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<ChartPoint>,
}

impl SeriesData {
    pub fn new(id: String, name: String, color: Option<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            id,
            name,
            color,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    MultiLine,
    Bar,
    Area,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub series: Vec<SeriesData>,
}

impl ChartData {
    pub fn new(
        id: String,
        title: String,
        unit: Option<String>,
        kind: ChartKind,
        series: Vec<SeriesData>,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            kind,
            series,
        }
    }
}

/// Tabular rows, pre-formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct TableData {
    pub id: String,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new(id: String, title: String, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            id,
            title,
            columns,
            rows,
        }
    }
}

/// One page's worth of presentation data. `error` is set when the page's
/// primary series could not be loaded and charts are suppressed.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub cards: Vec<CardData>,
    pub charts: Vec<ChartData>,
    pub tables: Vec<TableData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Dashboard {
    pub fn new(
        title: String,
        cards: Vec<CardData>,
        charts: Vec<ChartData>,
        tables: Vec<TableData>,
        error: Option<String>,
    ) -> Self {
        Self {
            title,
            cards,
            charts,
            tables,
            error,
        }
    }
}
