// Canonical sample domain model
use std::collections::BTreeMap;

/// One observation: either a raw hourly record from the upstream API or a
/// synthetic calendar bucket derived from a group of them.
///
/// A metric value of `None` means the reading is absent; `Some(0.0)` is a
/// valid reading and the two are never conflated.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Raw upstream timestamp, copied verbatim.
    pub timestamp: String,
    /// Parsed timestamp; `None` when the raw value is unparseable.
    pub epoch_ms: Option<i64>,
    /// Canonical metric name to value.
    pub metrics: BTreeMap<String, Option<f64>>,
    /// Upstream pre-aggregation count, when the record carried one.
    pub samples: Option<u64>,
    /// City/location tag, when the domain carries one.
    pub label: Option<String>,
}

impl Sample {
    pub fn new(timestamp: String) -> Self {
        let epoch_ms = parse_timestamp(&timestamp);
        Self {
            timestamp,
            epoch_ms,
            metrics: BTreeMap::new(),
            samples: None,
            label: None,
        }
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied().flatten()
    }

    pub fn set_metric(&mut self, name: &str, value: Option<f64>) {
        self.metrics.insert(name.to_string(), value);
    }
}

/// Parse an upstream timestamp into epoch milliseconds.
///
/// Accepts RFC 3339 as well as the naive `YYYY-MM-DDTHH:MM:SS` and
/// `YYYY-MM-DD HH:MM:SS` forms database rows come back with; naive values
/// are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    if let Ok(time) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(time.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(start) = date.and_hms_opt(0, 0, 0) {
            return Some(start.and_utc().timestamp_millis());
        }
    }
    None
}
