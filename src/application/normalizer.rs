// Normalizer - raw upstream JSON to a canonical, time-sorted sequence
use crate::domain::profile::DomainProfile;
use crate::domain::sample::Sample;
use serde_json::Value;
use std::cmp::Ordering;

/// Map raw hourly rows into canonical Samples.
///
/// Non-array input is an empty dataset, not an error. Rows without a
/// usable timestamp are dropped silently. The result is sorted ascending
/// by parsed timestamp; rows whose timestamp does not parse compare equal
/// to each other and sort ahead of every parseable row, keeping their
/// input order (the sort is stable).
pub fn normalize(raw: &Value, profile: &DomainProfile) -> Vec<Sample> {
    let Some(rows) = raw.as_array() else {
        return Vec::new();
    };

    let mut sequence: Vec<Sample> = rows
        .iter()
        .filter_map(|row| normalize_row(row, profile))
        .collect();

    sequence.sort_by(|a, b| match (a.epoch_ms, b.epoch_ms) {
        (Some(x), Some(y)) => x.cmp(&y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    sequence
}

fn normalize_row(row: &Value, profile: &DomainProfile) -> Option<Sample> {
    let timestamp = row.get(profile.timestamp_field)?.as_str()?;
    if timestamp.is_empty() {
        return None;
    }

    let mut sample = Sample::new(timestamp.to_string());

    for field in profile.metrics {
        // Primary field wins; the fallback is only consulted when the
        // primary is absent or not a number. Neither resolving leaves the
        // metric at None - zero is a reading, not absence.
        let value = row.get(field.primary).and_then(Value::as_f64).or_else(|| {
            field
                .fallback
                .and_then(|name| row.get(name).and_then(Value::as_f64))
        });
        sample.set_metric(field.name, value);
    }

    sample.samples = row.get("samples").and_then(Value::as_u64);

    if let Some(label_field) = profile.label_field {
        sample.label = row
            .get(label_field)
            .and_then(Value::as_str)
            .map(str::to_string);
    }

    Some(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{Domain, AIR, WEATHER};
    use serde_json::json;

    #[test]
    fn test_non_array_is_empty() {
        assert!(normalize(&json!({"detail": "no data"}), &WEATHER).is_empty());
        assert!(normalize(&json!(null), &WEATHER).is_empty());
        assert!(normalize(&json!(42), &WEATHER).is_empty());
    }

    #[test]
    fn test_drops_rows_without_timestamp() {
        let raw = json!([
            {"hour_start": "2024-01-01T00:00:00Z", "avg_temp": 21.0},
            {"avg_temp": 22.0},
            {"hour_start": "", "avg_temp": 23.0},
            {"hour_start": null, "avg_temp": 24.0},
        ]);
        let sequence = normalize(&raw, &WEATHER);
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].metric("avg_temp"), Some(21.0));
    }

    #[test]
    fn test_sorted_ascending_by_timestamp() {
        let raw = json!([
            {"hour_start": "2024-01-01T02:00:00Z", "avg_temp": 3.0},
            {"hour_start": "2024-01-01T00:00:00Z", "avg_temp": 1.0},
            {"hour_start": "2024-01-01T01:00:00Z", "avg_temp": 2.0},
        ]);
        let sequence = normalize(&raw, &WEATHER);
        let temps: Vec<Option<f64>> = sequence.iter().map(|s| s.metric("avg_temp")).collect();
        assert_eq!(temps, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn test_unparseable_timestamps_sort_first_in_input_order() {
        let raw = json!([
            {"hour_start": "2024-01-01T00:00:00Z", "avg_temp": 1.0},
            {"hour_start": "garbage-b", "avg_temp": 2.0},
            {"hour_start": "garbage-a", "avg_temp": 3.0},
        ]);
        let sequence = normalize(&raw, &WEATHER);
        assert_eq!(sequence[0].timestamp, "garbage-b");
        assert_eq!(sequence[1].timestamp, "garbage-a");
        assert!(sequence[2].epoch_ms.is_some());
    }

    #[test]
    fn test_fallback_field_name() {
        let raw = json!([
            {"hour_start": "2024-01-01T00:00:00Z", "avg_temperature": 21.0},
        ]);
        let sequence = normalize(&raw, &WEATHER);
        assert_eq!(sequence[0].metric("avg_temp"), Some(21.0));
    }

    #[test]
    fn test_primary_wins_over_fallback() {
        let raw = json!([
            {"hour_start": "2024-01-01T00:00:00Z", "avg_temp": 18.0, "avg_temperature": 21.0},
        ]);
        let sequence = normalize(&raw, &WEATHER);
        assert_eq!(sequence[0].metric("avg_temp"), Some(18.0));
    }

    #[test]
    fn test_non_numeric_metric_is_absent_not_zero() {
        let raw = json!([
            {"hour_start": "2024-01-01T00:00:00Z", "avg_temp": "21", "avg_humidity": 0.0},
        ]);
        let sequence = normalize(&raw, &WEATHER);
        assert_eq!(sequence[0].metric("avg_temp"), None);
        assert_eq!(sequence[0].metric("avg_humidity"), Some(0.0));
    }

    #[test]
    fn test_samples_and_label_retention() {
        let raw = json!([
            {"hour_start": "2024-01-01T00:00:00Z", "avg_aqi": 60, "city": "Bangalore", "samples": 12},
            {"hour_start": "2024-01-01T01:00:00Z", "avg_aqi": 40, "samples": "12"},
        ]);
        let sequence = normalize(&raw, &AIR);
        assert_eq!(sequence[0].samples, Some(12));
        assert_eq!(sequence[0].label.as_deref(), Some("Bangalore"));
        assert_eq!(sequence[1].samples, None);
        assert_eq!(sequence[1].label, None);
    }

    #[test]
    fn test_output_never_longer_than_input() {
        let raw = json!([
            {"hour_start": "2024-01-01T00:00:00Z"},
            {"location": "12.97,77.59"},
        ]);
        assert_eq!(normalize(&raw, Domain::Traffic.profile()).len(), 1);
    }
}
