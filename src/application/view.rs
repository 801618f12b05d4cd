// View selection - raw tail vs calendar buckets
use crate::application::aggregator::{aggregate, AggregateOptions, Granularity};
use crate::domain::sample::Sample;

/// The user-selected time resolution for a page. Not persisted: every
/// request starts from the page default unless a `view` parameter says
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Raw tail of the hourly sequence, `k` elements.
    Latest(usize),
    Bucketed(Granularity),
}

impl View {
    /// Anything other than a known granularity, including absence, falls
    /// back to the page's raw tail.
    pub fn parse(value: Option<&str>, default_tail: usize) -> Self {
        match value {
            Some("daily") => View::Bucketed(Granularity::Daily),
            Some("weekly") => View::Bucketed(Granularity::Weekly),
            Some("monthly") => View::Bucketed(Granularity::Monthly),
            _ => View::Latest(default_tail),
        }
    }
}

/// Choose what a page's charts render: the last `k` raw samples in their
/// original order, or the full bucket history for a calendar view.
pub fn select(sequence: &[Sample], view: View, options: AggregateOptions) -> Vec<Sample> {
    match view {
        View::Latest(k) => {
            let start = sequence.len().saturating_sub(k);
            sequence[start..].to_vec()
        }
        View::Bucketed(granularity) => aggregate(sequence, granularity, options),
    }
}

/// Client-side row filter for table views, applied after normalization
/// and independent of aggregation.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    /// Case-insensitive substring match against the sample label.
    pub city: Option<String>,
    /// Prefix match against the raw timestamp, e.g. "2024-01-15".
    pub date: Option<String>,
}

impl RowFilter {
    pub fn matches(&self, sample: &Sample) -> bool {
        if let Some(city) = &self.city {
            let needle = city.to_lowercase();
            let hit = sample
                .label
                .as_ref()
                .is_some_and(|label| label.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(date) = &self.date {
            if !sample.timestamp.starts_with(date.as_str()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| {
                let mut s = Sample::new(format!("2024-01-01T{:02}:00:00Z", i));
                s.set_metric("avg_aqi", Some(i as f64));
                s
            })
            .collect()
    }

    #[test]
    fn test_latest_returns_tail_in_order() {
        let seq = sequence(12);
        let selected = select(&seq, View::Latest(5), AggregateOptions::default());
        assert_eq!(selected.len(), 5);
        let values: Vec<Option<f64>> = selected.iter().map(|s| s.metric("avg_aqi")).collect();
        assert_eq!(
            values,
            vec![Some(7.0), Some(8.0), Some(9.0), Some(10.0), Some(11.0)]
        );
    }

    #[test]
    fn test_latest_shorter_than_k() {
        let seq = sequence(3);
        let selected = select(&seq, View::Latest(10), AggregateOptions::default());
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn test_empty_sequence_selects_empty() {
        assert!(select(&[], View::Latest(5), AggregateOptions::default()).is_empty());
        assert!(select(
            &[],
            View::Bucketed(Granularity::Monthly),
            AggregateOptions::default()
        )
        .is_empty());
    }

    #[test]
    fn test_bucketed_view_is_unsliced() {
        // 30 hourly samples across two days come back as exactly two
        // buckets regardless of any tail constant.
        let mut seq = sequence(24);
        for i in 0..6 {
            let mut s = Sample::new(format!("2024-01-02T{:02}:00:00Z", i));
            s.set_metric("avg_aqi", Some(1.0));
            seq.push(s);
        }
        let selected = select(
            &seq,
            View::Bucketed(Granularity::Daily),
            AggregateOptions::default(),
        );
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].samples, Some(24));
        assert_eq!(selected[1].samples, Some(6));
    }

    #[test]
    fn test_view_parse() {
        assert_eq!(View::parse(Some("daily"), 10), View::Bucketed(Granularity::Daily));
        assert_eq!(
            View::parse(Some("weekly"), 10),
            View::Bucketed(Granularity::Weekly)
        );
        assert_eq!(
            View::parse(Some("monthly"), 10),
            View::Bucketed(Granularity::Monthly)
        );
        assert_eq!(View::parse(Some("latest"), 10), View::Latest(10));
        assert_eq!(View::parse(Some("hourly"), 4), View::Latest(4));
        assert_eq!(View::parse(None, 5), View::Latest(5));
    }

    #[test]
    fn test_row_filter() {
        let mut s = Sample::new("2024-01-15T10:00:00Z".to_string());
        s.label = Some("Bangalore".to_string());

        let by_city = RowFilter {
            city: Some("bang".to_string()),
            date: None,
        };
        assert!(by_city.matches(&s));

        let by_date = RowFilter {
            city: None,
            date: Some("2024-01-15".to_string()),
        };
        assert!(by_date.matches(&s));

        let miss = RowFilter {
            city: Some("mysore".to_string()),
            date: None,
        };
        assert!(!miss.matches(&s));

        let wrong_day = RowFilter {
            city: None,
            date: Some("2024-01-16".to_string()),
        };
        assert!(!wrong_day.matches(&s));

        assert!(RowFilter::default().matches(&s));
    }

    #[test]
    fn test_city_filter_requires_label() {
        let unlabeled = Sample::new("2024-01-15T10:00:00Z".to_string());
        let filter = RowFilter {
            city: Some("bangalore".to_string()),
            date: None,
        };
        assert!(!filter.matches(&unlabeled));
    }
}
