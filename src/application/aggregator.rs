// Aggregator - calendar bucketing with per-metric means
use crate::domain::sample::Sample;
use chrono::{DateTime, Datelike, Days, NaiveDate};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Legacy averaging behavior: an absent metric still counts toward the
    /// divisor, biasing the mean toward zero on sparse data. Off by
    /// default; means are taken only over samples where the metric is
    /// present.
    pub zero_fill_missing: bool,
}

struct BucketAcc {
    key: String,
    start: NaiveDate,
    // metric name -> (sum, contribution count)
    metrics: BTreeMap<String, (f64, u64)>,
    samples: u64,
    label: Option<String>,
}

impl BucketAcc {
    fn new(key: String, start: NaiveDate) -> Self {
        Self {
            key,
            start,
            metrics: BTreeMap::new(),
            samples: 0,
            label: None,
        }
    }
}

/// Group a time-sorted sequence into calendar buckets and average each
/// metric per bucket. Buckets come out as synthetic Samples whose
/// `timestamp` is the bucket key and whose `samples` is the number of
/// contributing raw Samples (never a sum of their own counts).
///
/// Buckets appear in insertion order of their first sample, which is
/// chronological for a sorted input. Samples with an unparseable
/// timestamp are skipped: no calendar bucket is derivable for them.
pub fn aggregate(
    sequence: &[Sample],
    granularity: Granularity,
    options: AggregateOptions,
) -> Vec<Sample> {
    let mut buckets: Vec<BucketAcc> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for sample in sequence {
        let Some(epoch_ms) = sample.epoch_ms else {
            continue;
        };
        let Some(time) = DateTime::<chrono::Utc>::from_timestamp_millis(epoch_ms) else {
            continue;
        };
        let (key, start) = bucket_key(time.date_naive(), granularity);

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(BucketAcc::new(key, start));
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];

        for (name, value) in &sample.metrics {
            let (sum, count) = bucket
                .metrics
                .entry(name.clone())
                .or_insert((0.0, 0));
            match value {
                Some(v) => {
                    *sum += *v;
                    *count += 1;
                }
                None if options.zero_fill_missing => *count += 1,
                None => {}
            }
        }

        bucket.samples += 1;
        if bucket.label.is_none() {
            bucket.label = sample.label.clone();
        }
    }

    buckets.into_iter().map(finish_bucket).collect()
}

/// Bucket key for a UTC calendar date: the date itself, the Sunday on or
/// before it, or the year-month pair (month not zero-padded).
fn bucket_key(date: NaiveDate, granularity: Granularity) -> (String, NaiveDate) {
    match granularity {
        Granularity::Daily => (date.format("%Y-%m-%d").to_string(), date),
        Granularity::Weekly => {
            let offset = date.weekday().num_days_from_sunday();
            let start = date
                .checked_sub_days(Days::new(offset as u64))
                .unwrap_or(date);
            (start.format("%Y-%m-%d").to_string(), start)
        }
        Granularity::Monthly => {
            let start = date.with_day(1).unwrap_or(date);
            (format!("{}-{}", date.year(), date.month()), start)
        }
    }
}

fn finish_bucket(bucket: BucketAcc) -> Sample {
    let metrics = bucket
        .metrics
        .into_iter()
        .map(|(name, (sum, count))| {
            let value = if count > 0 {
                Some(sum / count as f64)
            } else {
                None
            };
            (name, value)
        })
        .collect();

    Sample {
        timestamp: bucket.key,
        epoch_ms: bucket
            .start
            .and_hms_opt(0, 0, 0)
            .map(|t| t.and_utc().timestamp_millis()),
        metrics,
        samples: Some(bucket.samples),
        label: bucket.label,
    }
}
