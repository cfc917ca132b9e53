use chrono::{Duration, NaiveDateTime, Timelike};
use tracing::debug;

use crate::error::{BusyplotError, Result};
use crate::model::{Bucket, BucketedSeries, RawSeries};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

fn check_width(width: Duration) -> Result<i64> {
    let seconds = width.num_seconds();
    if seconds <= 0 || SECONDS_PER_DAY % seconds != 0 {
        return Err(BusyplotError::InvalidBucketWidth(seconds));
    }
    Ok(seconds)
}

/// Start of the bucket containing `timestamp`. Buckets are aligned to midnight.
pub fn bucket_start(timestamp: NaiveDateTime, width_seconds: i64) -> NaiveDateTime {
    let since_midnight = i64::from(timestamp.num_seconds_from_midnight());
    timestamp
        - Duration::seconds(since_midnight % width_seconds)
        - Duration::nanoseconds(i64::from(timestamp.nanosecond()))
}

/// Resample into contiguous fixed-width buckets holding the max count of each window
pub fn resample_max(series: &RawSeries, width: Duration) -> Result<BucketedSeries> {
    let width_seconds = check_width(width)?;

    let (first, last) = match (series.first_timestamp(), series.last_timestamp()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Ok(BucketedSeries::new(width, Vec::new())),
    };

    let origin = bucket_start(first, width_seconds);
    let index_of = |timestamp: NaiveDateTime| {
        ((bucket_start(timestamp, width_seconds) - origin).num_seconds() / width_seconds) as usize
    };

    let count = index_of(last) + 1;
    let mut buckets: Vec<Bucket> = (0..count)
        .map(|i| Bucket {
            start: origin + Duration::seconds(i as i64 * width_seconds),
            max: None,
        })
        .collect();

    for observation in series.observations() {
        let bucket = &mut buckets[index_of(observation.timestamp)];
        bucket.max = Some(bucket.max.map_or(observation.count, |m| m.max(observation.count)));
    }

    let resampled = BucketedSeries::new(width, buckets);
    debug!(
        buckets = resampled.len(),
        occupied = resampled.occupied(),
        "resampled series"
    );
    Ok(resampled)
}
