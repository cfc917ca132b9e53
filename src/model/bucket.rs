use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// A fixed-width time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket {
    /// Inclusive start of the window
    pub start: NaiveDateTime,
    /// Max count observed in the window, None if nothing was observed
    pub max: Option<i64>,
}

/// Contiguous run of equally wide buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketedSeries {
    width: Duration,
    buckets: Vec<Bucket>,
}

impl BucketedSeries {
    pub fn new(width: Duration, buckets: Vec<Bucket>) -> Self {
        Self { width, buckets }
    }

    pub fn width(&self) -> Duration {
        self.width
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Display position of a bucket: the middle of its window
    pub fn midpoint(&self, bucket: &Bucket) -> NaiveDateTime {
        bucket.start + self.width / 2
    }

    /// Occupied buckets as (midpoint, max) pairs
    pub fn points(&self) -> impl Iterator<Item = (NaiveDateTime, i64)> + '_ {
        self.buckets
            .iter()
            .filter_map(move |b| b.max.map(|max| (self.midpoint(b), max)))
    }

    pub fn occupied(&self) -> usize {
        self.buckets.iter().filter(|b| b.max.is_some()).count()
    }
}
