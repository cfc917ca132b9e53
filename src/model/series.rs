use chrono::NaiveDateTime;
use serde::Serialize;

/// One row of the source table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// Local wall-clock time of the sample (already shifted)
    pub timestamp: NaiveDateTime,
    /// Number of people present
    pub count: i64,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, count: i64) -> Self {
        Self { timestamp, count }
    }
}

/// Time-ordered observations covering the whole table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawSeries {
    observations: Vec<Observation>,
}

impl RawSeries {
    /// Build a series, ordering the observations by time
    pub fn new(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|o| o.timestamp);
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.observations.first().map(|o| o.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.observations.last().map(|o| o.timestamp)
    }

    /// Largest count in the series
    pub fn max_count(&self) -> Option<i64> {
        self.observations.iter().map(|o| o.count).max()
    }
}

impl FromIterator<Observation> for RawSeries {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn orders_observations_by_time() {
        let series: RawSeries = [
            Observation::new(ts("2024-01-02 10:00:00"), 4),
            Observation::new(ts("2024-01-01 10:00:00"), 7),
            Observation::new(ts("2024-01-01 11:00:00"), 2),
        ]
        .into_iter()
        .collect();

        let counts: Vec<_> = series.observations().iter().map(|o| o.count).collect();
        assert_eq!(counts, vec![7, 2, 4]);
        assert_eq!(series.first_timestamp(), Some(ts("2024-01-01 10:00:00")));
        assert_eq!(series.last_timestamp(), Some(ts("2024-01-02 10:00:00")));
        assert_eq!(series.max_count(), Some(7));
    }

    #[test]
    fn empty_series_has_no_bounds() {
        let series = RawSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.first_timestamp(), None);
        assert_eq!(series.max_count(), None);
    }
}
