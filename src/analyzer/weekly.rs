use chrono::{Duration, NaiveTime};
use tracing::debug;

use crate::config::OpeningHours;
use crate::model::{BucketedSeries, GridCell, TimeSlot, WeekKey, WeeklyGrid, WEEKDAYS};

/// Bucket midpoints of one day that fall inside opening hours
pub fn opening_slots(hours: &OpeningHours, width: Duration) -> Vec<NaiveTime> {
    let width_seconds = width.num_seconds();
    if width_seconds <= 0 {
        return Vec::new();
    }

    (0..)
        .map(|k| k * width_seconds + width_seconds / 2)
        .take_while(|&seconds| seconds < 24 * 60 * 60)
        .filter_map(|seconds| NaiveTime::from_num_seconds_from_midnight_opt(seconds as u32, 0))
        .filter(|&time| hours.contains(time))
        .collect()
}

/// Every (weekday, time) slot of a week in axis order, Monday first
pub fn week_slots(hours: &OpeningHours, width: Duration) -> Vec<TimeSlot> {
    let times = opening_slots(hours, width);
    WEEKDAYS
        .iter()
        .flat_map(|&weekday| times.iter().map(move |&time| TimeSlot::new(weekday, time)))
        .collect()
}

/// Key the occupied in-hours buckets by weekday slot and ISO week
pub fn build_weekly_grid(series: &BucketedSeries, hours: &OpeningHours) -> WeeklyGrid {
    let cells: Vec<GridCell> = series
        .points()
        .filter(|(timestamp, _)| hours.contains(timestamp.time()))
        .map(|(timestamp, value)| GridCell {
            timestamp,
            slot: TimeSlot::from_datetime(timestamp),
            week: WeekKey::from_datetime(timestamp),
            value,
        })
        .collect();

    let mut weeks: Vec<WeekKey> = cells.iter().map(|c| c.week).collect();
    weeks.sort_unstable_by(|a, b| b.cmp(a));
    weeks.dedup();

    let grid = WeeklyGrid {
        slots: week_slots(hours, series.width()),
        weeks,
        cells,
    };
    debug!(
        slots = grid.slots.len(),
        weeks = grid.weeks.len(),
        cells = grid.cells.len(),
        "built weekly grid"
    );
    grid
}
