use std::collections::HashMap;

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::Serialize;

/// Weekdays in axis order
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A position within the week: weekday plus time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlot {
    pub weekday: Weekday,
    pub time: NaiveTime,
}

impl TimeSlot {
    pub fn new(weekday: Weekday, time: NaiveTime) -> Self {
        Self { weekday, time }
    }

    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self::new(datetime.weekday(), datetime.time())
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }

    /// "HH"
    pub fn hour_label(&self) -> String {
        format!("{:02}", self.time.hour())
    }

    /// "HH:MM"
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Flat category label, e.g. "Monday 10:45"
    pub fn label(&self) -> String {
        format!("{} {}", self.weekday_name(), self.time_label())
    }
}

/// ISO 8601 calendar week
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WeekKey {
    pub iso_year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        let iso = datetime.iso_week();
        Self {
            iso_year: iso.year(),
            week: iso.week(),
        }
    }
}

/// One heatmap cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    /// Bucket midpoint the cell was taken from
    pub timestamp: NaiveDateTime,
    pub slot: TimeSlot,
    pub week: WeekKey,
    pub value: i64,
}

/// Sparse week-by-slot grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyGrid {
    /// Every slot of the week in axis order, whether or not it holds data
    pub slots: Vec<TimeSlot>,
    /// Weeks holding data, most recent first
    pub weeks: Vec<WeekKey>,
    pub cells: Vec<GridCell>,
}

impl WeeklyGrid {
    pub fn slot_labels(&self) -> Vec<String> {
        self.slots.iter().map(TimeSlot::label).collect()
    }

    /// Spans a single ISO year, so bare week numbers are unambiguous
    fn single_year(&self) -> bool {
        match self.weeks.first() {
            Some(first) => self.weeks.iter().all(|w| w.iso_year == first.iso_year),
            None => true,
        }
    }

    pub fn week_label(&self, week: &WeekKey) -> String {
        if self.single_year() {
            week.week.to_string()
        } else {
            format!("{}-W{:02}", week.iso_year, week.week)
        }
    }

    pub fn week_labels(&self) -> Vec<String> {
        self.weeks.iter().map(|w| self.week_label(w)).collect()
    }

    pub fn get(&self, slot: &TimeSlot, week: &WeekKey) -> Option<i64> {
        self.cells
            .iter()
            .find(|c| c.slot == *slot && c.week == *week)
            .map(|c| c.value)
    }

    /// Values as rows (one per week, in `weeks` order) of columns (one per slot)
    pub fn matrix(&self) -> Vec<Vec<Option<i64>>> {
        let slot_index: HashMap<&TimeSlot, usize> =
            self.slots.iter().enumerate().map(|(i, s)| (s, i)).collect();
        let week_index: HashMap<&WeekKey, usize> =
            self.weeks.iter().enumerate().map(|(i, w)| (w, i)).collect();

        let mut rows = vec![vec![None; self.slots.len()]; self.weeks.len()];
        for cell in &self.cells {
            if let (Some(&row), Some(&col)) = (week_index.get(&cell.week), slot_index.get(&cell.slot)) {
                rows[row][col] = Some(cell.value);
            }
        }
        rows
    }
}
