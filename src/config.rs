use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime};
use serde::Serialize;

use crate::error::{BusyplotError, Result};

pub const DEFAULT_TABLE: &str = "bergwelt";
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "datetime";
pub const DEFAULT_COUNT_COLUMN: &str = "present";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Upstream records local time two hours behind; shifted on load until fixed at the source.
pub const DEFAULT_SHIFT_HOURS: i64 = 2;
pub const DEFAULT_BUCKET_MINUTES: u32 = 30;
pub const DEFAULT_COLOR_CEILING: f64 = 30.0;
pub const DEFAULT_OPENING_HOURS: &str = "10:30-21:00";
pub const DEFAULT_TITLE: &str = "DAV busy plot";
pub const DEFAULT_FILENAME: &str = "dav-busyplot.html";

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Where and how to read the observations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceConfig {
    pub table: String,
    pub timestamp_column: String,
    pub count_column: String,
    pub timestamp_format: String,
    /// Hours added to every stored timestamp
    pub shift_hours: i64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
            count_column: DEFAULT_COUNT_COLUMN.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            shift_hours: DEFAULT_SHIFT_HOURS,
        }
    }
}

impl SourceConfig {
    pub fn shift(&self) -> Result<Duration> {
        Duration::try_hours(self.shift_hours).ok_or(BusyplotError::InvalidShift(self.shift_hours))
    }
}

/// Daily wall-clock window, inclusive at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpeningHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl OpeningHours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self> {
        if open >= close {
            return Err(BusyplotError::InvalidOpeningHours(format!(
                "opening time {} is not before closing time {}",
                open.format("%H:%M"),
                close.format("%H:%M")
            )));
        }
        Ok(Self { open, close })
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.open && time <= self.close
    }
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(10, 30, 0).unwrap_or_default(),
            close: NaiveTime::from_hms_opt(21, 0, 0).unwrap_or_default(),
        }
    }
}

impl FromStr for OpeningHours {
    type Err = BusyplotError;

    fn from_str(s: &str) -> Result<Self> {
        let (open, close) = s.split_once('-').ok_or_else(|| {
            BusyplotError::InvalidOpeningHours(format!("{s:?} is not of the form HH:MM-HH:MM"))
        })?;

        let parse = |part: &str| {
            NaiveTime::parse_from_str(part.trim(), "%H:%M").map_err(|e| {
                BusyplotError::InvalidOpeningHours(format!("{part:?}: {e}"))
            })
        };

        Self::new(parse(open)?, parse(close)?)
    }
}

impl fmt::Display for OpeningHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.open.format("%H:%M"), self.close.format("%H:%M"))
    }
}

/// Everything that shapes a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportConfig {
    pub source: SourceConfig,
    pub bucket_minutes: u32,
    pub opening_hours: OpeningHours,
    /// Upper end of the color domain; both charts saturate here
    pub color_ceiling: f64,
    pub title: String,
    pub show_legend: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            bucket_minutes: DEFAULT_BUCKET_MINUTES,
            opening_hours: OpeningHours::default(),
            color_ceiling: DEFAULT_COLOR_CEILING,
            title: DEFAULT_TITLE.to_string(),
            show_legend: false,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bucket_minutes == 0 || MINUTES_PER_DAY % self.bucket_minutes != 0 {
            return Err(BusyplotError::InvalidBucketWidth(i64::from(self.bucket_minutes) * 60));
        }
        if !(self.color_ceiling.is_finite() && self.color_ceiling > 0.0) {
            return Err(BusyplotError::InvalidCeiling(self.color_ceiling));
        }
        self.source.shift()?;
        if self.opening_hours.open >= self.opening_hours.close {
            return Err(BusyplotError::InvalidOpeningHours(self.opening_hours.to_string()));
        }
        Ok(())
    }

    pub fn bucket_width(&self) -> Duration {
        Duration::minutes(i64::from(self.bucket_minutes))
    }
}
