use serde::Serialize;

use crate::model::{BucketedSeries, WeeklyGrid};
use crate::visualization::color::LinearColorMapper;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Share of the bucket width a bar occupies
const BAR_WIDTH_FACTOR: f64 = 0.8;

/// Root visualization data structure
#[derive(Debug, Serialize)]
pub struct VizData {
    pub title: String,
    pub all_time: VizBarChart,
    pub heatmap: VizHeatmap,
}

#[derive(Debug, Serialize)]
pub struct VizAxis {
    pub label: String,
}

/// Color domain shared by both charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VizColorScale {
    pub low: f64,
    pub high: f64,
    pub colorscale: Vec<(f64, String)>,
    pub show_legend: bool,
}

impl VizColorScale {
    pub fn from_mapper(mapper: &LinearColorMapper, show_legend: bool) -> Self {
        Self {
            low: mapper.low,
            high: mapper.high,
            colorscale: mapper.colorscale(),
            show_legend,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VizBarChart {
    pub title: String,
    pub x_axis: VizAxis,
    pub y_axis: VizAxis,
    pub tick_format: String,
    /// Bucket midpoints
    pub x: Vec<String>,
    pub y: Vec<i64>,
    pub colors: Vec<String>,
    pub bar_width_ms: f64,
    pub color_scale: VizColorScale,
}

impl VizBarChart {
    pub fn from_series(series: &BucketedSeries, mapper: &LinearColorMapper, show_legend: bool) -> Self {
        let (x, y): (Vec<_>, Vec<_>) = series
            .points()
            .map(|(timestamp, value)| (timestamp.format(DATETIME_FORMAT).to_string(), value))
            .unzip();
        let colors = y.iter().map(|&v| mapper.color(v as f64).to_string()).collect();

        Self {
            title: "Visitors (all time)".to_string(),
            x_axis: VizAxis { label: "Time".to_string() },
            y_axis: VizAxis { label: "People present".to_string() },
            tick_format: "%Y-%m-%d, %a".to_string(),
            x,
            y,
            colors,
            bar_width_ms: series.width().num_milliseconds() as f64 * BAR_WIDTH_FACTOR,
            color_scale: VizColorScale::from_mapper(mapper, show_legend),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VizSlot {
    pub label: String,
    pub weekday: String,
    pub hour: String,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct VizHeatmap {
    pub title: String,
    pub x_axis: VizAxis,
    pub y_axis: VizAxis,
    /// Every slot of the week, Monday first
    pub slots: Vec<VizSlot>,
    /// Week labels, most recent first
    pub weeks: Vec<String>,
    /// One row per week, one column per slot; null where there is no data
    pub z: Vec<Vec<Option<i64>>>,
    pub color_scale: VizColorScale,
}

impl VizHeatmap {
    pub fn from_grid(grid: &WeeklyGrid, mapper: &LinearColorMapper, show_legend: bool) -> Self {
        let slots = grid
            .slots
            .iter()
            .map(|slot| VizSlot {
                label: slot.label(),
                weekday: slot.weekday_name().to_string(),
                hour: slot.hour_label(),
                time: slot.time_label(),
            })
            .collect();

        Self {
            title: "Visitor heatmap by week".to_string(),
            x_axis: VizAxis { label: "Time of week".to_string() },
            y_axis: VizAxis { label: "Calendar week".to_string() },
            slots,
            weeks: grid.week_labels(),
            z: grid.matrix(),
            color_scale: VizColorScale::from_mapper(mapper, show_legend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{build_weekly_grid, resample_max};
    use crate::config::OpeningHours;
    use crate::model::{Observation, RawSeries};
    use chrono::{Duration, NaiveDateTime};

    fn resampled() -> BucketedSeries {
        let raw: RawSeries = [("2024-01-01 12:00:00", 3), ("2024-01-01 12:40:00", 45)]
            .iter()
            .map(|(s, c)| {
                Observation::new(NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).unwrap(), *c)
            })
            .collect();
        resample_max(&raw, Duration::minutes(30)).unwrap()
    }

    #[test]
    fn bars_sit_at_midpoints_with_mapped_colors() {
        let mapper = LinearColorMapper::busyness(30.0);
        let chart = VizBarChart::from_series(&resampled(), &mapper, false);

        assert_eq!(chart.x, vec!["2024-01-01 12:15:00", "2024-01-01 12:45:00"]);
        assert_eq!(chart.y, vec![3, 45]);
        assert_eq!(chart.colors, vec![mapper.color(3.0).to_string(), "#0C0786".to_string()]);
        assert_eq!(chart.bar_width_ms, 0.8 * 30.0 * 60.0 * 1000.0);
    }

    #[test]
    fn heatmap_rows_match_weeks() {
        let mapper = LinearColorMapper::busyness(30.0);
        let grid = build_weekly_grid(&resampled(), &OpeningHours::default());
        let heatmap = VizHeatmap::from_grid(&grid, &mapper, true);

        assert_eq!(heatmap.weeks, vec!["1"]);
        assert_eq!(heatmap.z.len(), 1);
        assert_eq!(heatmap.z[0].len(), heatmap.slots.len());
        assert_eq!(heatmap.slots[0].weekday, "Monday");
        assert_eq!(heatmap.slots[0].hour, "10");
        assert_eq!(heatmap.slots[0].time, "10:45");
        assert!(heatmap.color_scale.show_legend);
    }
}
