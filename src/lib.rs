pub mod error;
pub mod config;
pub mod model;
pub mod loader;
pub mod analyzer;
pub mod visualization;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::analyzer::{build_weekly_grid, resample_max};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::loader::load_series;
use crate::model::{BucketedSeries, RawSeries, WeeklyGrid};
use crate::visualization::{generate_html, LinearColorMapper, RuntimeAsset, VizBarChart, VizData, VizHeatmap};

pub use crate::config::{OpeningHours, SourceConfig};
pub use crate::error::BusyplotError;

/// Loaded series plus the settings that shape its report
pub struct Report {
    pub config: ReportConfig,
    series: RawSeries,
}

impl Report {
    /// Load the full series from a SQLite store
    pub fn load<P: AsRef<Path>>(path: P, config: ReportConfig) -> Result<Self> {
        config.validate()?;
        let series = load_series(path, &config.source)?;
        Ok(Self { config, series })
    }

    /// Build a report over an already loaded series
    pub fn from_series(series: RawSeries, config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, series })
    }

    pub fn series(&self) -> &RawSeries {
        &self.series
    }

    /// Max-resampled view used by both charts
    pub fn bucketed(&self) -> Result<BucketedSeries> {
        resample_max(&self.series, self.config.bucket_width())
    }

    /// Heatmap view restricted to opening hours
    pub fn weekly_grid(&self) -> Result<WeeklyGrid> {
        Ok(build_weekly_grid(&self.bucketed()?, &self.config.opening_hours))
    }

    /// Generate visualization data for both charts
    pub fn generate_viz_data(&self) -> Result<VizData> {
        let bucketed = self.bucketed()?;
        let grid = build_weekly_grid(&bucketed, &self.config.opening_hours);

        // One mapper for both charts keeps their colors comparable
        let mapper = LinearColorMapper::busyness(self.config.color_ceiling);
        let legend = self.config.show_legend;

        info!(
            buckets = bucketed.occupied(),
            weeks = grid.weeks.len(),
            cells = grid.cells.len(),
            ceiling = self.config.color_ceiling,
            "prepared chart data"
        );

        Ok(VizData {
            title: self.config.title.clone(),
            all_time: VizBarChart::from_series(&bucketed, &mapper, legend),
            heatmap: VizHeatmap::from_grid(&grid, &mapper, legend),
        })
    }

    /// Write `<outdir>/<filename>` and, for a local runtime, the runtime beside it
    pub fn generate_report<P: AsRef<Path>>(
        &self,
        outdir: P,
        filename: &str,
        runtime: &RuntimeAsset,
    ) -> Result<PathBuf> {
        let outdir = outdir.as_ref();
        let viz_data = self.generate_viz_data()?;

        runtime.install(outdir)?;
        let output_path = outdir.join(filename);
        generate_html(&viz_data, runtime, &output_path)?;

        info!(path = %output_path.display(), "report written");
        Ok(output_path)
    }
}

/// Print a short summary of the loaded series
pub fn print_series_info(report: &Report) {
    let series = report.series();
    let config = &report.config;

    println!("Busy Plot Summary");
    println!("=================");
    println!("Table: {}", config.source.table);
    println!("Observations: {}", series.len());

    match (series.first_timestamp(), series.last_timestamp()) {
        (Some(first), Some(last)) => {
            println!("First: {}", first);
            println!("Last: {}", last);
        }
        _ => println!("First/Last: (no data)"),
    }

    if let Some(max) = series.max_count() {
        println!("Peak count: {}", max);
    }

    println!("Bucket width: {} min", config.bucket_minutes);
    println!("Opening hours: {}", config.opening_hours);
    println!("Color ceiling: {}", config.color_ceiling);

    if let Ok(grid) = report.weekly_grid() {
        println!("Weeks with data: {}", grid.weeks.len());
    }
}
