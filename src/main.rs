use std::path::PathBuf;
use clap::Parser;
use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use busyplot::config::{self, ReportConfig, SourceConfig};
use busyplot::visualization::RuntimeAsset;
use busyplot::{print_series_info, OpeningHours, Report};

#[derive(Parser)]
#[command(name = "busyplot")]
#[command(author, version, about = "Render visitor counts from SQLite into an HTML report")]
struct Cli {
    /// Path to SQLite database file
    #[arg(value_name = "DATABASE")]
    database: PathBuf,

    /// Directory to write the report into (must exist)
    #[arg(value_name = "OUTDIR")]
    outdir: PathBuf,

    /// Report file name inside OUTDIR
    #[arg(long, default_value = config::DEFAULT_FILENAME)]
    filename: String,

    /// Copy this Plotly bundle next to the report instead of loading it from the CDN
    #[arg(long, value_name = "PATH")]
    local_runtime: Option<PathBuf>,

    /// Count at which the color scale saturates
    #[arg(long, default_value_t = config::DEFAULT_COLOR_CEILING)]
    ceiling: f64,

    /// Daily window shown in the heatmap, HH:MM-HH:MM (inclusive)
    #[arg(long, default_value = config::DEFAULT_OPENING_HOURS)]
    opening_hours: OpeningHours,

    /// Resampling width in minutes
    #[arg(long, default_value_t = config::DEFAULT_BUCKET_MINUTES)]
    bucket_minutes: u32,

    /// Hours added to every stored timestamp
    #[arg(long, default_value_t = config::DEFAULT_SHIFT_HOURS, allow_hyphen_values = true)]
    shift_hours: i64,

    /// Source table
    #[arg(long, default_value = config::DEFAULT_TABLE)]
    table: String,

    /// Timestamp column
    #[arg(long, default_value = config::DEFAULT_TIMESTAMP_COLUMN)]
    timestamp_column: String,

    /// Visitor count column
    #[arg(long, default_value = config::DEFAULT_COUNT_COLUMN)]
    count_column: String,

    /// Document title
    #[arg(long, default_value = config::DEFAULT_TITLE)]
    title: String,

    /// Show the color-scale legend
    #[arg(long)]
    legend: bool,

    /// Print a summary of the loaded series
    #[arg(long)]
    summary: bool,

    /// Log filter (e.g. info, debug, busyplot=trace)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            source: SourceConfig {
                table: self.table.clone(),
                timestamp_column: self.timestamp_column.clone(),
                count_column: self.count_column.clone(),
                shift_hours: self.shift_hours,
                ..SourceConfig::default()
            },
            bucket_minutes: self.bucket_minutes,
            opening_hours: self.opening_hours,
            color_ceiling: self.ceiling,
            title: self.title.clone(),
            show_legend: self.legend,
        }
    }

    fn runtime(&self) -> RuntimeAsset {
        match &self.local_runtime {
            Some(source) => RuntimeAsset::Local { source: source.clone() },
            None => RuntimeAsset::Cdn,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let report = Report::load(&cli.database, cli.report_config())?;

    if cli.summary {
        print_series_info(&report);
    }

    let output_path = report.generate_report(&cli.outdir, &cli.filename, &cli.runtime())?;
    info!(database = %cli.database.display(), "done");

    println!("Report generated: {}", output_path.display());

    Ok(())
}
