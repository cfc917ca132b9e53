use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BusyplotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Invalid timestamp {value:?} (expected format {format:?})")]
    InvalidTimestamp { value: String, format: String },

    #[error("Invalid opening hours: {0}")]
    InvalidOpeningHours(String),

    #[error("Invalid bucket width: {0} seconds (must divide a day)")]
    InvalidBucketWidth(i64),

    #[error("Invalid clock shift: {0} hours")]
    InvalidShift(i64),

    #[error("Invalid count {value} at {timestamp:?} (expected an integer)")]
    InvalidCount { value: String, timestamp: String },

    #[error("Invalid color ceiling: {0} (must be positive)")]
    InvalidCeiling(f64),

    #[error("Charting runtime not found: {}", .0.display())]
    RuntimeAssetMissing(PathBuf),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BusyplotError>;
