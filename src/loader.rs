use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info, warn};

use crate::config::SourceConfig;
use crate::error::{BusyplotError, Result};
use crate::model::{Observation, RawSeries};

/// Quote an SQL identifier, doubling embedded backticks.
/// Backticks never fall back to string literals the way double quotes can.
fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Build the query that reads the whole source table in time order
pub fn select_query(source: &SourceConfig) -> String {
    let timestamp = quote_identifier(&source.timestamp_column);
    format!(
        "SELECT {}, {} FROM {} ORDER BY {}",
        timestamp,
        quote_identifier(&source.count_column),
        quote_identifier(&source.table),
        timestamp,
    )
}

/// Parse a stored timestamp and apply the configured clock shift
pub fn parse_timestamp(value: &str, source: &SourceConfig) -> Result<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(value, &source.timestamp_format).map_err(|_| {
        BusyplotError::InvalidTimestamp {
            value: value.to_string(),
            format: source.timestamp_format.clone(),
        }
    })?;
    parsed
        .checked_add_signed(source.shift()?)
        .ok_or(BusyplotError::InvalidShift(source.shift_hours))
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64
}

/// Interpret a stored count. Integral reals are accepted; NULL means no sample.
pub fn parse_count(value: Value, timestamp: &str) -> Result<Option<i64>> {
    let invalid = |value: String| BusyplotError::InvalidCount {
        value,
        timestamp: timestamp.to_string(),
    };

    match value {
        Value::Null => Ok(None),
        Value::Integer(count) => Ok(Some(count)),
        Value::Real(count) if is_integral(count) => Ok(Some(count as i64)),
        Value::Real(count) => Err(invalid(count.to_string())),
        Value::Text(text) => Err(invalid(format!("{text:?}"))),
        Value::Blob(bytes) => Err(invalid(format!("<{} byte blob>", bytes.len()))),
    }
}

/// Read every observation from an open connection
pub fn read_series(conn: &Connection, source: &SourceConfig) -> Result<RawSeries> {
    let sql = select_query(source);
    debug!(%sql, "querying observations");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, Value>(1)?))
    })?;

    let mut observations = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        let (timestamp, count) = row?;
        match parse_count(count, &timestamp)? {
            Some(count) => observations.push(Observation::new(parse_timestamp(&timestamp, source)?, count)),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, table = %source.table, "skipped rows without a count");
    }

    Ok(RawSeries::new(observations))
}

/// Open the store read-only and load the full series
pub fn load_series<P: AsRef<Path>>(path: P, source: &SourceConfig) -> Result<RawSeries> {
    let path = path.as_ref();
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    let series = read_series(&conn, source)?;
    info!(
        path = %path.display(),
        rows = series.len(),
        first = ?series.first_timestamp(),
        last = ?series.last_timestamp(),
        "loaded observations"
    );

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_store(rows: &[(&str, Option<i64>)]) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE bergwelt (datetime TEXT, present INTEGER)", [])
            .unwrap();
        for (ts, count) in rows {
            conn.execute(
                "INSERT INTO bergwelt (datetime, present) VALUES (?1, ?2)",
                rusqlite::params![ts, count],
            )
            .unwrap();
        }
        conn
    }

    #[test]
    fn quotes_identifiers() {
        let source = SourceConfig {
            table: "odd`name".to_string(),
            ..SourceConfig::default()
        };
        assert_eq!(
            select_query(&source),
            "SELECT `datetime`, `present` FROM `odd``name` ORDER BY `datetime`"
        );
    }

    #[test]
    fn shifts_timestamps_by_two_hours() {
        let conn = memory_store(&[("2024-01-01 23:30:00", Some(4))]);
        let series = read_series(&conn, &SourceConfig::default()).unwrap();

        let expected = NaiveDateTime::parse_from_str("2024-01-02 01:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(series.observations(), &[Observation::new(expected, 4)]);
    }

    #[test]
    fn skips_rows_without_count() {
        let conn = memory_store(&[
            ("2024-01-01 10:00:00", Some(4)),
            ("2024-01-01 10:01:00", None),
            ("2024-01-01 10:02:00", Some(6)),
        ]);
        let series = read_series(&conn, &SourceConfig::default()).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.max_count(), Some(6));
    }

    #[test]
    fn rejects_malformed_timestamps() {
        let conn = memory_store(&[("01.01.2024 10:00", Some(4))]);
        let err = read_series(&conn, &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, BusyplotError::InvalidTimestamp { .. }));
    }

    #[test]
    fn out_of_range_shift_is_an_error() {
        let conn = memory_store(&[("2024-01-01 10:00:00", Some(4))]);
        let source = SourceConfig {
            shift_hours: 3_000_000_000,
            ..SourceConfig::default()
        };
        let err = read_series(&conn, &source).unwrap_err();
        assert!(matches!(err, BusyplotError::InvalidShift(3_000_000_000)));

        let source = SourceConfig {
            shift_hours: i64::MAX,
            ..SourceConfig::default()
        };
        assert!(matches!(
            parse_timestamp("2024-01-01 10:00:00", &source),
            Err(BusyplotError::InvalidShift(i64::MAX))
        ));
    }

    #[test]
    fn accepts_integral_real_counts() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE bergwelt (datetime TEXT, present REAL)", [])
            .unwrap();
        conn.execute(
            "INSERT INTO bergwelt (datetime, present) VALUES ('2024-01-01 10:00:00', 5.0)",
            [],
        )
        .unwrap();

        let series = read_series(&conn, &SourceConfig::default()).unwrap();
        assert_eq!(series.max_count(), Some(5));

        conn.execute(
            "INSERT INTO bergwelt (datetime, present) VALUES ('2024-01-01 10:01:00', 5.5)",
            [],
        )
        .unwrap();
        let err = read_series(&conn, &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, BusyplotError::InvalidCount { .. }));
    }

    #[test]
    fn parses_count_values() {
        let at = "2024-01-01 10:00:00";
        assert_eq!(parse_count(Value::Integer(7), at).unwrap(), Some(7));
        assert_eq!(parse_count(Value::Real(7.0), at).unwrap(), Some(7));
        assert_eq!(parse_count(Value::Null, at).unwrap(), None);
        assert!(parse_count(Value::Real(f64::NAN), at).is_err());
        assert!(parse_count(Value::Text("7".to_string()), at).is_err());
    }

    #[test]
    fn missing_column_is_an_error() {
        let conn = memory_store(&[]);
        let source = SourceConfig {
            count_column: "visitors".to_string(),
            ..SourceConfig::default()
        };
        assert!(matches!(read_series(&conn, &source), Err(BusyplotError::Sqlite(_))));
    }
}
