//! Per-table repositories
//!
//! Each repo holds the shared connection and exposes bound-parameter CRUD
//! for one table. Enum validation and record conversion live a layer up in
//! the services.

mod activity_repo;
mod category_repo;
mod comment_repo;
mod complaint_repo;
mod profile_repo;
mod role_repo;

pub use activity_repo::*;
pub use category_repo::*;
pub use comment_repo::*;
pub use complaint_repo::*;
pub use profile_repo::*;
pub use role_repo::*;

use chrono::{DateTime, Utc};

/// Format a timestamp for storage
pub(crate) fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

/// Parse a stored timestamp
pub(crate) fn parse_ts(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

/// Read a required timestamp column
pub(crate) fn ts_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let value: String = row.get(idx)?;
    parse_ts(&value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Read an optional timestamp column
pub(crate) fn opt_ts_column(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let value: Option<String> = row.get(idx)?;
    match value {
        Some(s) => parse_ts(&s)
            .map(Some)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_round_trip() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
        let stored = fmt_ts(&ts);
        assert_eq!(parse_ts(&stored).unwrap(), ts);
    }

    #[test]
    fn test_stored_timestamps_sort_chronologically() {
        let early = fmt_ts(&Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap());
        let late = fmt_ts(&Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap());
        assert!(early < late);
    }
}
