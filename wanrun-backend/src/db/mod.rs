mod sqlite;
mod tables;

pub use sqlite::Database;
#[cfg(test)]
pub(crate) use sqlite::test_support;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;

/// Parse an RFC 3339 column into UTC, surfacing bad data as a conversion error
pub(crate) fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn parse_date(idx: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ids bound per IN clause; SQLite rejects statements past 32766 variables
pub(crate) const IN_LIST_CHUNK: usize = 500;

/// "?2, ?3, ..." for an IN clause whose values start at parameter `first`
pub(crate) fn placeholders(first: usize, count: usize) -> String {
    (first..first + count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}
