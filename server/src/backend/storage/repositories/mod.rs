// Repository modules
pub mod profile_repository;
pub mod journal_repository;
pub mod badge_repository;
pub mod preference_repository;

// Re-export repository types
pub use profile_repository::ProfileRepository;
pub use journal_repository::{EntryStats, JournalRepository};
pub use badge_repository::BadgeRepository;
pub use preference_repository::PreferenceRepository;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Timestamps are stored as RFC 3339 text in UTC with microsecond precision,
/// so lexical order in SQL matches chronological order
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .with_context(|| format!("Invalid stored timestamp: {}", value))
}

pub(crate) fn parse_optional_timestamp(value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    value.as_deref().map(parse_timestamp).transpose()
}

/// Calendar dates are stored as YYYY-MM-DD text
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid stored date: {}", value))
}

/// SQLite hands back i64 for every INTEGER column
pub(crate) fn to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
