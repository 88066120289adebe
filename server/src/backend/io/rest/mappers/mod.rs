pub mod account_mapper;
pub mod badge_mapper;
pub mod entry_mapper;
pub mod profile_mapper;

use chrono::{DateTime, SecondsFormat, Utc};

/// Wire format for every timestamp in a response body
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
