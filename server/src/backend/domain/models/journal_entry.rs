use chrono::{DateTime, Duration, NaiveDate, Utc};
use shared::Mood;
use uuid::Uuid;

/// Maximum entry length, counted in characters after trimming
pub const MAX_CONTENT_CHARS: usize = 10_000;
pub const MAX_PHOTO_URL_CHARS: usize = 2_048;
/// Allowed lead of a client-supplied timestamp over server time
pub const MAX_CLOCK_SKEW_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainJournalEntry {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub mood: Mood,
    pub photo_url: Option<String>,
    pub prompt: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DomainJournalEntry {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Calendar day the entry belongs to (UTC)
    pub fn entry_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    pub fn has_photo(&self) -> bool {
        self.photo_url.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EntryValidationError {
    #[error("Entry content cannot be empty")]
    EmptyContent,
    #[error("Entry content cannot exceed {MAX_CONTENT_CHARS} characters")]
    ContentTooLong,
    #[error("Photo URL must be an http(s) URL of at most {MAX_PHOTO_URL_CHARS} characters")]
    InvalidPhotoUrl,
    #[error("Entry timestamp cannot be in the future")]
    FutureTimestamp,
}

/// Trim and check entry content, returning the stored form
pub fn validate_content(content: &str) -> Result<String, EntryValidationError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(EntryValidationError::EmptyContent);
    }
    if trimmed.chars().count() > MAX_CONTENT_CHARS {
        return Err(EntryValidationError::ContentTooLong);
    }
    Ok(trimmed.to_string())
}

/// Entries may be backdated but never dated ahead of `now`
pub fn validate_created_at(
    created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, EntryValidationError> {
    match created_at {
        Some(at) if at > now + Duration::seconds(MAX_CLOCK_SKEW_SECS) => {
            Err(EntryValidationError::FutureTimestamp)
        }
        Some(at) => Ok(at),
        None => Ok(now),
    }
}

/// Blank photo URLs are treated as "no photo"
pub fn validate_photo_url(photo_url: Option<&str>) -> Result<Option<String>, EntryValidationError> {
    let Some(url) = photo_url.map(str::trim).filter(|url| !url.is_empty()) else {
        return Ok(None);
    };
    let scheme_ok = url.starts_with("https://") || url.starts_with("http://");
    if !scheme_ok || url.chars().count() > MAX_PHOTO_URL_CHARS {
        return Err(EntryValidationError::InvalidPhotoUrl);
    }
    Ok(Some(url.to_string()))
}
