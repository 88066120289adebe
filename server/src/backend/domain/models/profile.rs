use chrono::{DateTime, NaiveDate, Utc};
use shared::SubscriptionTier;

pub const MAX_DISPLAY_NAME_CHARS: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainProfile {
    pub id: String,
    pub display_name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_entry_date: Option<NaiveDate>,
    pub subscription_tier: SubscriptionTier,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DomainProfile {
    /// A fresh free-tier profile with no streak
    pub fn new(id: &str, display_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            current_streak: 0,
            longest_streak: 0,
            last_entry_date: None,
            subscription_tier: SubscriptionTier::Free,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_premium(&self) -> bool {
        self.subscription_tier == SubscriptionTier::Premium
    }
}

/// Streak counters after recording an entry on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_entry_date: NaiveDate,
}

/// Compute streak counters for an entry written on `entry_date`.
///
/// Backdated entries (before the last recorded day) leave the streak alone.
pub fn next_streak(
    last_entry_date: Option<NaiveDate>,
    entry_date: NaiveDate,
    current_streak: u32,
    longest_streak: u32,
) -> StreakUpdate {
    let (current, last) = match last_entry_date {
        None => (1, entry_date),
        Some(last) if entry_date < last => (current_streak, last),
        Some(last) if entry_date == last => (current_streak.max(1), last),
        Some(last) if last.succ_opt() == Some(entry_date) => (current_streak + 1, entry_date),
        Some(_) => (1, entry_date),
    };

    StreakUpdate {
        current_streak: current,
        longest_streak: longest_streak.max(current),
        last_entry_date: last,
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("User id cannot be empty")]
    EmptyUserId,
    #[error("User id cannot start or end with whitespace")]
    UserIdWhitespace,
    #[error("Display name cannot be empty")]
    EmptyDisplayName,
    #[error("Display name cannot exceed {MAX_DISPLAY_NAME_CHARS} characters")]
    DisplayNameTooLong,
}

pub fn validate_display_name(name: &str) -> Result<String, ProfileValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProfileValidationError::EmptyDisplayName);
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(ProfileValidationError::DisplayNameTooLong);
    }
    Ok(trimmed.to_string())
}

/// Ids are used verbatim in every path, so they are never trimmed
pub fn validate_user_id(user_id: &str) -> Result<&str, ProfileValidationError> {
    if user_id.trim().is_empty() {
        return Err(ProfileValidationError::EmptyUserId);
    }
    if user_id.trim() != user_id {
        return Err(ProfileValidationError::UserIdWhitespace);
    }
    Ok(user_id)
}
