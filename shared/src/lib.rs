use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-reported mood for a journal entry, serialized as its 1-5 level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mood {
    Awful = 1,
    Bad = 2,
    Okay = 3,
    Good = 4,
    Great = 5,
}

impl Mood {
    /// All mood levels, lowest first
    pub const ALL: [Mood; 5] = [Mood::Awful, Mood::Bad, Mood::Okay, Mood::Good, Mood::Great];

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn from_level(level: u8) -> Result<Self, MoodError> {
        match level {
            1 => Ok(Mood::Awful),
            2 => Ok(Mood::Bad),
            3 => Ok(Mood::Okay),
            4 => Ok(Mood::Good),
            5 => Ok(Mood::Great),
            other => Err(MoodError::OutOfRange(other as i64)),
        }
    }

    /// Human-readable label used in prompts and exports
    pub fn label(self) -> &'static str {
        match self {
            Mood::Awful => "awful",
            Mood::Bad => "bad",
            Mood::Okay => "okay",
            Mood::Good => "good",
            Mood::Great => "great",
        }
    }
}

impl TryFrom<u8> for Mood {
    type Error = MoodError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Mood::from_level(level)
    }
}

impl TryFrom<i64> for Mood {
    type Error = MoodError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        u8::try_from(level)
            .map_err(|_| MoodError::OutOfRange(level))
            .and_then(Mood::from_level)
    }
}

impl From<Mood> for u8 {
    fn from(mood: Mood) -> u8 {
        mood.level()
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoodError {
    OutOfRange(i64),
}

impl fmt::Display for MoodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoodError::OutOfRange(level) => {
                write!(f, "Mood level must be between 1 and 5, got {}", level)
            }
        }
    }
}

impl std::error::Error for MoodError {}

/// Subscription tier stored on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

impl SubscriptionTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Premium => "premium",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "free" => Some(SubscriptionTier::Free),
            "premium" => Some(SubscriptionTier::Premium),
            _ => None,
        }
    }
}

/// Every response body is wrapped in this envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Calendar date of the most recent entry (YYYY-MM-DD)
    pub last_entry_date: Option<String>,
    pub subscription_tier: SubscriptionTier,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub user_id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSubscriptionRequest {
    pub tier: SubscriptionTier,
}

// ---------------------------------------------------------------------------
// Journal entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub mood: Mood,
    pub photo_url: Option<String>,
    /// Companion prompt the entry was written against, if any
    pub prompt: Option<String>,
    /// RFC 3339 timestamp
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    pub content: String,
    pub mood: Mood,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    /// Optional backdate (RFC 3339) - uses current time if not provided
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEntryResponse {
    pub entry: JournalEntry,
    pub current_streak: u32,
    pub newly_earned_badges: Vec<BadgeProgress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UpdateEntryRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntrySort {
    #[default]
    Newest,
    Oldest,
    MoodHigh,
    MoodLow,
}

/// Query string accepted by the entry listing endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EntryListQuery {
    pub mood: Option<u8>,
    /// Inclusive, YYYY-MM-DD
    pub start_date: Option<String>,
    /// Inclusive, YYYY-MM-DD
    pub end_date: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort: EntrySort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryListResponse {
    pub entries: Vec<JournalEntry>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDateGroup {
    /// YYYY-MM-DD
    pub date: String,
    pub entries: Vec<JournalEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSummary {
    pub counts: Vec<MoodCount>,
    pub total: usize,
    pub average: Option<f64>,
    pub most_frequent: Option<Mood>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteEntryResponse {
    pub deleted_id: String,
}

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeProgress {
    pub badge_id: String,
    pub name: String,
    pub description: String,
    pub progress: u32,
    pub target: u32,
    /// 0-100, rounded down
    pub percent: u8,
    pub earned: bool,
    pub earned_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeListResponse {
    pub badges: Vec<BadgeProgress>,
    pub earned_count: usize,
}

// ---------------------------------------------------------------------------
// Companion (AI text)
// ---------------------------------------------------------------------------

/// Where a piece of companion text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedBy {
    Openai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GeneratePromptRequest {
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateAffirmationRequest {
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateMoodQuoteRequest {
    pub mood: Mood,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedText {
    pub text: String,
    pub generated_by: GeneratedBy,
}

// ---------------------------------------------------------------------------
// Export / deletion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDataRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDataExport {
    pub exported_at: String,
    pub profile: Profile,
    pub entries: Vec<JournalEntry>,
    pub badges: Vec<BadgeProgress>,
    pub preferences: Vec<PreferenceEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteAccountResponse {
    pub user_id: String,
    pub deleted_entries: u64,
    pub deleted_badges: u64,
    pub deleted_preferences: u64,
}

// ---------------------------------------------------------------------------
// Checkout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub user_id: String,
    #[serde(default)]
    pub success_url: Option<String>,
    #[serde(default)]
    pub cancel_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub session_id: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPreferenceRequest {
    pub value: String,
}

/// `?default=` turns a missing or unreadable preference into that value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceQuery {
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceListResponse {
    pub preferences: Vec<PreferenceEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_levels() {
        assert_eq!(Mood::from_level(1), Ok(Mood::Awful));
        assert_eq!(Mood::from_level(5), Ok(Mood::Great));
        assert_eq!(Mood::from_level(0), Err(MoodError::OutOfRange(0)));
        assert_eq!(Mood::from_level(6), Err(MoodError::OutOfRange(6)));
        assert_eq!(Mood::try_from(-1i64), Err(MoodError::OutOfRange(-1)));
        assert_eq!(Mood::Good.level(), 4);
    }

    #[test]
    fn test_mood_serializes_as_integer() {
        let json = serde_json::to_string(&Mood::Okay).unwrap();
        assert_eq!(json, "3");

        let parsed: Mood = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, Mood::Bad);

        assert!(serde_json::from_str::<Mood>("9").is_err());
    }

    #[test]
    fn test_generated_by_wire_names() {
        let text = GeneratedText {
            text: "Write about today".to_string(),
            generated_by: GeneratedBy::Fallback,
        };
        let value = serde_json::to_value(&text).unwrap();
        assert_eq!(value["generated_by"], "fallback");

        let value = serde_json::to_value(GeneratedBy::Openai).unwrap();
        assert_eq!(value, "openai");
    }

    #[test]
    fn test_envelope_shapes() {
        let ok = serde_json::to_value(ApiEnvelope::ok(5)).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "data": 5}));

        let failure = serde_json::to_value(ApiEnvelope::<()>::failure("nope")).unwrap();
        assert_eq!(failure, serde_json::json!({"success": false, "error": "nope"}));
    }

    #[test]
    fn test_entry_list_query_defaults() {
        let query: EntryListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.sort, EntrySort::Newest);
        assert!(query.mood.is_none());

        let query: EntryListQuery = serde_json::from_str(r#"{"sort":"mood_high"}"#).unwrap();
        assert_eq!(query.sort, EntrySort::MoodHigh);
    }

    #[test]
    fn test_subscription_tier_parse() {
        assert_eq!(SubscriptionTier::parse("premium"), Some(SubscriptionTier::Premium));
        assert_eq!(SubscriptionTier::parse("gold"), None);
        assert_eq!(SubscriptionTier::Free.as_str(), "free");
        assert_eq!(SubscriptionTier::default(), SubscriptionTier::Free);
    }
}
