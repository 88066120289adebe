//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod journal {
    use chrono::{DateTime, NaiveDate, Utc};
    use shared::{EntrySort, Mood};

    use crate::backend::domain::badge_service::BadgeStatus;
    use crate::backend::domain::models::journal_entry::DomainJournalEntry;

    /// Input for creating a new journal entry.
    #[derive(Debug, Clone)]
    pub struct CreateEntryCommand {
        pub user_id: String,
        pub content: String,
        pub mood: Mood,
        pub photo_url: Option<String>,
        pub prompt: Option<String>,
        pub created_at: Option<DateTime<Utc>>,
    }

    /// Input for a partial entry update. `None` leaves a field untouched.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateEntryCommand {
        pub content: Option<String>,
        pub mood: Option<Mood>,
        pub photo_url: Option<String>,
    }

    /// In-memory filter applied to a user's entries.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct EntryFilter {
        pub mood: Option<Mood>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub search: Option<String>,
        pub sort: EntrySort,
    }

    /// Result of creating an entry.
    #[derive(Debug, Clone)]
    pub struct CreateEntryResult {
        pub entry: DomainJournalEntry,
        pub current_streak: u32,
        pub newly_earned: Vec<BadgeStatus>,
    }
}

pub mod account {
    use chrono::{DateTime, Utc};

    use crate::backend::domain::badge_service::BadgeStatus;
    use crate::backend::domain::models::journal_entry::DomainJournalEntry;
    use crate::backend::domain::models::profile::DomainProfile;

    /// Everything stored for one user, gathered for export.
    #[derive(Debug, Clone)]
    pub struct UserDataBundle {
        pub exported_at: DateTime<Utc>,
        pub profile: DomainProfile,
        pub entries: Vec<DomainJournalEntry>,
        pub badges: Vec<BadgeStatus>,
        pub preferences: Vec<(String, String)>,
    }

    /// Rows removed when a user's data is deleted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DeletedCounts {
        pub entries: u64,
        pub badges: u64,
        pub preferences: u64,
        pub profiles: u64,
    }
}

pub mod checkout {
    /// Configured price and default redirect URLs.
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct CheckoutSettings {
        pub price_id: Option<String>,
        pub success_url: String,
        pub cancel_url: String,
    }

    /// Parameters handed to the payment gateway.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CheckoutSessionParams {
        pub client_reference_id: String,
        pub price_id: String,
        pub success_url: String,
        pub cancel_url: String,
    }

    /// Session returned by the payment gateway.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CheckoutSession {
        pub id: String,
        pub url: String,
    }
}
