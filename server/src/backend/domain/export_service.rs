//! Full data export for one user.

use chrono::Utc;
use tracing::info;

use crate::backend::domain::badge_service::BadgeService;
use crate::backend::domain::commands::account::UserDataBundle;
use crate::backend::domain::error::DomainResult;
use crate::backend::domain::profile_service::ProfileService;
use crate::backend::storage::{DbConnection, JournalRepository, PreferenceRepository};

#[derive(Clone)]
pub struct ExportService {
    profile_service: ProfileService,
    badge_service: BadgeService,
    journal_repository: JournalRepository,
    preference_repository: PreferenceRepository,
}

impl ExportService {
    pub fn new(db: DbConnection, profile_service: ProfileService, badge_service: BadgeService) -> Self {
        Self {
            profile_service,
            badge_service,
            journal_repository: JournalRepository::new(db.clone()),
            preference_repository: PreferenceRepository::new(db),
        }
    }

    /// Profile, every entry (newest first), badge progress and preferences
    pub async fn export_user_data(&self, user_id: &str) -> DomainResult<UserDataBundle> {
        let profile = self.profile_service.get_profile(user_id).await?;
        let entries = self.journal_repository.list_entries(user_id).await?;
        let badges = self.badge_service.list_badges(user_id).await?;
        let preferences = self.preference_repository.list_values(user_id).await?;

        info!(
            "Exported data for {}: {} entries, {} preferences",
            user_id,
            entries.len(),
            preferences.len()
        );

        Ok(UserDataBundle {
            exported_at: Utc::now(),
            profile,
            entries,
            badges,
            preferences,
        })
    }
}
