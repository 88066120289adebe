//! Account deletion.

use tracing::info;

use crate::backend::domain::commands::account::DeletedCounts;
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::storage::{DbConnection, ProfileRepository};

#[derive(Clone)]
pub struct AccountService {
    profile_repository: ProfileRepository,
}

impl AccountService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            profile_repository: ProfileRepository::new(db),
        }
    }

    /// Remove the profile and everything that belongs to it in one transaction
    pub async fn delete_user_data(&self, user_id: &str) -> DomainResult<DeletedCounts> {
        if !self.profile_repository.profile_exists(user_id).await? {
            return Err(DomainError::NotFound(format!("Profile not found: {}", user_id)));
        }

        let counts = self.profile_repository.delete_user_data(user_id).await?;
        info!(
            "Deleted account {}: {} entries, {} badges, {} preferences",
            user_id, counts.entries, counts.badges, counts.preferences
        );
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::badge_service::BadgeService;
    use crate::backend::domain::commands::journal::CreateEntryCommand;
    use crate::backend::domain::journal_service::JournalService;
    use crate::backend::domain::profile_service::ProfileService;
    use crate::backend::storage::{JournalRepository, PreferenceRepository};
    use chrono::Utc;
    use shared::Mood;

    #[tokio::test]
    async fn test_delete_removes_everything() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let profiles = ProfileService::new(db.clone());
        let journal = JournalService::new(db.clone(), profiles.clone(), BadgeService::new(db.clone()));
        let service = AccountService::new(db.clone());

        journal
            .create_entry(CreateEntryCommand {
                user_id: "user-1".to_string(),
                content: "hello".to_string(),
                mood: Mood::Okay,
                photo_url: None,
                prompt: None,
                created_at: None,
            })
            .await
            .unwrap();
        PreferenceRepository::new(db.clone())
            .put_value("user-1", "theme", "dark", Utc::now())
            .await
            .unwrap();

        let counts = service.delete_user_data("user-1").await.unwrap();
        assert_eq!(counts.entries, 1);
        assert_eq!(counts.preferences, 1);
        assert_eq!(counts.profiles, 1);
        assert!(counts.badges > 0);

        assert!(JournalRepository::new(db.clone()).list_entries("user-1").await.unwrap().is_empty());
        assert!(matches!(
            profiles.get_profile("user-1").await.unwrap_err(),
            DomainError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_user() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let service = AccountService::new(db);
        assert!(matches!(
            service.delete_user_data("ghost").await.unwrap_err(),
            DomainError::NotFound(_)
        ));
    }
}
