//! Profile management and journaling streaks.

use chrono::Utc;
use shared::SubscriptionTier;
use tracing::info;

use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::profile::{
    validate_display_name, validate_user_id, DomainProfile, MAX_DISPLAY_NAME_CHARS,
};
use crate::backend::storage::{DbConnection, ProfileRepository};

/// Service for profiles, streak counters and subscription tier
#[derive(Clone)]
pub struct ProfileService {
    profile_repository: ProfileRepository,
}

impl ProfileService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            profile_repository: ProfileRepository::new(db),
        }
    }

    pub async fn create_profile(&self, user_id: &str, display_name: &str) -> DomainResult<DomainProfile> {
        let user_id = validate_user_id(user_id)?;
        let display_name = validate_display_name(display_name)?;

        let profile = DomainProfile::new(user_id, &display_name, Utc::now());
        if !self.profile_repository.insert_profile_if_missing(&profile).await? {
            return Err(DomainError::Conflict(format!("Profile already exists: {}", user_id)));
        }
        info!("Created profile {}", user_id);
        Ok(profile)
    }

    pub async fn get_profile(&self, user_id: &str) -> DomainResult<DomainProfile> {
        self.profile_repository
            .get_profile(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Profile not found: {}", user_id)))
    }

    /// Fetch the profile, creating a default one named after the user id if needed
    pub async fn ensure_profile(&self, user_id: &str) -> DomainResult<DomainProfile> {
        let user_id = validate_user_id(user_id)?;
        if let Some(profile) = self.profile_repository.get_profile(user_id).await? {
            return Ok(profile);
        }

        let display_name: String = user_id.chars().take(MAX_DISPLAY_NAME_CHARS).collect();
        let profile = DomainProfile::new(user_id, &display_name, Utc::now());
        if self.profile_repository.insert_profile_if_missing(&profile).await? {
            info!("Auto-created profile {}", user_id);
        }
        // Another request may have created it between the lookup and the insert
        self.get_profile(user_id).await
    }

    pub async fn update_display_name(&self, user_id: &str, display_name: &str) -> DomainResult<DomainProfile> {
        let display_name = validate_display_name(display_name)?;
        let updated = self
            .profile_repository
            .update_display_name(user_id, &display_name, Utc::now())
            .await?;
        if !updated {
            return Err(DomainError::NotFound(format!("Profile not found: {}", user_id)));
        }
        self.get_profile(user_id).await
    }

    pub async fn set_subscription_tier(&self, user_id: &str, tier: SubscriptionTier) -> DomainResult<DomainProfile> {
        let updated = self
            .profile_repository
            .update_subscription_tier(user_id, tier, Utc::now())
            .await?;
        if !updated {
            return Err(DomainError::NotFound(format!("Profile not found: {}", user_id)));
        }
        info!("Profile {} moved to {} tier", user_id, tier.as_str());
        self.get_profile(user_id).await
    }
}
