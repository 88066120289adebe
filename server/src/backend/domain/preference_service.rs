//! Per-user key/value preferences.
//!
//! Reads never fail: a missing row, a storage error or a value that does not
//! parse as the requested type all yield the caller's default.

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, warn};

use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::storage::{DbConnection, PreferenceRepository, ProfileRepository};

pub const MAX_KEY_CHARS: usize = 64;

pub fn validate_key(key: &str) -> DomainResult<&str> {
    if key.is_empty() || key.chars().count() > MAX_KEY_CHARS {
        return Err(DomainError::Validation(format!(
            "Preference key must be 1-{} characters",
            MAX_KEY_CHARS
        )));
    }
    let valid = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if !valid {
        return Err(DomainError::Validation(format!(
            "Preference key contains invalid characters: {}",
            key
        )));
    }
    Ok(key)
}

#[derive(Clone)]
pub struct PreferenceService {
    preference_repository: PreferenceRepository,
    profile_repository: ProfileRepository,
}

impl PreferenceService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            preference_repository: PreferenceRepository::new(db.clone()),
            profile_repository: ProfileRepository::new(db),
        }
    }

    async fn require_profile(&self, user_id: &str) -> DomainResult<()> {
        if !self.profile_repository.profile_exists(user_id).await? {
            return Err(DomainError::NotFound(format!("Profile not found: {}", user_id)));
        }
        Ok(())
    }

    /// Stored value, if any. Unlike the `get_*` helpers this surfaces errors.
    pub async fn get_raw(&self, user_id: &str, key: &str) -> DomainResult<Option<String>> {
        let key = validate_key(key)?;
        Ok(self.preference_repository.get_value(user_id, key).await?)
    }

    pub async fn get_string(&self, user_id: &str, key: &str, default: &str) -> String {
        match self.get_raw(user_id, key).await {
            Ok(Some(value)) => value,
            Ok(None) => default.to_string(),
            Err(e) => {
                warn!("Failed to read preference {} for {}: {}", key, user_id, e);
                default.to_string()
            }
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, user_id: &str, key: &str, default: T) -> T {
        let raw = match self.get_raw(user_id, key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!("Failed to read preference {} for {}: {}", key, user_id, e);
                return default;
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Preference {} for {} is not valid JSON: {}", key, user_id, e);
            default
        })
    }

    pub async fn set_string(&self, user_id: &str, key: &str, value: &str) -> DomainResult<()> {
        let key = validate_key(key)?;
        self.require_profile(user_id).await?;
        self.preference_repository
            .put_value(user_id, key, value, Utc::now())
            .await?;
        info!("Stored preference {} for {}", key, user_id);
        Ok(())
    }

    pub async fn set_json<T: Serialize>(&self, user_id: &str, key: &str, value: &T) -> DomainResult<()> {
        let encoded = serde_json::to_string(value)
            .map_err(|e| DomainError::Validation(format!("Unserializable preference value: {}", e)))?;
        self.set_string(user_id, key, &encoded).await
    }

    pub async fn remove(&self, user_id: &str, key: &str) -> DomainResult<()> {
        let key = validate_key(key)?;
        if !self.preference_repository.delete_value(user_id, key).await? {
            return Err(DomainError::NotFound(format!("Preference not found: {}", key)));
        }
        Ok(())
    }

    pub async fn list(&self, user_id: &str) -> DomainResult<Vec<(String, String)>> {
        Ok(self.preference_repository.list_values(user_id).await?)
    }
}
