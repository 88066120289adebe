use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use shared::SubscriptionTier;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite};

use super::{format_timestamp, parse_date, parse_timestamp, to_u32};
use crate::backend::domain::commands::account::DeletedCounts;
use crate::backend::domain::models::profile::{DomainProfile, StreakUpdate};
use crate::backend::storage::connection::DbConnection;

/// Repository for profile operations
#[derive(Clone)]
pub struct ProfileRepository {
    db: DbConnection,
}

impl ProfileRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a profile unless one with the same id exists; returns true when inserted
    pub async fn insert_profile_if_missing(&self, profile: &DomainProfile) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO profiles (id, display_name, current_streak, longest_streak,
                                  last_entry_date, subscription_tier, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.display_name)
        .bind(i64::from(profile.current_streak))
        .bind(i64::from(profile.longest_streak))
        .bind(profile.last_entry_date.map(|d| d.format("%Y-%m-%d").to_string()))
        .bind(profile.subscription_tier.as_str())
        .bind(format_timestamp(&profile.created_at))
        .bind(format_timestamp(&profile.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Get a profile by user ID
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<DomainProfile>> {
        fetch_profile(self.db.pool(), user_id).await
    }

    pub async fn profile_exists(&self, user_id: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM profiles WHERE id = ?")
            .bind(user_id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row.is_some())
    }

    /// Returns false when no profile matched
    pub async fn update_display_name(
        &self,
        user_id: &str,
        display_name: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE profiles SET display_name = ?, updated_at = ? WHERE id = ?",
        )
        .bind(display_name)
        .bind(format_timestamp(&updated_at))
        .bind(user_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn update_streak(
        &self,
        user_id: &str,
        streak: &StreakUpdate,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        write_streak(self.db.pool(), user_id, streak, updated_at).await
    }

    /// Returns false when no profile matched
    pub async fn update_subscription_tier(
        &self,
        user_id: &str,
        tier: SubscriptionTier,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE profiles SET subscription_tier = ?, updated_at = ? WHERE id = ?",
        )
        .bind(tier.as_str())
        .bind(format_timestamp(&updated_at))
        .bind(user_id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a user's entries, badges, preferences and profile atomically
    pub async fn delete_user_data(&self, user_id: &str) -> Result<DeletedCounts> {
        let mut tx = self.db.pool().begin().await?;

        let entries = sqlx::query("DELETE FROM journal_entries WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let badges = sqlx::query("DELETE FROM user_badges WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let preferences = sqlx::query("DELETE FROM preferences WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let profiles = sqlx::query("DELETE FROM profiles WHERE id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(DeletedCounts {
            entries,
            badges,
            preferences,
            profiles,
        })
    }
}

/// Profile lookup usable on the pool or inside a transaction
pub(crate) async fn fetch_profile<'e, E>(executor: E, user_id: &str) -> Result<Option<DomainProfile>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(
        r#"
        SELECT id, display_name, current_streak, longest_streak, last_entry_date,
               subscription_tier, created_at, updated_at
        FROM profiles
        WHERE id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    row.as_ref().map(row_to_profile).transpose()
}

pub(crate) async fn write_streak<'e, E>(
    executor: E,
    user_id: &str,
    streak: &StreakUpdate,
    updated_at: DateTime<Utc>,
) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        UPDATE profiles
        SET current_streak = ?, longest_streak = ?, last_entry_date = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(i64::from(streak.current_streak))
    .bind(i64::from(streak.longest_streak))
    .bind(streak.last_entry_date.format("%Y-%m-%d").to_string())
    .bind(format_timestamp(&updated_at))
    .bind(user_id)
    .execute(executor)
    .await?;
    Ok(())
}

fn row_to_profile(row: &SqliteRow) -> Result<DomainProfile> {
    let tier: String = row.get("subscription_tier");
    let subscription_tier = SubscriptionTier::parse(&tier)
        .ok_or_else(|| anyhow!("Unknown subscription tier: {}", tier))?;
    let last_entry_date: Option<String> = row.get("last_entry_date");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(DomainProfile {
        id: row.get("id"),
        display_name: row.get("display_name"),
        current_streak: to_u32(row.get("current_streak")),
        longest_streak: to_u32(row.get("longest_streak")),
        last_entry_date: last_entry_date.as_deref().map(parse_date).transpose()?,
        subscription_tier,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
