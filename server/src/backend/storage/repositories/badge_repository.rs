use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::{format_timestamp, parse_optional_timestamp, to_u32};
use crate::backend::domain::models::badge::UserBadge;
use crate::backend::storage::connection::DbConnection;

/// Repository for per-user badge progress
#[derive(Clone)]
pub struct BadgeRepository {
    db: DbConnection,
}

impl BadgeRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// All badge rows for a user, ordered by badge id
    pub async fn list_user_badges(&self, user_id: &str) -> Result<Vec<UserBadge>> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, badge_id, progress, earned_at
            FROM user_badges
            WHERE user_id = ?
            ORDER BY badge_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter()
            .map(|row| {
                Ok(UserBadge {
                    user_id: row.get("user_id"),
                    badge_id: row.get("badge_id"),
                    progress: to_u32(row.get("progress")),
                    earned_at: parse_optional_timestamp(row.get("earned_at"))?,
                })
            })
            .collect()
    }

    /// Insert or update progress and return the stored `earned_at`.
    /// An existing `earned_at` is never overwritten or cleared.
    pub async fn upsert_progress(
        &self,
        user_id: &str,
        badge_id: &str,
        progress: u32,
        earned_at: Option<DateTime<Utc>>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>> {
        let row = sqlx::query(
            r#"
            INSERT INTO user_badges (user_id, badge_id, progress, earned_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (user_id, badge_id) DO UPDATE SET
                progress = excluded.progress,
                earned_at = COALESCE(user_badges.earned_at, excluded.earned_at),
                updated_at = excluded.updated_at
            RETURNING earned_at
            "#,
        )
        .bind(user_id)
        .bind(badge_id)
        .bind(i64::from(progress))
        .bind(earned_at.as_ref().map(format_timestamp))
        .bind(format_timestamp(&updated_at))
        .fetch_one(self.db.pool())
        .await?;

        parse_optional_timestamp(row.get("earned_at"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::profile::DomainProfile;
    use crate::backend::storage::ProfileRepository;
    use chrono::{Duration, TimeZone};

    async fn setup_test() -> BadgeRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        ProfileRepository::new(db.clone())
            .insert_profile_if_missing(&DomainProfile::new("user-1", "Sam", Utc::now()))
            .await
            .expect("Failed to store profile");
        BadgeRepository::new(db)
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_updates() {
        let repo = setup_test().await;
        let now = Utc::now();

        repo.upsert_progress("user-1", "ten_entries", 3, None, now).await.unwrap();
        repo.upsert_progress("user-1", "ten_entries", 4, None, now).await.unwrap();

        let badges = repo.list_user_badges("user-1").await.unwrap();
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].progress, 4);
        assert!(badges[0].earned_at.is_none());
    }

    #[tokio::test]
    async fn test_earned_at_is_sticky() {
        let repo = setup_test().await;
        let earned = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let later = earned + Duration::days(3);

        let stored = repo
            .upsert_progress("user-1", "first_entry", 1, Some(earned), earned)
            .await
            .unwrap();
        assert_eq!(stored, Some(earned));
        // Progress dropped and no new earned timestamp supplied
        repo.upsert_progress("user-1", "first_entry", 0, None, later).await.unwrap();
        // A later earned timestamp must not replace the original
        let stored = repo
            .upsert_progress("user-1", "first_entry", 1, Some(later), later)
            .await
            .unwrap();
        assert_eq!(stored, Some(earned));

        let badges = repo.list_user_badges("user-1").await.unwrap();
        assert_eq!(badges[0].earned_at, Some(earned));
        assert_eq!(badges[0].progress, 1);
    }
}
