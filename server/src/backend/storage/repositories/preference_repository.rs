use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::format_timestamp;
use crate::backend::storage::connection::DbConnection;

/// Repository for per-user key/value preferences
#[derive(Clone)]
pub struct PreferenceRepository {
    db: DbConnection,
}

impl PreferenceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn get_value(&self, user_id: &str, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM preferences WHERE user_id = ? AND key = ?")
            .bind(user_id)
            .bind(key)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    /// Insert or replace a value
    pub async fn put_value(
        &self,
        user_id: &str,
        key: &str,
        value: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO preferences (user_id, key, value, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (user_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .bind(format_timestamp(&updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    pub async fn delete_value(&self, user_id: &str, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM preferences WHERE user_id = ? AND key = ?")
            .bind(user_id)
            .bind(key)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All (key, value) pairs for a user ordered by key
    pub async fn list_values(&self, user_id: &str) -> Result<Vec<(String, String)>> {
        let rows = sqlx::query(
            "SELECT key, value FROM preferences WHERE user_id = ? ORDER BY key ASC",
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(|r| (r.get("key"), r.get("value"))).collect())
    }
}
