use anyhow::{anyhow, Result};
use shared::Mood;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite};

use super::profile_repository::{fetch_profile, write_streak};
use super::{format_timestamp, parse_timestamp, to_u32};
use crate::backend::domain::models::journal_entry::DomainJournalEntry;
use crate::backend::domain::models::profile::{DomainProfile, StreakUpdate};
use crate::backend::storage::connection::DbConnection;

/// Counts used for badge evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryStats {
    pub total_entries: u32,
    pub distinct_moods: u32,
    pub photo_entries: u32,
}

/// Repository for journal entry operations
#[derive(Clone)]
pub struct JournalRepository {
    db: DbConnection,
}

impl JournalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a journal entry in the database
    pub async fn store_entry(&self, entry: &DomainJournalEntry) -> Result<()> {
        insert_entry(self.db.pool(), entry).await
    }

    /// Store an entry and advance its author's streak in one transaction.
    ///
    /// The insert runs first so the transaction holds the write lock before
    /// the profile is read; concurrent entries for the same user queue up
    /// instead of overwriting each other's streak.
    pub async fn store_entry_with_streak<F>(&self, entry: &DomainJournalEntry, advance: F) -> Result<StreakUpdate>
    where
        F: FnOnce(&DomainProfile) -> StreakUpdate,
    {
        let mut tx = self.db.pool().begin().await?;

        insert_entry(&mut *tx, entry).await?;
        let profile = fetch_profile(&mut *tx, &entry.user_id)
            .await?
            .ok_or_else(|| anyhow!("Profile not found: {}", entry.user_id))?;
        let streak = advance(&profile);
        write_streak(&mut *tx, &entry.user_id, &streak, entry.updated_at).await?;

        tx.commit().await?;
        Ok(streak)
    }

    /// Get one entry, scoped to its owner
    pub async fn get_entry(&self, user_id: &str, entry_id: &str) -> Result<Option<DomainJournalEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, content, mood, photo_url, prompt, created_at, updated_at
            FROM journal_entries
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(user_id)
        .bind(entry_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(row_to_entry).transpose()
    }

    /// All entries for a user, newest first
    pub async fn list_entries(&self, user_id: &str) -> Result<Vec<DomainJournalEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, content, mood, photo_url, prompt, created_at, updated_at
            FROM journal_entries
            WHERE user_id = ?
            ORDER BY created_at DESC, ROWID DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_entry).collect()
    }

    /// Returns false when the entry does not exist for that user
    pub async fn update_entry(&self, entry: &DomainJournalEntry) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE journal_entries
            SET content = ?, mood = ?, photo_url = ?, updated_at = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(&entry.content)
        .bind(i64::from(entry.mood.level()))
        .bind(&entry.photo_url)
        .bind(format_timestamp(&entry.updated_at))
        .bind(&entry.user_id)
        .bind(&entry.id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a single entry for a specific user
    pub async fn delete_entry(&self, user_id: &str, entry_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(entry_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn entry_stats(&self, user_id: &str) -> Result<EntryStats> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total_entries,
                   COUNT(DISTINCT mood) AS distinct_moods,
                   COUNT(photo_url) AS photo_entries
            FROM journal_entries
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_one(self.db.pool())
        .await?;

        Ok(EntryStats {
            total_entries: to_u32(row.get("total_entries")),
            distinct_moods: to_u32(row.get("distinct_moods")),
            photo_entries: to_u32(row.get("photo_entries")),
        })
    }
}

async fn insert_entry<'e, E>(executor: E, entry: &DomainJournalEntry) -> Result<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO journal_entries (id, user_id, content, mood, photo_url, prompt, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&entry.id)
    .bind(&entry.user_id)
    .bind(&entry.content)
    .bind(i64::from(entry.mood.level()))
    .bind(&entry.photo_url)
    .bind(&entry.prompt)
    .bind(format_timestamp(&entry.created_at))
    .bind(format_timestamp(&entry.updated_at))
    .execute(executor)
    .await?;
    Ok(())
}

fn row_to_entry(row: &SqliteRow) -> Result<DomainJournalEntry> {
    let mood_level: i64 = row.get("mood");
    let mood = Mood::try_from(mood_level).map_err(|e| anyhow!("Stored entry has bad mood: {}", e))?;
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(DomainJournalEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        content: row.get("content"),
        mood,
        photo_url: row.get("photo_url"),
        prompt: row.get("prompt"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
