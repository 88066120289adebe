//! Journal entry domain logic.
//!
//! ## Business Rules
//!
//! - Content is trimmed and must hold 1-10 000 characters
//! - Mood is a level from 1 to 5
//! - Attaching a photo requires the premium tier
//! - Entries may be backdated but not dated in the future
//! - Writing an entry creates the author's profile on first use, advances
//!   the streak and re-evaluates badges
//! - The entry and the streak are committed together; badges are evaluated
//!   afterwards and a failure there does not undo the entry, since every
//!   later write recomputes them
//! - Entries are only visible to their author; anything else is "not found"

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::backend::domain::badge_service::BadgeService;
use crate::backend::domain::commands::journal::{
    CreateEntryCommand, CreateEntryResult, EntryFilter, UpdateEntryCommand,
};
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::journal_query::{apply_filter, group_by_date, summarize_moods, MoodStats};
use crate::backend::domain::models::journal_entry::{
    validate_content, validate_created_at, validate_photo_url, DomainJournalEntry,
};
use crate::backend::domain::models::profile::next_streak;
use crate::backend::domain::profile_service::ProfileService;
use crate::backend::storage::{DbConnection, JournalRepository};

#[derive(Clone)]
pub struct JournalService {
    journal_repository: JournalRepository,
    profile_service: ProfileService,
    badge_service: BadgeService,
}

impl JournalService {
    pub fn new(db: DbConnection, profile_service: ProfileService, badge_service: BadgeService) -> Self {
        Self {
            journal_repository: JournalRepository::new(db),
            profile_service,
            badge_service,
        }
    }

    pub async fn create_entry(&self, command: CreateEntryCommand) -> DomainResult<CreateEntryResult> {
        info!("Creating entry for {} with mood {}", command.user_id, command.mood);

        let now = Utc::now();
        let content = validate_content(&command.content)?;
        let photo_url = validate_photo_url(command.photo_url.as_deref())?;
        let created_at = validate_created_at(command.created_at, now)?;
        let prompt = command
            .prompt
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let profile = self.profile_service.ensure_profile(&command.user_id).await?;
        if photo_url.is_some() && !profile.is_premium() {
            return Err(DomainError::PremiumRequired(
                "Photo attachments require a premium subscription".to_string(),
            ));
        }

        let entry = DomainJournalEntry {
            id: DomainJournalEntry::generate_id(),
            user_id: profile.id.clone(),
            content,
            mood: command.mood,
            photo_url,
            prompt,
            created_at,
            updated_at: now,
        };

        let entry_date = entry.entry_date();
        let streak = self
            .journal_repository
            .store_entry_with_streak(&entry, |current| {
                next_streak(
                    current.last_entry_date,
                    entry_date,
                    current.current_streak,
                    current.longest_streak,
                )
            })
            .await?;

        let newly_earned = self
            .badge_service
            .evaluate(&profile.id)
            .await
            .unwrap_or_else(|e| {
                warn!("Badge evaluation failed after storing entry {}: {}", entry.id, e);
                Vec::new()
            });

        info!("Stored entry {} (streak {})", entry.id, streak.current_streak);

        Ok(CreateEntryResult {
            entry,
            current_streak: streak.current_streak,
            newly_earned,
        })
    }

    pub async fn get_entry(&self, user_id: &str, entry_id: &str) -> DomainResult<DomainJournalEntry> {
        self.journal_repository
            .get_entry(user_id, entry_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Entry not found: {}", entry_id)))
    }

    pub async fn list_entries(&self, user_id: &str, filter: &EntryFilter) -> DomainResult<Vec<DomainJournalEntry>> {
        validate_date_range(filter)?;
        let entries = self.journal_repository.list_entries(user_id).await?;
        Ok(apply_filter(entries, filter))
    }

    pub async fn update_entry(
        &self,
        user_id: &str,
        entry_id: &str,
        command: UpdateEntryCommand,
    ) -> DomainResult<DomainJournalEntry> {
        info!("Updating entry {} for {}", entry_id, user_id);

        let mut entry = self.get_entry(user_id, entry_id).await?;

        if let Some(content) = command.content {
            entry.content = validate_content(&content)?;
        }
        if let Some(mood) = command.mood {
            entry.mood = mood;
        }
        if let Some(photo_url) = command.photo_url {
            let photo_url = validate_photo_url(Some(&photo_url))?;
            if photo_url.is_some() {
                let profile = self.profile_service.get_profile(user_id).await?;
                if !profile.is_premium() {
                    return Err(DomainError::PremiumRequired(
                        "Photo attachments require a premium subscription".to_string(),
                    ));
                }
            }
            // An empty string clears the photo
            entry.photo_url = photo_url;
        }
        entry.updated_at = Utc::now();

        if !self.journal_repository.update_entry(&entry).await? {
            return Err(DomainError::NotFound(format!("Entry not found: {}", entry_id)));
        }
        self.badge_service.evaluate(user_id).await?;

        Ok(entry)
    }

    pub async fn delete_entry(&self, user_id: &str, entry_id: &str) -> DomainResult<()> {
        info!("Deleting entry {} for {}", entry_id, user_id);

        if !self.journal_repository.delete_entry(user_id, entry_id).await? {
            return Err(DomainError::NotFound(format!("Entry not found: {}", entry_id)));
        }
        self.badge_service.evaluate(user_id).await?;
        Ok(())
    }

    /// Filtered entries bucketed by day, newest day first
    pub async fn entries_by_date(
        &self,
        user_id: &str,
        filter: &EntryFilter,
    ) -> DomainResult<Vec<(NaiveDate, Vec<DomainJournalEntry>)>> {
        let entries = self.list_entries(user_id, filter).await?;
        Ok(group_by_date(entries))
    }

    pub async fn mood_summary(&self, user_id: &str, filter: &EntryFilter) -> DomainResult<MoodStats> {
        let entries = self.list_entries(user_id, filter).await?;
        Ok(summarize_moods(&entries))
    }
}

fn validate_date_range(filter: &EntryFilter) -> DomainResult<()> {
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        if start > end {
            return Err(DomainError::Validation(
                "start_date must not be after end_date".to_string(),
            ));
        }
    }
    Ok(())
}
