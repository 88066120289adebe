//! Badge progress tracking.
//!
//! Progress is recomputed from scratch on every evaluation: the user's entry
//! counts and longest streak are reduced to [`BadgeStats`], each catalog badge
//! stores `min(stat, target)`, and the first evaluation that reaches the target
//! stamps `earned_at`. Earned badges stay earned even if entries are deleted.

use chrono::{DateTime, SubsecRound, Utc};
use std::collections::HashMap;
use tracing::info;

use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::badge::{
    progress_percent, BadgeDefinition, BadgeStats, UserBadge, BADGE_CATALOG,
};
use crate::backend::storage::{BadgeRepository, DbConnection, JournalRepository, ProfileRepository};

/// A catalog badge joined with one user's progress
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeStatus {
    pub definition: &'static BadgeDefinition,
    pub progress: u32,
    pub earned_at: Option<DateTime<Utc>>,
}

impl BadgeStatus {
    pub fn percent(&self) -> u8 {
        progress_percent(self.progress, self.definition.target)
    }

    pub fn is_earned(&self) -> bool {
        self.earned_at.is_some()
    }
}

#[derive(Clone)]
pub struct BadgeService {
    badge_repository: BadgeRepository,
    journal_repository: JournalRepository,
    profile_repository: ProfileRepository,
}

impl BadgeService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            badge_repository: BadgeRepository::new(db.clone()),
            journal_repository: JournalRepository::new(db.clone()),
            profile_repository: ProfileRepository::new(db),
        }
    }

    async fn load_stats(&self, user_id: &str) -> DomainResult<BadgeStats> {
        let profile = self
            .profile_repository
            .get_profile(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Profile not found: {}", user_id)))?;
        let entry_stats = self.journal_repository.entry_stats(user_id).await?;

        Ok(BadgeStats {
            total_entries: entry_stats.total_entries,
            longest_streak: profile.longest_streak,
            distinct_moods: entry_stats.distinct_moods,
            photo_entries: entry_stats.photo_entries,
        })
    }

    /// Recompute progress for every catalog badge; returns badges earned by this call
    /// with the `earned_at` that was stored for them
    pub async fn evaluate(&self, user_id: &str) -> DomainResult<Vec<BadgeStatus>> {
        let stats = self.load_stats(user_id).await?;
        let existing: HashMap<String, UserBadge> = self
            .badge_repository
            .list_user_badges(user_id)
            .await?
            .into_iter()
            .map(|badge| (badge.badge_id.clone(), badge))
            .collect();

        // Storage keeps microseconds; truncate so the stamp compares equal after a round trip
        let now = Utc::now().trunc_subsecs(6);
        let mut newly_earned = Vec::new();

        for definition in BADGE_CATALOG {
            let progress = stats.value_for(definition.criterion).min(definition.target);
            let row = existing.get(definition.id);
            let already_earned = row.is_some_and(|badge| badge.earned_at.is_some());
            let stamp = (progress >= definition.target && !already_earned).then_some(now);

            if stamp.is_none() && row.is_some_and(|badge| badge.progress == progress) {
                continue;
            }

            let stored = self
                .badge_repository
                .upsert_progress(user_id, definition.id, progress, stamp, now)
                .await?;

            // A concurrent evaluation may have stamped the badge first
            if stamp.is_some() && stored == stamp {
                newly_earned.push(BadgeStatus {
                    definition,
                    progress,
                    earned_at: stored,
                });
            }
        }

        if !newly_earned.is_empty() {
            let ids: Vec<&str> = newly_earned.iter().map(|b| b.definition.id).collect();
            info!("User {} earned badges: {:?}", user_id, ids);
        }

        Ok(newly_earned)
    }

    /// Every catalog badge with this user's progress, in catalog order
    pub async fn list_badges(&self, user_id: &str) -> DomainResult<Vec<BadgeStatus>> {
        if !self.profile_repository.profile_exists(user_id).await? {
            return Err(DomainError::NotFound(format!("Profile not found: {}", user_id)));
        }

        let mut rows: HashMap<String, UserBadge> = self
            .badge_repository
            .list_user_badges(user_id)
            .await?
            .into_iter()
            .map(|badge| (badge.badge_id.clone(), badge))
            .collect();

        Ok(BADGE_CATALOG
            .iter()
            .map(|definition| {
                let row = rows.remove(definition.id);
                BadgeStatus {
                    definition,
                    progress: row.as_ref().map_or(0, |r| r.progress),
                    earned_at: row.and_then(|r| r.earned_at),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::journal_entry::DomainJournalEntry;
    use crate::backend::domain::models::profile::{DomainProfile, StreakUpdate};
    use chrono::NaiveDate;
    use shared::Mood;

    struct Fixture {
        service: BadgeService,
        journal: JournalRepository,
        profiles: ProfileRepository,
    }

    async fn setup_test() -> Fixture {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let profiles = ProfileRepository::new(db.clone());
        profiles
            .insert_profile_if_missing(&DomainProfile::new("user-1", "Sam", Utc::now()))
            .await
            .unwrap();
        Fixture {
            service: BadgeService::new(db.clone()),
            journal: JournalRepository::new(db),
            profiles,
        }
    }

    async fn add_entry(journal: &JournalRepository, mood: Mood, photo: bool) -> String {
        let now = Utc::now();
        let entry = DomainJournalEntry {
            id: DomainJournalEntry::generate_id(),
            user_id: "user-1".to_string(),
            content: "note".to_string(),
            mood,
            photo_url: photo.then(|| "https://img.example.com/1.jpg".to_string()),
            prompt: None,
            created_at: now,
            updated_at: now,
        };
        journal.store_entry(&entry).await.unwrap();
        entry.id
    }

    fn status<'a>(statuses: &'a [BadgeStatus], id: &str) -> &'a BadgeStatus {
        statuses.iter().find(|s| s.definition.id == id).unwrap()
    }

    #[tokio::test]
    async fn test_list_badges_without_progress() {
        let fx = setup_test().await;
        let badges = fx.service.list_badges("user-1").await.unwrap();
        assert_eq!(badges.len(), BADGE_CATALOG.len());
        assert!(badges.iter().all(|b| b.progress == 0 && !b.is_earned() && b.percent() == 0));
    }

    #[tokio::test]
    async fn test_first_entry_earns_badge_once() {
        let fx = setup_test().await;
        add_entry(&fx.journal, Mood::Good, false).await;

        let earned = fx.service.evaluate("user-1").await.unwrap();
        let ids: Vec<&str> = earned.iter().map(|b| b.definition.id).collect();
        assert_eq!(ids, vec!["first_entry"]);

        // Second evaluation earns nothing new
        assert!(fx.service.evaluate("user-1").await.unwrap().is_empty());

        let badges = fx.service.list_badges("user-1").await.unwrap();
        assert!(status(&badges, "first_entry").is_earned());
        assert_eq!(status(&badges, "first_entry").earned_at, earned[0].earned_at);
        assert_eq!(status(&badges, "ten_entries").progress, 1);
        assert_eq!(status(&badges, "ten_entries").percent(), 10);
        assert_eq!(status(&badges, "mood_explorer").percent(), 20);
    }

    #[tokio::test]
    async fn test_earned_badge_survives_deletion() {
        let fx = setup_test().await;
        let id = add_entry(&fx.journal, Mood::Okay, false).await;
        fx.service.evaluate("user-1").await.unwrap();

        fx.journal.delete_entry("user-1", &id).await.unwrap();
        fx.service.evaluate("user-1").await.unwrap();

        let badges = fx.service.list_badges("user-1").await.unwrap();
        let first = status(&badges, "first_entry");
        assert_eq!(first.progress, 0);
        assert!(first.is_earned());
    }

    #[tokio::test]
    async fn test_streak_and_mood_badges() {
        let fx = setup_test().await;
        for mood in Mood::ALL {
            add_entry(&fx.journal, mood, false).await;
        }
        let streak = StreakUpdate {
            current_streak: 7,
            longest_streak: 7,
            last_entry_date: NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
        };
        fx.profiles.update_streak("user-1", &streak, Utc::now()).await.unwrap();

        let earned = fx.service.evaluate("user-1").await.unwrap();
        let ids: Vec<&str> = earned.iter().map(|b| b.definition.id).collect();
        assert!(ids.contains(&"mood_explorer"));
        assert!(ids.contains(&"three_day_streak"));
        assert!(ids.contains(&"week_streak"));
        assert!(!ids.contains(&"month_streak"));

        let badges = fx.service.list_badges("user-1").await.unwrap();
        assert_eq!(status(&badges, "month_streak").progress, 7);
        assert_eq!(status(&badges, "month_streak").percent(), 23);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let fx = setup_test().await;
        assert!(matches!(
            fx.service.evaluate("ghost").await.unwrap_err(),
            DomainError::NotFound(_)
        ));
        assert!(matches!(
            fx.service.list_badges("ghost").await.unwrap_err(),
            DomainError::NotFound(_)
        ));
    }
}
