use chrono::{DateTime, NaiveDate, Utc};
use shared::{
    CreateEntryRequest, CreateEntryResponse, EntryDateGroup, EntryListQuery, JournalEntry, Mood,
    MoodCount, MoodSummary, UpdateEntryRequest,
};

use super::badge_mapper::BadgeMapper;
use super::format_timestamp;
use crate::backend::domain::commands::journal::{
    CreateEntryCommand, CreateEntryResult, EntryFilter, UpdateEntryCommand,
};
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::journal_query::MoodStats;
use crate::backend::domain::models::journal_entry::DomainJournalEntry;

pub struct EntryMapper;

impl EntryMapper {
    /// Convert domain DomainJournalEntry to shared JournalEntry DTO
    pub fn to_dto(domain: DomainJournalEntry) -> JournalEntry {
        JournalEntry {
            id: domain.id,
            user_id: domain.user_id,
            content: domain.content,
            mood: domain.mood,
            photo_url: domain.photo_url,
            prompt: domain.prompt,
            created_at: format_timestamp(&domain.created_at),
            updated_at: format_timestamp(&domain.updated_at),
        }
    }

    pub fn to_dto_list(entries: Vec<DomainJournalEntry>) -> Vec<JournalEntry> {
        entries.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_create_command(user_id: String, request: CreateEntryRequest) -> DomainResult<CreateEntryCommand> {
        let created_at = request
            .created_at
            .as_deref()
            .map(parse_rfc3339)
            .transpose()?;

        Ok(CreateEntryCommand {
            user_id,
            content: request.content,
            mood: request.mood,
            photo_url: request.photo_url,
            prompt: request.prompt,
            created_at,
        })
    }

    pub fn to_create_response(result: CreateEntryResult) -> CreateEntryResponse {
        CreateEntryResponse {
            newly_earned_badges: BadgeMapper::to_dto_list(&result.newly_earned),
            current_streak: result.current_streak,
            entry: Self::to_dto(result.entry),
        }
    }

    pub fn to_update_command(request: UpdateEntryRequest) -> UpdateEntryCommand {
        UpdateEntryCommand {
            content: request.content,
            mood: request.mood,
            photo_url: request.photo_url,
        }
    }

    /// Convert the listing query string into a domain filter
    pub fn to_filter(query: EntryListQuery) -> DomainResult<EntryFilter> {
        let mood = query.mood.map(Mood::try_from).transpose()?;
        Ok(EntryFilter {
            mood,
            start_date: query.start_date.as_deref().map(parse_date).transpose()?,
            end_date: query.end_date.as_deref().map(parse_date).transpose()?,
            search: query.search,
            sort: query.sort,
        })
    }

    pub fn to_date_groups(groups: Vec<(NaiveDate, Vec<DomainJournalEntry>)>) -> Vec<EntryDateGroup> {
        groups
            .into_iter()
            .map(|(date, entries)| EntryDateGroup {
                date: date.format("%Y-%m-%d").to_string(),
                entries: Self::to_dto_list(entries),
            })
            .collect()
    }

    pub fn to_mood_summary(stats: MoodStats) -> MoodSummary {
        MoodSummary {
            counts: Mood::ALL
                .iter()
                .map(|&mood| MoodCount {
                    mood,
                    count: stats.count_for(mood),
                })
                .collect(),
            total: stats.total,
            average: stats.average,
            most_frequent: stats.most_frequent,
        }
    }
}

fn parse_rfc3339(value: &str) -> DomainResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| DomainError::Validation(format!("Invalid RFC 3339 timestamp: {}", value)))
}

fn parse_date(value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::Validation(format!("Invalid date (expected YYYY-MM-DD): {}", value)))
}
