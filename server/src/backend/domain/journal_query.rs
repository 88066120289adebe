//! In-memory filtering, ordering and grouping of a user's journal entries.
//!
//! A user's full entry list is small enough to load and shape in memory,
//! which keeps the SQL simple and these rules unit-testable.

use chrono::NaiveDate;
use shared::{EntrySort, Mood};
use std::collections::BTreeMap;

use crate::backend::domain::commands::journal::EntryFilter;
use crate::backend::domain::models::journal_entry::DomainJournalEntry;

/// Mood distribution across a set of entries
#[derive(Debug, Clone, PartialEq)]
pub struct MoodStats {
    /// Count per mood, indexed by level - 1
    pub counts: [usize; 5],
    pub total: usize,
    pub average: Option<f64>,
    pub most_frequent: Option<Mood>,
}

impl MoodStats {
    pub fn count_for(&self, mood: Mood) -> usize {
        self.counts[usize::from(mood.level()) - 1]
    }
}

fn matches(entry: &DomainJournalEntry, filter: &EntryFilter, needle: Option<&str>) -> bool {
    if filter.mood.is_some_and(|mood| entry.mood != mood) {
        return false;
    }

    let day = entry.entry_date();
    if filter.start_date.is_some_and(|start| day < start) {
        return false;
    }
    if filter.end_date.is_some_and(|end| day > end) {
        return false;
    }

    match needle {
        Some(needle) => entry.content.to_lowercase().contains(needle),
        None => true,
    }
}

/// Keep entries matching every set criterion. Blank search text matches everything.
pub fn filter_entries(entries: Vec<DomainJournalEntry>, filter: &EntryFilter) -> Vec<DomainJournalEntry> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    entries
        .into_iter()
        .filter(|entry| matches(entry, filter, needle.as_deref()))
        .collect()
}

/// Stable sort; mood orderings break ties newest first
pub fn sort_entries(entries: &mut [DomainJournalEntry], sort: EntrySort) {
    match sort {
        EntrySort::Newest => entries.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        EntrySort::Oldest => entries.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        EntrySort::MoodHigh => entries.sort_by(|a, b| {
            b.mood.cmp(&a.mood).then_with(|| b.created_at.cmp(&a.created_at))
        }),
        EntrySort::MoodLow => entries.sort_by(|a, b| {
            a.mood.cmp(&b.mood).then_with(|| b.created_at.cmp(&a.created_at))
        }),
    }
}

/// Filter then sort
pub fn apply_filter(entries: Vec<DomainJournalEntry>, filter: &EntryFilter) -> Vec<DomainJournalEntry> {
    let mut filtered = filter_entries(entries, filter);
    sort_entries(&mut filtered, filter.sort);
    filtered
}

/// Bucket entries by calendar day, newest day first and newest entry first within a day
pub fn group_by_date(entries: Vec<DomainJournalEntry>) -> Vec<(NaiveDate, Vec<DomainJournalEntry>)> {
    let mut groups: BTreeMap<NaiveDate, Vec<DomainJournalEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.entry_date()).or_default().push(entry);
    }

    groups
        .into_iter()
        .rev()
        .map(|(day, mut day_entries)| {
            sort_entries(&mut day_entries, EntrySort::Newest);
            (day, day_entries)
        })
        .collect()
}

pub fn summarize_moods(entries: &[DomainJournalEntry]) -> MoodStats {
    let mut counts = [0usize; 5];
    for entry in entries {
        counts[usize::from(entry.mood.level()) - 1] += 1;
    }

    let total = entries.len();
    let average = (total > 0).then(|| {
        let sum: usize = entries.iter().map(|e| usize::from(e.mood.level())).sum();
        let mean = sum as f64 / total as f64;
        (mean * 100.0).round() / 100.0
    });

    // Walk high to low so ties keep the higher mood
    let mut most_frequent: Option<(Mood, usize)> = None;
    for mood in Mood::ALL.iter().rev() {
        let count = counts[usize::from(mood.level()) - 1];
        if count == 0 {
            continue;
        }
        match most_frequent {
            Some((_, best)) if best >= count => {}
            _ => most_frequent = Some((*mood, count)),
        }
    }

    MoodStats {
        counts,
        total,
        average,
        most_frequent: most_frequent.map(|(mood, _)| mood),
    }
}
