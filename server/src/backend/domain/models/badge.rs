use chrono::{DateTime, Utc};

/// What a badge counts toward its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeCriterion {
    TotalEntries,
    LongestStreak,
    DistinctMoods,
    PhotoEntries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub criterion: BadgeCriterion,
    pub target: u32,
}

pub const BADGE_CATALOG: &[BadgeDefinition] = &[
    BadgeDefinition {
        id: "first_entry",
        name: "First Steps",
        description: "Write your first journal entry",
        criterion: BadgeCriterion::TotalEntries,
        target: 1,
    },
    BadgeDefinition {
        id: "ten_entries",
        name: "Finding Your Voice",
        description: "Write 10 journal entries",
        criterion: BadgeCriterion::TotalEntries,
        target: 10,
    },
    BadgeDefinition {
        id: "fifty_entries",
        name: "Dedicated Writer",
        description: "Write 50 journal entries",
        criterion: BadgeCriterion::TotalEntries,
        target: 50,
    },
    BadgeDefinition {
        id: "hundred_entries",
        name: "Centurion",
        description: "Write 100 journal entries",
        criterion: BadgeCriterion::TotalEntries,
        target: 100,
    },
    BadgeDefinition {
        id: "three_day_streak",
        name: "Warming Up",
        description: "Journal three days in a row",
        criterion: BadgeCriterion::LongestStreak,
        target: 3,
    },
    BadgeDefinition {
        id: "week_streak",
        name: "Week Warrior",
        description: "Journal seven days in a row",
        criterion: BadgeCriterion::LongestStreak,
        target: 7,
    },
    BadgeDefinition {
        id: "month_streak",
        name: "Habit Formed",
        description: "Journal thirty days in a row",
        criterion: BadgeCriterion::LongestStreak,
        target: 30,
    },
    BadgeDefinition {
        id: "mood_explorer",
        name: "Mood Explorer",
        description: "Log every mood level at least once",
        criterion: BadgeCriterion::DistinctMoods,
        target: 5,
    },
    BadgeDefinition {
        id: "photo_journaler",
        name: "Picture This",
        description: "Attach photos to 5 entries",
        criterion: BadgeCriterion::PhotoEntries,
        target: 5,
    },
];

pub fn find_badge(badge_id: &str) -> Option<&'static BadgeDefinition> {
    BADGE_CATALOG.iter().find(|badge| badge.id == badge_id)
}

/// Per-user badge row
#[derive(Debug, Clone, PartialEq)]
pub struct UserBadge {
    pub user_id: String,
    pub badge_id: String,
    pub progress: u32,
    pub earned_at: Option<DateTime<Utc>>,
}

/// Aggregates a user's entries are reduced to before badge evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BadgeStats {
    pub total_entries: u32,
    pub longest_streak: u32,
    pub distinct_moods: u32,
    pub photo_entries: u32,
}

impl BadgeStats {
    pub fn value_for(&self, criterion: BadgeCriterion) -> u32 {
        match criterion {
            BadgeCriterion::TotalEntries => self.total_entries,
            BadgeCriterion::LongestStreak => self.longest_streak,
            BadgeCriterion::DistinctMoods => self.distinct_moods,
            BadgeCriterion::PhotoEntries => self.photo_entries,
        }
    }
}

/// Progress toward a badge as a whole percentage, rounded down and clamped to 0..=100
pub fn progress_percent(progress: u32, target: u32) -> u8 {
    if target == 0 {
        return 100;
    }
    let percent = u64::from(progress) * 100 / u64::from(target);
    percent.min(100) as u8
}
