use shared::{DeleteAccountResponse, PreferenceEntry, UserDataExport};

use super::badge_mapper::BadgeMapper;
use super::entry_mapper::EntryMapper;
use super::format_timestamp;
use super::profile_mapper::ProfileMapper;
use crate::backend::domain::commands::account::{DeletedCounts, UserDataBundle};

pub struct AccountMapper;

impl AccountMapper {
    pub fn to_preference_entries(pairs: Vec<(String, String)>) -> Vec<PreferenceEntry> {
        pairs
            .into_iter()
            .map(|(key, value)| PreferenceEntry { key, value })
            .collect()
    }

    pub fn to_export_dto(bundle: UserDataBundle) -> UserDataExport {
        UserDataExport {
            exported_at: format_timestamp(&bundle.exported_at),
            badges: BadgeMapper::to_dto_list(&bundle.badges),
            profile: ProfileMapper::to_dto(bundle.profile),
            entries: EntryMapper::to_dto_list(bundle.entries),
            preferences: Self::to_preference_entries(bundle.preferences),
        }
    }

    pub fn to_delete_response(user_id: String, counts: DeletedCounts) -> DeleteAccountResponse {
        DeleteAccountResponse {
            user_id,
            deleted_entries: counts.entries,
            deleted_badges: counts.badges,
            deleted_preferences: counts.preferences,
        }
    }
}
