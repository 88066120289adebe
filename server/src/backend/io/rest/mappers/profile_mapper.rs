use shared::Profile;

use super::format_timestamp;
use crate::backend::domain::models::profile::DomainProfile;

pub struct ProfileMapper;

impl ProfileMapper {
    /// Convert domain DomainProfile to shared Profile DTO
    pub fn to_dto(domain: DomainProfile) -> Profile {
        Profile {
            id: domain.id,
            display_name: domain.display_name,
            current_streak: domain.current_streak,
            longest_streak: domain.longest_streak,
            last_entry_date: domain
                .last_entry_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
            subscription_tier: domain.subscription_tier,
            created_at: format_timestamp(&domain.created_at),
            updated_at: format_timestamp(&domain.updated_at),
        }
    }
}
