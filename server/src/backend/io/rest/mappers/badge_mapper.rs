use shared::{BadgeListResponse, BadgeProgress};

use super::format_timestamp;
use crate::backend::domain::badge_service::BadgeStatus;

pub struct BadgeMapper;

impl BadgeMapper {
    pub fn status_to_dto(status: &BadgeStatus) -> BadgeProgress {
        BadgeProgress {
            badge_id: status.definition.id.to_string(),
            name: status.definition.name.to_string(),
            description: status.definition.description.to_string(),
            progress: status.progress,
            target: status.definition.target,
            percent: status.percent(),
            earned: status.is_earned(),
            earned_at: status.earned_at.as_ref().map(format_timestamp),
        }
    }

    pub fn to_dto_list(statuses: &[BadgeStatus]) -> Vec<BadgeProgress> {
        statuses.iter().map(Self::status_to_dto).collect()
    }

    pub fn to_list_response(statuses: Vec<BadgeStatus>) -> BadgeListResponse {
        let earned_count = statuses.iter().filter(|s| s.is_earned()).count();
        BadgeListResponse {
            badges: Self::to_dto_list(&statuses),
            earned_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::badge::find_badge;
    use chrono::Utc;

    #[test]
    fn test_status_to_dto() {
        let definition = find_badge("ten_entries").unwrap();
        let dto = BadgeMapper::status_to_dto(&BadgeStatus {
            definition,
            progress: 4,
            earned_at: None,
        });
        assert_eq!(dto.badge_id, "ten_entries");
        assert_eq!(dto.percent, 40);
        assert!(!dto.earned);
        assert!(dto.earned_at.is_none());
    }

    #[test]
    fn test_list_response_counts_earned() {
        let first = find_badge("first_entry").unwrap();
        let ten = find_badge("ten_entries").unwrap();
        let response = BadgeMapper::to_list_response(vec![
            BadgeStatus {
                definition: first,
                progress: 1,
                earned_at: Some(Utc::now()),
            },
            BadgeStatus {
                definition: ten,
                progress: 1,
                earned_at: None,
            },
        ]);
        assert_eq!(response.earned_count, 1);
        assert_eq!(response.badges.len(), 2);
        assert_eq!(response.badges[0].percent, 100);
    }
}
