use serde::Serialize;

use crate::db::models::{AvailabilityStatus, Organization};

/// Directory header aggregates. Computed over whatever collection the
/// caller passes (the full directory for the header, a filtered view for
/// drill-downs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub total: usize,
    pub available: usize,
    /// Rounded mean RSE score, 0 for an empty collection.
    pub average_rse_score: u32,
    /// Sum of service counts across all organizations.
    pub service_count: usize,
}

impl DirectoryStats {
    pub fn compute(organizations: &[Organization]) -> Self {
        let total = organizations.len();
        let average_rse_score = if total == 0 {
            0
        } else {
            let sum: i64 = organizations.iter().map(|o| i64::from(o.rse_score)).sum();
            (sum as f64 / total as f64).round() as u32
        };

        Self {
            total,
            available: count_by_availability(organizations, AvailabilityStatus::Disponible),
            average_rse_score,
            service_count: organizations.iter().map(|o| o.services.len()).sum(),
        }
    }
}

pub fn count_by_availability(
    organizations: &[Organization],
    availability: AvailabilityStatus,
) -> usize {
    organizations
        .iter()
        .filter(|o| o.availability_status == availability)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{
        OrganizationCategory, OrganizationService, OrganizationType,
    };
    use time::macros::datetime;
    use uuid::Uuid;

    fn service(org_id: Uuid, name: &str) -> OrganizationService {
        let at = datetime!(2025-05-10 09:00 UTC);
        OrganizationService {
            id: Uuid::from_u128(1),
            organization_id: org_id,
            name: name.to_string(),
            description: None,
            price: "Gratuit".to_string(),
            duration: None,
            category: "audit".to_string(),
            impact_level: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn org(rse_score: i32, availability: AvailabilityStatus, services: usize) -> Organization {
        let at = datetime!(2025-05-10 09:00 UTC);
        let id = Uuid::from_u128(rse_score as u128);
        Organization {
            id,
            name: "EcoRecyclage".to_string(),
            org_type: OrganizationType::Association,
            category: OrganizationCategory::Environnement,
            description: None,
            city: "Sfax".to_string(),
            region: "Tunisie".to_string(),
            address: None,
            phone: None,
            email: None,
            website: None,
            logo_url: None,
            rating: 4.0,
            rse_score,
            certifications: Vec::new(),
            specialties: Vec::new(),
            availability_status: availability,
            next_available_date: None,
            years_active: 3,
            team_size: 8,
            projects_completed: 12,
            clients_satisfied: 10,
            verified: true,
            owner_id: Uuid::from_u128(42),
            created_at: at,
            updated_at: at,
            services: (0..services).map(|i| service(id, &format!("service-{i}"))).collect(),
        }
    }

    #[test]
    fn empty_directory_yields_all_zero_stats() {
        let stats = DirectoryStats::compute(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.available, 0);
        assert_eq!(stats.average_rse_score, 0);
        assert_eq!(stats.service_count, 0);
    }

    #[test]
    fn averages_and_sums_over_the_collection() {
        let orgs = vec![
            org(80, AvailabilityStatus::Disponible, 2),
            org(90, AvailabilityStatus::Occupe, 3),
            org(71, AvailabilityStatus::Disponible, 0),
        ];
        let stats = DirectoryStats::compute(&orgs);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.available, 2);
        // (80 + 90 + 71) / 3 = 80.33 -> 80
        assert_eq!(stats.average_rse_score, 80);
        assert_eq!(stats.service_count, 5);
    }

    #[test]
    fn average_rounds_half_up() {
        let orgs = vec![org(80, AvailabilityStatus::Disponible, 0), org(81, AvailabilityStatus::Disponible, 0)];
        assert_eq!(DirectoryStats::compute(&orgs).average_rse_score, 81);
    }
}
