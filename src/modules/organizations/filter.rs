use crate::db::models::{
    AvailabilityStatus, Organization, OrganizationCategory, OrganizationType,
};
use crate::modules::problems::filter::parse_discriminator;

/// Directory filter configuration. One discriminator per filterable
/// dimension; a field at its default deactivates that predicate, and
/// predicates combine with logical AND.
#[derive(Debug, Clone, Default)]
pub struct DirectoryFilters {
    pub search: String,
    pub org_type: Option<OrganizationType>,
    pub category: Option<OrganizationCategory>,
    pub city: Option<String>,
    pub min_rating: f64,
    pub availability: Option<AvailabilityStatus>,
    pub certified_only: bool,
    pub min_rse_score: i32,
}

impl DirectoryFilters {
    pub fn is_inactive(&self) -> bool {
        self.active_count() == 0
    }

    pub fn active_count(&self) -> usize {
        usize::from(!self.search.is_empty())
            + usize::from(self.org_type.is_some())
            + usize::from(self.category.is_some())
            + usize::from(self.city.is_some())
            + usize::from(self.min_rating > 0.0)
            + usize::from(self.availability.is_some())
            + usize::from(self.certified_only)
            + usize::from(self.min_rse_score > 0)
    }

    /// Query-parameter form. Empty values and the `all` sentinel are
    /// inactive; unrecognized enum values become `Unknown` and therefore
    /// match no well-formed record.
    #[allow(clippy::too_many_arguments)]
    pub fn from_params(
        search: Option<&str>,
        org_type: Option<&str>,
        category: Option<&str>,
        city: Option<&str>,
        min_rating: Option<f64>,
        availability: Option<&str>,
        certified_only: Option<bool>,
        min_rse_score: Option<i32>,
    ) -> Self {
        Self {
            search: search.unwrap_or_default().trim().to_string(),
            org_type: parse_discriminator(org_type).map(OrganizationType::from_wire),
            category: parse_discriminator(category).map(OrganizationCategory::from_wire),
            city: parse_discriminator(city).map(str::to_string),
            min_rating: min_rating.unwrap_or(0.0),
            availability: parse_discriminator(availability).map(AvailabilityStatus::from_wire),
            certified_only: certified_only.unwrap_or(false),
            min_rse_score: min_rse_score.unwrap_or(0),
        }
    }

    fn matches(&self, org: &Organization) -> bool {
        self.matches_search(org)
            && self.matches_type(org)
            && self.matches_category(org)
            && self.matches_city(org)
            && org.rating >= self.min_rating
            && self.matches_availability(org)
            && self.matches_certification(org)
            && org.rse_score >= self.min_rse_score
    }

    /// Case-insensitive substring match over the searchable fields; a hit
    /// on any of name, city or a specialty tag qualifies.
    fn matches_search(&self, org: &Organization) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        org.name.to_lowercase().contains(&needle)
            || org.city.to_lowercase().contains(&needle)
            || org
                .specialties
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }

    fn matches_type(&self, org: &Organization) -> bool {
        match self.org_type {
            None => true,
            Some(t) => org.org_type.is_known() && org.org_type == t,
        }
    }

    fn matches_category(&self, org: &Organization) -> bool {
        match self.category {
            None => true,
            Some(c) => org.category.is_known() && org.category == c,
        }
    }

    fn matches_city(&self, org: &Organization) -> bool {
        match &self.city {
            None => true,
            Some(city) => org.city.eq_ignore_ascii_case(city),
        }
    }

    fn matches_availability(&self, org: &Organization) -> bool {
        match self.availability {
            None => true,
            Some(a) => org.availability_status.is_known() && org.availability_status == a,
        }
    }

    fn matches_certification(&self, org: &Organization) -> bool {
        !self.certified_only || !org.certifications.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectorySort {
    /// Best rated first — the directory default.
    #[default]
    Rating,
    /// Highest composite RSE score first.
    RseScore,
    /// Proximity approximation: city name, lexicographic ascending. True
    /// geo-distance is out of scope.
    Distance,
}

impl DirectorySort {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("rse_score") => DirectorySort::RseScore,
            Some("distance") => DirectorySort::Distance,
            _ => DirectorySort::Rating,
        }
    }
}

/// Ordered subsequence of `organizations` satisfying all active predicates.
/// The sort is stable so equal keys keep the input order across runs.
pub fn filter_organizations(
    organizations: &[Organization],
    filters: &DirectoryFilters,
    sort: DirectorySort,
) -> Vec<Organization> {
    let mut selected: Vec<Organization> = organizations
        .iter()
        .filter(|org| filters.matches(org))
        .cloned()
        .collect();

    match sort {
        DirectorySort::Rating => selected.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        DirectorySort::RseScore => selected.sort_by(|a, b| b.rse_score.cmp(&a.rse_score)),
        DirectorySort::Distance => {
            selected.sort_by(|a, b| a.city.to_lowercase().cmp(&b.city.to_lowercase()))
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn org(name: &str, city: &str, rating: f64, rse_score: i32) -> Organization {
        let at = datetime!(2025-05-10 09:00 UTC);
        Organization {
            id: Uuid::from_u128(rse_score as u128 + 1),
            name: name.to_string(),
            org_type: OrganizationType::Entreprise,
            category: OrganizationCategory::Environnement,
            description: None,
            city: city.to_string(),
            region: "Tunisie".to_string(),
            address: None,
            phone: None,
            email: None,
            website: None,
            logo_url: None,
            rating,
            rse_score,
            certifications: Vec::new(),
            specialties: Vec::new(),
            availability_status: AvailabilityStatus::Disponible,
            next_available_date: None,
            years_active: 5,
            team_size: 10,
            projects_completed: 20,
            clients_satisfied: 18,
            verified: true,
            owner_id: Uuid::from_u128(42),
            created_at: at,
            updated_at: at,
            services: Vec::new(),
        }
    }

    fn sample() -> Vec<Organization> {
        vec![
            org("GreenTech Tunisie", "Tunis", 4.5, 85),
            org("SocialTech Solutions", "Sousse", 4.0, 70),
            org("EcoRecyclage", "Sfax", 3.5, 60),
            org("Gouvernance Plus", "Tunis", 4.8, 92),
        ]
    }

    #[test]
    fn inactive_filters_equal_input_modulo_ordering() {
        let orgs = sample();
        let filters = DirectoryFilters::default();
        assert!(filters.is_inactive());

        let out = filter_organizations(&orgs, &filters, DirectorySort::Rating);
        assert_eq!(out.len(), orgs.len());
        let mut expected: Vec<&str> = orgs.iter().map(|o| o.name.as_str()).collect();
        expected.sort_by(|a, b| {
            let ra = orgs.iter().find(|o| o.name == *a).unwrap().rating;
            let rb = orgs.iter().find(|o| o.name == *b).unwrap().rating;
            rb.total_cmp(&ra)
        });
        let got: Vec<&str> = out.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn categorical_filter_partition_is_complete() {
        let mut orgs = sample();
        orgs[1].org_type = OrganizationType::Association;
        orgs[2].org_type = OrganizationType::Ong;

        let filters = DirectoryFilters {
            org_type: Some(OrganizationType::Entreprise),
            ..Default::default()
        };
        let out = filter_organizations(&orgs, &filters, DirectorySort::Rating);
        assert!(out.iter().all(|o| o.org_type == OrganizationType::Entreprise));
        for excluded in orgs.iter().filter(|o| !out.iter().any(|k| k.id == o.id)) {
            assert_ne!(excluded.org_type, OrganizationType::Entreprise);
        }
        assert_eq!(
            out.len(),
            orgs.iter().filter(|o| o.org_type == OrganizationType::Entreprise).count()
        );
    }

    #[test]
    fn search_misses_name_and_city_unless_specialty_matches() {
        // "sfax" against an organization named "SocialTech Solutions" in
        // Sousse: excluded until a specialty tag contains the query.
        let mut orgs = vec![org("SocialTech Solutions", "Sousse", 4.0, 70)];
        let filters = DirectoryFilters {
            search: "sfax".to_string(),
            ..Default::default()
        };
        assert!(filter_organizations(&orgs, &filters, DirectorySort::Rating).is_empty());

        orgs[0].specialties = vec!["Audit RSE Sfax".to_string()];
        assert_eq!(filter_organizations(&orgs, &filters, DirectorySort::Rating).len(), 1);
    }

    #[test]
    fn rse_threshold_is_inclusive() {
        let orgs = vec![org("GreenTech Tunisie", "Tunis", 4.5, 85)];
        let filters = DirectoryFilters { min_rse_score: 85, ..Default::default() };
        assert_eq!(filter_organizations(&orgs, &filters, DirectorySort::Rating).len(), 1);

        let above = DirectoryFilters { min_rse_score: 86, ..Default::default() };
        assert!(filter_organizations(&orgs, &above, DirectorySort::Rating).is_empty());
    }

    #[test]
    fn rating_threshold_is_inclusive() {
        let orgs = sample();
        let filters = DirectoryFilters { min_rating: 4.0, ..Default::default() };
        let out = filter_organizations(&orgs, &filters, DirectorySort::Rating);
        assert!(out.iter().all(|o| o.rating >= 4.0));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn certification_filter_requires_non_empty_set() {
        let mut orgs = sample();
        orgs[0].certifications = vec!["ISO 14001".to_string()];
        let filters = DirectoryFilters { certified_only: true, ..Default::default() };
        let out = filter_organizations(&orgs, &filters, DirectorySort::Rating);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "GreenTech Tunisie");
    }

    #[test]
    fn city_filter_is_case_insensitive_exact_match() {
        let orgs = sample();
        let filters = DirectoryFilters { city: Some("TUNIS".to_string()), ..Default::default() };
        let out = filter_organizations(&orgs, &filters, DirectorySort::Rating);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|o| o.city == "Tunis"));
    }

    #[test]
    fn availability_filter_is_fail_closed_for_malformed_records() {
        let mut orgs = sample();
        orgs[0].availability_status = AvailabilityStatus::Unknown;

        let inactive = filter_organizations(&orgs, &DirectoryFilters::default(), DirectorySort::Rating);
        assert_eq!(inactive.len(), orgs.len());

        let filters = DirectoryFilters {
            availability: Some(AvailabilityStatus::Disponible),
            ..Default::default()
        };
        let out = filter_organizations(&orgs, &filters, DirectorySort::Rating);
        assert!(out.iter().all(|o| o.availability_status == AvailabilityStatus::Disponible));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn distance_sort_is_lexicographic_by_city() {
        let orgs = sample();
        let out = filter_organizations(&orgs, &DirectoryFilters::default(), DirectorySort::Distance);
        let cities: Vec<&str> = out.iter().map(|o| o.city.as_str()).collect();
        assert_eq!(cities, vec!["Sfax", "Sousse", "Tunis", "Tunis"]);
    }

    #[test]
    fn sorting_is_idempotent_and_stable_on_ties() {
        let mut orgs = sample();
        orgs[0].rating = 4.0; // tie with SocialTech Solutions
        let once = filter_organizations(&orgs, &DirectoryFilters::default(), DirectorySort::Rating);
        let twice = filter_organizations(&once, &DirectoryFilters::default(), DirectorySort::Rating);
        assert_eq!(
            once.iter().map(|o| o.id).collect::<Vec<_>>(),
            twice.iter().map(|o| o.id).collect::<Vec<_>>()
        );
        // Tied records keep their input order.
        let tied: Vec<&str> = once
            .iter()
            .filter(|o| o.rating == 4.0)
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(tied, vec!["GreenTech Tunisie", "SocialTech Solutions"]);
    }

    #[test]
    fn from_params_treats_all_sentinel_as_inactive() {
        let filters = DirectoryFilters::from_params(
            None,
            Some("all"),
            Some("all"),
            Some("all"),
            None,
            Some("all"),
            None,
            None,
        );
        assert!(filters.is_inactive());

        let garbage = DirectoryFilters::from_params(
            None,
            Some("cooperative"),
            None,
            None,
            None,
            None,
            None,
            None,
        );
        assert!(filter_organizations(&sample(), &garbage, DirectorySort::Rating).is_empty());
    }
}
