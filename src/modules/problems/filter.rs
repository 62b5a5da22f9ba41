use crate::db::models::{DangerLevel, Problem, ProblemStatus};

/// Session-scoped filter configuration for the problems list and map.
/// Every field defaults to inactive; an inactive predicate never excludes
/// anything.
#[derive(Debug, Clone, Default)]
pub struct ProblemFilters {
    pub search: String,
    pub status: Option<ProblemStatus>,
    pub danger: Option<DangerLevel>,
}

impl ProblemFilters {
    pub fn is_inactive(&self) -> bool {
        self.search.is_empty() && self.status.is_none() && self.danger.is_none()
    }

    pub fn active_count(&self) -> usize {
        usize::from(!self.search.is_empty())
            + usize::from(self.status.is_some())
            + usize::from(self.danger.is_some())
    }

    /// Query-parameter form: empty and the `all` sentinel mean inactive.
    /// Any other unrecognized value parses to `Unknown`, which matches no
    /// well-formed record (fail-closed for active filters).
    pub fn from_params(
        search: Option<&str>,
        status: Option<&str>,
        danger: Option<&str>,
    ) -> Self {
        Self {
            search: search.unwrap_or_default().trim().to_string(),
            status: parse_discriminator(status).map(ProblemStatus::from_wire),
            danger: parse_discriminator(danger).map(DangerLevel::from_wire),
        }
    }

    fn matches(&self, problem: &Problem) -> bool {
        self.matches_search(problem) && self.matches_status(problem) && self.matches_danger(problem)
    }

    fn matches_search(&self, problem: &Problem) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        problem.title.to_lowercase().contains(&needle)
            || problem.description.to_lowercase().contains(&needle)
            || problem.location.to_lowercase().contains(&needle)
    }

    fn matches_status(&self, problem: &Problem) -> bool {
        match self.status {
            None => true,
            Some(status) => problem.status.is_known() && problem.status == status,
        }
    }

    fn matches_danger(&self, problem: &Problem) -> bool {
        match self.danger {
            None => true,
            Some(danger) => problem.danger_level.is_known() && problem.danger_level == danger,
        }
    }
}

pub(crate) fn parse_discriminator(raw: Option<&str>) -> Option<&str> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(value) => Some(value),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProblemSort {
    #[default]
    Recent,
    Oldest,
    DangerDesc,
    DangerAsc,
}

impl ProblemSort {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("oldest") => ProblemSort::Oldest,
            Some("danger-high") => ProblemSort::DangerDesc,
            Some("danger-low") => ProblemSort::DangerAsc,
            _ => ProblemSort::Recent,
        }
    }
}

/// Ordered subsequence of `problems` satisfying all active predicates.
/// The sort is stable: records with equal keys keep their input order.
pub fn filter_problems(
    problems: &[Problem],
    filters: &ProblemFilters,
    sort: ProblemSort,
) -> Vec<Problem> {
    let mut selected: Vec<Problem> = problems
        .iter()
        .filter(|problem| filters.matches(problem))
        .cloned()
        .collect();

    match sort {
        ProblemSort::Recent => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ProblemSort::Oldest => selected.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        ProblemSort::DangerDesc => selected.sort_by(|a, b| {
            b.danger_level
                .severity_rank()
                .cmp(&a.danger_level.severity_rank())
        }),
        ProblemSort::DangerAsc => selected.sort_by(|a, b| {
            a.danger_level
                .severity_rank()
                .cmp(&b.danger_level.severity_rank())
        }),
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    fn problem(title: &str, status: ProblemStatus, danger: DangerLevel, age_days: i64) -> Problem {
        let base: OffsetDateTime = datetime!(2025-06-01 12:00 UTC);
        let created = base - Duration::days(age_days);
        Problem {
            id: Uuid::from_u128(age_days as u128 + 1),
            title: title.to_string(),
            description: format!("{title} description"),
            location: "Tunis".to_string(),
            location_lat: None,
            location_lng: None,
            danger_level: danger,
            status,
            image_url: None,
            reporter_id: Uuid::from_u128(99),
            created_at: created,
            updated_at: created,
        }
    }

    fn sample() -> Vec<Problem> {
        vec![
            problem("Décharge sauvage", ProblemStatus::Pending, DangerLevel::High, 0),
            problem("Fuite d'eau", ProblemStatus::InProgress, DangerLevel::Medium, 3),
            problem("Déversement chimique", ProblemStatus::Resolved, DangerLevel::High, 7),
            problem("Bruit nocturne", ProblemStatus::Cancelled, DangerLevel::Low, 1),
        ]
    }

    #[test]
    fn inactive_filters_keep_every_record() {
        let problems = sample();
        let out = filter_problems(&problems, &ProblemFilters::default(), ProblemSort::Recent);
        assert_eq!(out.len(), problems.len());
    }

    #[test]
    fn empty_collection_yields_empty_output() {
        let out = filter_problems(&[], &ProblemFilters::default(), ProblemSort::Recent);
        assert!(out.is_empty());
    }

    #[test]
    fn status_filter_partitions_the_collection() {
        let problems = sample();
        let filters = ProblemFilters {
            status: Some(ProblemStatus::Pending),
            ..Default::default()
        };
        let out = filter_problems(&problems, &filters, ProblemSort::Recent);
        assert!(out.iter().all(|p| p.status == ProblemStatus::Pending));
        let excluded = problems.len() - out.len();
        assert_eq!(
            excluded,
            problems.iter().filter(|p| p.status != ProblemStatus::Pending).count()
        );
    }

    #[test]
    fn search_matches_title_description_and_location() {
        let problems = sample();
        let filters = ProblemFilters {
            search: "FUITE".to_string(),
            ..Default::default()
        };
        let out = filter_problems(&problems, &filters, ProblemSort::Recent);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Fuite d'eau");

        let by_location = ProblemFilters {
            search: "tunis".to_string(),
            ..Default::default()
        };
        assert_eq!(
            filter_problems(&problems, &by_location, ProblemSort::Recent).len(),
            problems.len()
        );
    }

    #[test]
    fn active_filter_excludes_malformed_records_inactive_keeps_them() {
        let mut problems = sample();
        problems.push(problem("Statut corrompu", ProblemStatus::Unknown, DangerLevel::Unknown, 2));

        let inactive = filter_problems(&problems, &ProblemFilters::default(), ProblemSort::Recent);
        assert_eq!(inactive.len(), problems.len());

        for status in [
            ProblemStatus::Pending,
            ProblemStatus::InProgress,
            ProblemStatus::Resolved,
            ProblemStatus::Cancelled,
            ProblemStatus::Unknown,
        ] {
            let filters = ProblemFilters { status: Some(status), ..Default::default() };
            let out = filter_problems(&problems, &filters, ProblemSort::Recent);
            assert!(out.iter().all(|p| p.status.is_known()), "status {status}");
        }
    }

    #[test]
    fn recent_sort_is_descending_and_idempotent() {
        let problems = sample();
        let once = filter_problems(&problems, &ProblemFilters::default(), ProblemSort::Recent);
        let twice = filter_problems(&once, &ProblemFilters::default(), ProblemSort::Recent);
        assert!(once.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(
            once.iter().map(|p| p.id).collect::<Vec<_>>(),
            twice.iter().map(|p| p.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn danger_sort_ranks_unknown_below_low() {
        let mut problems = sample();
        problems.push(problem("Niveau corrompu", ProblemStatus::Pending, DangerLevel::Unknown, 5));
        let out = filter_problems(&problems, &ProblemFilters::default(), ProblemSort::DangerDesc);
        assert_eq!(out.last().unwrap().danger_level, DangerLevel::Unknown);
        assert_eq!(out[0].danger_level, DangerLevel::High);
    }

    #[test]
    fn equal_sort_keys_preserve_input_order() {
        let a = problem("Premier", ProblemStatus::Pending, DangerLevel::High, 4);
        let b = problem("Deuxième", ProblemStatus::Pending, DangerLevel::High, 4);
        let out = filter_problems(
            &[a.clone(), b.clone()],
            &ProblemFilters::default(),
            ProblemSort::DangerDesc,
        );
        assert_eq!(out[0].title, "Premier");
        assert_eq!(out[1].title, "Deuxième");
    }

    #[test]
    fn all_sentinel_is_inactive_garbage_is_fail_closed() {
        let problems = sample();
        let sentinel = ProblemFilters::from_params(None, Some("all"), Some("all"));
        assert!(sentinel.is_inactive());
        assert_eq!(
            filter_problems(&problems, &sentinel, ProblemSort::Recent).len(),
            problems.len()
        );

        let garbage = ProblemFilters::from_params(None, Some("archived"), None);
        assert!(filter_problems(&problems, &garbage, ProblemSort::Recent).is_empty());
    }
}
