use serde::Serialize;

use crate::db::models::{Problem, ProblemStatus};

/// Dashboard aggregates over a problem collection (pre- or post-filter,
/// caller's choice). Pure and recomputed on every call; the expected data
/// volume is hundreds of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub cancelled: usize,
    /// `round(100 * resolved / total)`, 0 for an empty collection. The zero
    /// branch is explicit so no NaN can reach a display.
    pub resolution_rate: u32,
}

impl ProblemStats {
    pub fn compute(problems: &[Problem]) -> Self {
        let total = problems.len();
        let resolved = count_by_status(problems, ProblemStatus::Resolved);
        let resolution_rate = if total == 0 {
            0
        } else {
            ((resolved as f64 / total as f64) * 100.0).round() as u32
        };

        Self {
            total,
            pending: count_by_status(problems, ProblemStatus::Pending),
            in_progress: count_by_status(problems, ProblemStatus::InProgress),
            resolved,
            cancelled: count_by_status(problems, ProblemStatus::Cancelled),
            resolution_rate,
        }
    }
}

pub fn count_by_status(problems: &[Problem], status: ProblemStatus) -> usize {
    problems.iter().filter(|p| p.status == status).count()
}
