use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use std::convert::Infallible;
use std::fmt;
use time::OffsetDateTime;
use validator::{Validate, ValidationError};

/// Severity of a reported environmental problem.
///
/// `Unknown` absorbs values from the store outside the closed set so that
/// rendering and filtering never fail on unexpected data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerLevel {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl DangerLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DangerLevel::Low => "low",
            DangerLevel::Medium => "medium",
            DangerLevel::High => "high",
            DangerLevel::Unknown => "unknown",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "low" => DangerLevel::Low,
            "medium" => DangerLevel::Medium,
            "high" => DangerLevel::High,
            _ => DangerLevel::Unknown,
        }
    }

    /// Ordering weight for severity sorts. Unknown ranks below every known
    /// level.
    pub fn severity_rank(&self) -> u8 {
        match self {
            DangerLevel::High => 3,
            DangerLevel::Medium => 2,
            DangerLevel::Low => 1,
            DangerLevel::Unknown => 0,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DangerLevel::Unknown)
    }
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for DangerLevel {
    type Error = Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self::from_wire(&value))
    }
}

/// Workflow state of a problem. Mutated only by backend-side workflow;
/// clients create problems as `Pending` and never delete them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemStatus {
    Pending,
    InProgress,
    Resolved,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ProblemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemStatus::Pending => "pending",
            ProblemStatus::InProgress => "in-progress",
            ProblemStatus::Resolved => "resolved",
            ProblemStatus::Cancelled => "cancelled",
            ProblemStatus::Unknown => "unknown",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "pending" => ProblemStatus::Pending,
            "in-progress" => ProblemStatus::InProgress,
            "resolved" => ProblemStatus::Resolved,
            "cancelled" => ProblemStatus::Cancelled,
            _ => ProblemStatus::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ProblemStatus::Unknown)
    }
}

impl fmt::Display for ProblemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for ProblemStatus {
    type Error = Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self::from_wire(&value))
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    #[sqlx(try_from = "String")]
    pub danger_level: DangerLevel,
    #[sqlx(try_from = "String")]
    pub status: ProblemStatus,
    pub image_url: Option<String>,
    pub reporter_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewProblem {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub location: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    #[validate(custom(function = validate_known_danger))]
    pub danger_level: DangerLevel,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// New reports must carry one of the closed danger levels; `Unknown` only
/// exists to absorb malformed data already in the store.
fn validate_known_danger(level: &DangerLevel) -> Result<(), ValidationError> {
    if level.is_known() {
        Ok(())
    } else {
        Err(ValidationError::new("danger_level"))
    }
}
