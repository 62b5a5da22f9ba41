use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

/// Per-reporter profile row holding the onboarding selections.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ReporterProfile {
    pub user_id: Uuid,
    pub interests: Vec<String>,
    pub activities: Vec<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub onboarded_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Terminal payload of the onboarding wizard. Interests carry the same
/// non-empty guard the wizard enforces; activities may be empty (skip path).
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteOnboarding {
    #[validate(length(min = 1))]
    pub interests: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}
