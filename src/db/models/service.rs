use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgTypeInfo, PgValueRef};
use sqlx::types::Uuid;
use sqlx::{Decode, Postgres, Type};
use std::fmt;
use time::OffsetDateTime;
use validator::Validate;

/// Estimated environmental impact of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Faible,
    Moyen,
    Fort,
    #[serde(other)]
    Unknown,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Faible => "faible",
            ImpactLevel::Moyen => "moyen",
            ImpactLevel::Fort => "fort",
            ImpactLevel::Unknown => "unknown",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "faible" => ImpactLevel::Faible,
            "moyen" => ImpactLevel::Moyen,
            "fort" => ImpactLevel::Fort,
            _ => ImpactLevel::Unknown,
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Stored as TEXT; decoding never fails, out-of-set values become Unknown.
impl Type<Postgres> for ImpactLevel {
    fn type_info() -> PgTypeInfo {
        <String as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for ImpactLevel {
    fn decode(value: PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as Decode<'r, Postgres>>::decode(value)?;
        Ok(ImpactLevel::from_wire(raw))
    }
}

/// A remediation service owned by exactly one organization.
///
/// `price` is an opaque display string ("1500 TND", "Gratuit"); it is never
/// compared numerically.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct OrganizationService {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub duration: Option<String>,
    pub category: String,
    pub impact_level: Option<ImpactLevel>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewOrganizationService {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub price: String,
    pub duration: Option<String>,
    #[validate(length(min = 1))]
    pub category: String,
    pub impact_level: Option<ImpactLevel>,
}
