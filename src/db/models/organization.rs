use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use std::convert::Infallible;
use std::fmt;
use time::OffsetDateTime;
use validator::{Validate, ValidationError};

use super::service::OrganizationService;

/// Legal form of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationType {
    Entreprise,
    Association,
    Ong,
    Gouvernemental,
    #[serde(other)]
    Unknown,
}

impl OrganizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationType::Entreprise => "entreprise",
            OrganizationType::Association => "association",
            OrganizationType::Ong => "ong",
            OrganizationType::Gouvernemental => "gouvernemental",
            OrganizationType::Unknown => "unknown",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "entreprise" => OrganizationType::Entreprise,
            "association" => OrganizationType::Association,
            "ong" => OrganizationType::Ong,
            "gouvernemental" => OrganizationType::Gouvernemental,
            _ => OrganizationType::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, OrganizationType::Unknown)
    }
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for OrganizationType {
    type Error = Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self::from_wire(&value))
    }
}

/// RSE pillar the organization operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationCategory {
    Environnement,
    Social,
    Economique,
    Gouvernance,
    #[serde(other)]
    Unknown,
}

impl OrganizationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationCategory::Environnement => "environnement",
            OrganizationCategory::Social => "social",
            OrganizationCategory::Economique => "economique",
            OrganizationCategory::Gouvernance => "gouvernance",
            OrganizationCategory::Unknown => "unknown",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "environnement" => OrganizationCategory::Environnement,
            "social" => OrganizationCategory::Social,
            "economique" => OrganizationCategory::Economique,
            "gouvernance" => OrganizationCategory::Gouvernance,
            _ => OrganizationCategory::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, OrganizationCategory::Unknown)
    }
}

impl fmt::Display for OrganizationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for OrganizationCategory {
    type Error = Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self::from_wire(&value))
    }
}

/// Whether the organization currently takes on new engagements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    #[serde(rename = "disponible")]
    Disponible,
    #[serde(rename = "occupé")]
    Occupe,
    #[serde(rename = "en_pause")]
    EnPause,
    #[serde(other)]
    Unknown,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Disponible => "disponible",
            AvailabilityStatus::Occupe => "occupé",
            AvailabilityStatus::EnPause => "en_pause",
            AvailabilityStatus::Unknown => "unknown",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value {
            "disponible" => AvailabilityStatus::Disponible,
            "occupé" => AvailabilityStatus::Occupe,
            "en_pause" => AvailabilityStatus::EnPause,
            _ => AvailabilityStatus::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, AvailabilityStatus::Unknown)
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for AvailabilityStatus {
    type Error = Infallible;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self::from_wire(&value))
    }
}

/// An organization offering remediation services. Only `verified = true`
/// rows are eligible for the public directory.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(try_from = "String")]
    pub org_type: OrganizationType,
    #[sqlx(try_from = "String")]
    pub category: OrganizationCategory,
    pub description: Option<String>,
    pub city: String,
    pub region: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
    pub rating: f64,
    pub rse_score: i32,
    pub certifications: Vec<String>,
    pub specialties: Vec<String>,
    #[sqlx(try_from = "String")]
    pub availability_status: AvailabilityStatus,
    pub next_available_date: Option<String>,
    pub years_active: i32,
    pub team_size: i32,
    pub projects_completed: i32,
    pub clients_satisfied: i32,
    pub verified: bool,
    pub owner_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[sqlx(skip)]
    #[serde(default)]
    pub services: Vec<OrganizationService>,
}

/// Registration payload. Verification, rating and RSE score are set by
/// backoffice workflow, never by the registering account.
#[derive(Debug, Deserialize, Validate)]
pub struct NewOrganization {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub org_type: OrganizationType,
    pub category: OrganizationCategory,
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub region: String,
    pub address: Option<String>,
    #[validate(custom(function = validate_tunisian_phone))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default = "default_availability")]
    pub availability_status: AvailabilityStatus,
    pub next_available_date: Option<String>,
    #[serde(default)]
    pub years_active: i32,
    #[serde(default)]
    pub team_size: i32,
    #[serde(default)]
    pub projects_completed: i32,
    #[serde(default)]
    pub clients_satisfied: i32,
}

fn default_availability() -> AvailabilityStatus {
    AvailabilityStatus::Disponible
}

/// Tunisian numbers: eight digits, optionally prefixed with +216 or 216.
fn validate_tunisian_phone(phone: &str) -> Result<(), ValidationError> {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact
        .strip_prefix("+216")
        .or_else(|| compact.strip_prefix("216"))
        .unwrap_or(&compact);
    if digits.len() == 8 && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_local_and_prefixed_forms() {
        assert!(validate_tunisian_phone("71234567").is_ok());
        assert!(validate_tunisian_phone("+216 71 234 567").is_ok());
        assert!(validate_tunisian_phone("21671234567").is_ok());
    }

    #[test]
    fn phone_rejects_short_and_non_numeric() {
        assert!(validate_tunisian_phone("1234").is_err());
        assert!(validate_tunisian_phone("7123456a").is_err());
        assert!(validate_tunisian_phone("+33123456789").is_err());
    }

    #[test]
    fn unknown_wire_values_degrade_instead_of_failing() {
        assert_eq!(OrganizationType::from_wire("cooperative"), OrganizationType::Unknown);
        assert_eq!(AvailabilityStatus::from_wire(""), AvailabilityStatus::Unknown);
        assert_eq!(AvailabilityStatus::from_wire("occupé"), AvailabilityStatus::Occupe);
        assert_eq!(OrganizationCategory::from_wire("social"), OrganizationCategory::Social);
    }
}
