use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::error::DatabaseError;
use crate::db::models::{
    NewOrganization, NewOrganizationService, Organization, OrganizationService,
};

const ORGANIZATION_COLUMNS: &str = "id, name, org_type, category, description, city, region, \
     address, phone, email, website, logo_url, rating, rse_score, certifications, specialties, \
     availability_status, next_available_date, years_active, team_size, projects_completed, \
     clients_satisfied, verified, owner_id, created_at, updated_at";

const SERVICE_COLUMNS: &str =
    "id, organization_id, name, description, price, duration, category, impact_level, \
     created_at, updated_at";

pub struct OrganizationRepository;

impl OrganizationRepository {
    /// Directory-eligible organizations (`verified = true`), best rated
    /// first, with their services attached.
    pub async fn fetch_verified(pool: &PgPool) -> Result<Vec<Organization>, DatabaseError> {
        let mut organizations = sqlx::query_as::<_, Organization>(&format!(
            "SELECT {ORGANIZATION_COLUMNS} FROM organizations \
             WHERE verified = TRUE ORDER BY rating DESC"
        ))
        .fetch_all(pool)
        .await?;

        if organizations.is_empty() {
            return Ok(organizations);
        }

        let ids: Vec<Uuid> = organizations.iter().map(|org| org.id).collect();
        let services = sqlx::query_as::<_, OrganizationService>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM organization_services \
             WHERE organization_id = ANY($1) ORDER BY created_at"
        ))
        .bind(&ids)
        .fetch_all(pool)
        .await?;

        let mut by_org: HashMap<Uuid, Vec<OrganizationService>> = HashMap::new();
        for service in services {
            by_org.entry(service.organization_id).or_default().push(service);
        }
        for org in &mut organizations {
            org.services = by_org.remove(&org.id).unwrap_or_default();
        }

        Ok(organizations)
    }

    /// Register an organization. New rows start unverified with zero rating
    /// and RSE score; verification is a backoffice concern.
    pub async fn insert(
        pool: &PgPool,
        owner_id: Uuid,
        data: &NewOrganization,
    ) -> Result<Organization, DatabaseError> {
        let organization = sqlx::query_as::<_, Organization>(&format!(
            "INSERT INTO organizations \
                 (name, org_type, category, description, city, region, address, phone, email, \
                  website, logo_url, rating, rse_score, certifications, specialties, \
                  availability_status, next_available_date, years_active, team_size, \
                  projects_completed, clients_satisfied, verified, owner_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 0, 0, $12, $13, $14, $15, \
                     $16, $17, $18, $19, FALSE, $20) \
             RETURNING {ORGANIZATION_COLUMNS}"
        ))
        .bind(&data.name)
        .bind(data.org_type.as_str())
        .bind(data.category.as_str())
        .bind(&data.description)
        .bind(&data.city)
        .bind(&data.region)
        .bind(&data.address)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.website)
        .bind(&data.logo_url)
        .bind(&data.certifications)
        .bind(&data.specialties)
        .bind(data.availability_status.as_str())
        .bind(&data.next_available_date)
        .bind(data.years_active)
        .bind(data.team_size)
        .bind(data.projects_completed)
        .bind(data.clients_satisfied)
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        Ok(organization)
    }

    /// Attach a service to an existing organization.
    pub async fn insert_service(
        pool: &PgPool,
        organization_id: Uuid,
        data: &NewOrganizationService,
    ) -> Result<OrganizationService, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM organizations WHERE id = $1)",
        )
        .bind(organization_id)
        .fetch_one(pool)
        .await?;

        if !exists {
            return Err(DatabaseError::NotFound);
        }

        let service = sqlx::query_as::<_, OrganizationService>(&format!(
            "INSERT INTO organization_services \
                 (organization_id, name, description, price, duration, category, impact_level) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {SERVICE_COLUMNS}"
        ))
        .bind(organization_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.price)
        .bind(&data.duration)
        .bind(&data.category)
        .bind(data.impact_level.map(|level| level.as_str()))
        .fetch_one(pool)
        .await?;

        Ok(service)
    }
}
