use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{
    NewOrganization, NewOrganizationService, Organization, OrganizationService,
};
use crate::db::repositories::OrganizationRepository;
use crate::error::AppResult;
use crate::i18n::I18n;

use super::filter::{filter_organizations, DirectoryFilters, DirectorySort};
use super::stats::DirectoryStats;

#[derive(Debug, Deserialize)]
pub struct DirectoryQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub org_type: Option<String>,
    pub category: Option<String>,
    pub city: Option<String>,
    pub rating: Option<f64>,
    pub availability: Option<String>,
    pub certification: Option<bool>,
    pub rse_score: Option<i32>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DirectoryResponse {
    pub total: usize,
    pub active_filters: usize,
    pub stats: DirectoryStats,
    pub organizations: Vec<Organization>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrganizationResponse {
    pub message: String,
    pub organization: Organization,
}

#[derive(Debug, Serialize)]
pub struct CreateServiceResponse {
    pub message: String,
    pub service: OrganizationService,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub message: String,
    pub total: usize,
}

/// Public directory of verified organizations, filtered and sorted. The
/// header statistics are computed over the unfiltered directory, matching
/// the dashboard display.
pub async fn list_organizations(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> AppResult<Json<DirectoryResponse>> {
    let snapshot = load_organizations(&state).await;

    let filters = DirectoryFilters::from_params(
        query.search.as_deref(),
        query.org_type.as_deref(),
        query.category.as_deref(),
        query.city.as_deref(),
        query.rating,
        query.availability.as_deref(),
        query.certification,
        query.rse_score,
    );
    let sort = DirectorySort::from_param(query.sort.as_deref());
    let organizations = filter_organizations(&snapshot, &filters, sort);

    Ok(Json(DirectoryResponse {
        total: organizations.len(),
        active_filters: filters.active_count(),
        stats: DirectoryStats::compute(&snapshot),
        organizations,
    }))
}

/// Directory aggregates alone, for dashboard tiles.
pub async fn organization_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DirectoryStats>> {
    let snapshot = load_organizations(&state).await;
    Ok(Json(DirectoryStats::compute(&snapshot)))
}

/// Register an organization. It stays out of the directory until verified,
/// so the cached snapshot is not touched.
pub async fn create_organization(
    user: CurrentUser,
    State(state): State<AppState>,
    i18n: I18n,
    Json(payload): Json<NewOrganization>,
) -> AppResult<(StatusCode, Json<CreateOrganizationResponse>)> {
    payload.validate()?;

    let organization = OrganizationRepository::insert(&state.db, user.id, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrganizationResponse {
            message: i18n.get("organization-created"),
            organization,
        }),
    ))
}

/// Attach a service to an organization. Invalidates the directory snapshot
/// so service counts refresh on the next read.
pub async fn create_service(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(organization_id): Path<Uuid>,
    i18n: I18n,
    Json(payload): Json<NewOrganizationService>,
) -> AppResult<(StatusCode, Json<CreateServiceResponse>)> {
    payload.validate()?;

    let service =
        OrganizationRepository::insert_service(&state.db, organization_id, &payload).await?;
    state.organizations.invalidate().await;

    Ok((
        StatusCode::CREATED,
        Json(CreateServiceResponse {
            message: i18n.get("service-created"),
            service,
        }),
    ))
}

/// Explicit refetch of the directory.
pub async fn refresh_organizations(
    State(state): State<AppState>,
    i18n: I18n,
) -> AppResult<Json<RefreshResponse>> {
    let db = state.db.clone();
    let snapshot = state
        .organizations
        .refresh(move || async move { OrganizationRepository::fetch_verified(&db).await })
        .await;

    Ok(Json(RefreshResponse {
        message: i18n.get("organizations-refreshed"),
        total: snapshot.len(),
    }))
}

async fn load_organizations(state: &AppState) -> std::sync::Arc<Vec<Organization>> {
    let db = state.db.clone();
    state
        .organizations
        .get_or_load(move || async move { OrganizationRepository::fetch_verified(&db).await })
        .await
}
