use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_organization, create_service, list_organizations, organization_stats,
    refresh_organizations,
};
use crate::app_state::AppState;

pub fn organization_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_organizations).post(create_organization))
        .route("/stats", get(organization_stats))
        .route("/refresh", post(refresh_organizations))
        .route("/{id}/services", post(create_service))
}
