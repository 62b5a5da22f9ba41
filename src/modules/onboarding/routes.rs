use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{complete_onboarding, get_profile, onboarding_catalog};
use crate::app_state::AppState;

pub fn onboarding_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(onboarding_catalog))
        .route("/complete", post(complete_onboarding))
        .route("/profile", get(get_profile))
}
