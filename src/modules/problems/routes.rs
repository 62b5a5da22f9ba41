use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_problem, list_problems, problem_stats, refresh_problems};
use crate::app_state::AppState;

pub fn problem_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_problems).post(create_problem))
        .route("/stats", get(problem_stats))
        .route("/refresh", post(refresh_problems))
}
