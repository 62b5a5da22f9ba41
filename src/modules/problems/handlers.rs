use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{NewProblem, Problem};
use crate::db::repositories::ProblemRepository;
use crate::error::AppResult;
use crate::i18n::I18n;
use crate::websocket::publish_problem_created;

use super::filter::{filter_problems, ProblemFilters, ProblemSort};
use super::stats::ProblemStats;

#[derive(Debug, Deserialize)]
pub struct ProblemListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub danger: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProblemListResponse {
    pub total: usize,
    pub active_filters: usize,
    pub problems: Vec<Problem>,
}

#[derive(Debug, Serialize)]
pub struct CreateProblemResponse {
    pub message: String,
    pub problem: Problem,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub message: String,
    pub total: usize,
}

/// Filtered, sorted problem listing for the list and map views. Always
/// serves a valid collection; a failed load degrades to the previous
/// snapshot.
pub async fn list_problems(
    State(state): State<AppState>,
    Query(query): Query<ProblemListQuery>,
) -> AppResult<Json<ProblemListResponse>> {
    let snapshot = load_problems(&state).await;

    let filters = ProblemFilters::from_params(
        query.search.as_deref(),
        query.status.as_deref(),
        query.danger.as_deref(),
    );
    let sort = ProblemSort::from_param(query.sort.as_deref());
    let problems = filter_problems(&snapshot, &filters, sort);

    Ok(Json(ProblemListResponse {
        total: problems.len(),
        active_filters: filters.active_count(),
        problems,
    }))
}

/// Dashboard aggregates over the full problem collection.
pub async fn problem_stats(State(state): State<AppState>) -> AppResult<Json<ProblemStats>> {
    let snapshot = load_problems(&state).await;
    Ok(Json(ProblemStats::compute(&snapshot)))
}

/// Report a problem. Requires an authenticated reporter; the cached
/// collection is marked stale but not refetched here.
pub async fn create_problem(
    user: CurrentUser,
    State(state): State<AppState>,
    i18n: I18n,
    Json(payload): Json<NewProblem>,
) -> AppResult<(StatusCode, Json<CreateProblemResponse>)> {
    payload.validate()?;

    let problem = ProblemRepository::insert(&state.db, user.id, &payload).await?;
    state.problems.invalidate().await;
    publish_problem_created(&state.events, &problem);

    Ok((
        StatusCode::CREATED,
        Json(CreateProblemResponse {
            message: i18n.get("problem-created"),
            problem,
        }),
    ))
}

/// Explicit refetch of the problem collection.
pub async fn refresh_problems(
    State(state): State<AppState>,
    i18n: I18n,
) -> AppResult<Json<RefreshResponse>> {
    let db = state.db.clone();
    let snapshot = state
        .problems
        .refresh(move || async move { ProblemRepository::fetch_all(&db).await })
        .await;

    Ok(Json(RefreshResponse {
        message: i18n.get("problems-refreshed"),
        total: snapshot.len(),
    }))
}

async fn load_problems(state: &AppState) -> std::sync::Arc<Vec<Problem>> {
    let db = state.db.clone();
    state
        .problems
        .get_or_load(move || async move { ProblemRepository::fetch_all(&db).await })
        .await
}
