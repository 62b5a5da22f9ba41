use axum::{extract::Query, extract::State, http::StatusCode, Json};
use fluent_bundle::FluentArgs;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app_state::AppState;
use crate::auth::CurrentUser;
use crate::db::models::{CompleteOnboarding, ReporterProfile};
use crate::db::repositories::ProfileRepository;
use crate::error::{AppError, AppResult};
use crate::i18n::I18n;

use super::catalog::{interest_by_id, partition_activities, Activity, Interest, INTERESTS};
use super::wizard::OnboardingWizard;

/// Welcome points granted on completed onboarding.
const WELCOME_POINTS: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Comma-separated interest ids driving the recommendation split.
    pub interests: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub interests: &'static [Interest],
    pub recommended: Vec<&'static Activity>,
    pub other: Vec<&'static Activity>,
}

#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub message: String,
    pub profile: ReporterProfile,
}

/// Reference data for the wizard: the interest catalog plus the activity
/// partition for the given selection, recommended first.
pub async fn onboarding_catalog(
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<CatalogResponse>> {
    let selected: Vec<String> = query
        .interests
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let (recommended, other) = partition_activities(&selected);

    Ok(Json(CatalogResponse {
        interests: INTERESTS,
        recommended,
        other,
    }))
}

/// Terminal wizard action: replay the selections through the state machine
/// so its guards hold server-side, then persist them to the reporter
/// profile.
pub async fn complete_onboarding(
    user: CurrentUser,
    State(state): State<AppState>,
    i18n: I18n,
    Json(payload): Json<CompleteOnboarding>,
) -> AppResult<(StatusCode, Json<CompleteResponse>)> {
    payload.validate()?;

    if let Some(unknown) = payload
        .interests
        .iter()
        .find(|id| interest_by_id(id).is_none())
    {
        return Err(AppError::Validation(format!("unknown interest: {unknown}")));
    }

    let mut wizard = OnboardingWizard::new();
    wizard.advance().map_err(to_validation)?;
    for interest in &payload.interests {
        wizard.toggle_interest(interest);
    }
    wizard.advance().map_err(to_validation)?;
    for activity in &payload.activities {
        wizard.toggle_activity(activity);
    }
    wizard.advance().map_err(to_validation)?;
    let selections = wizard.finish().map_err(to_validation)?;

    let profile = ProfileRepository::upsert_onboarding(
        &state.db,
        user.id,
        &selections.interests,
        &selections.activities,
    )
    .await?;

    let mut args = FluentArgs::new();
    args.set("points", WELCOME_POINTS);

    Ok((
        StatusCode::CREATED,
        Json(CompleteResponse {
            message: i18n.get_with_args("onboarding-complete", &args),
            profile,
        }),
    ))
}

/// The caller's onboarding profile, if onboarding ever completed.
pub async fn get_profile(
    user: CurrentUser,
    State(state): State<AppState>,
) -> AppResult<Json<ReporterProfile>> {
    let profile = ProfileRepository::fetch(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("profile".to_string()))?;
    Ok(Json(profile))
}

fn to_validation(error: super::wizard::WizardError) -> AppError {
    AppError::Validation(error.to_string())
}
