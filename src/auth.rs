use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::error::AppError;

/// Authenticated caller identity, established by the external identity
/// provider and forwarded by the gateway as `X-User-Id`. This layer only
/// checks presence; token verification happens upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .ok_or(AppError::AuthenticationRequired)?;

        Ok(CurrentUser { id })
    }
}
