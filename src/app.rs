use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    app_state::AppState,
    middleware::{language_middleware, observability_middleware},
    modules::{
        i18n::i18n_routes, onboarding::onboarding_routes, organizations::organization_routes,
        problems::problem_routes,
    },
    websocket::websocket_routes,
};

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state);

    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .route("/api/client-config", get(client_config))
        .merge(websocket_routes())
        .nest("/api/problems", problem_routes())
        .nest("/api/organizations", organization_routes())
        .nest("/api/onboarding", onboarding_routes())
        .nest("/api/i18n", i18n_routes())
        .layer(middleware::from_fn(observability_middleware))
        .layer(middleware::from_fn(language_middleware))
        .layer(cors)
        .with_state(state)
}

/// CORS for the SPA: pinned to the configured origin, permissive in
/// development when none is set.
fn cors_layer(state: &AppState) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match state
        .env
        .app
        .frontend_origin
        .as_deref()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
    {
        Some(origin) => layer.allow_origin(origin),
        None => layer.allow_origin(Any),
    }
}

async fn hello() -> &'static str {
    "EcoLink Backend says hello!\n"
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let db_result = sqlx::query("SELECT 1").execute(&state.db).await;

    let db_status = match db_result {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    let telemetry_health = crate::telemetry::telemetry_health_check();

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
            "telemetry": telemetry_health
        }
    }))
}

/// Client configuration surface: the map provider credential the SPA needs
/// for rendering markers. The backend never calls the map provider itself.
async fn client_config(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "app_name": state.env.app.name,
        "map_access_token": state.env.map.access_token,
    }))
}
