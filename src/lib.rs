// Yummy Recipes API
// Users keep personal recipe collections grouped into categories, behind bearer-token auth

pub mod auth;
pub mod categories;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod query;
pub mod recipes;
pub mod state;
pub mod validation;

use axum::{
    extract::State,
    http::StatusCode,
    middleware::map_response,
    response::Json,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::{handle_not_found, json_method_not_allowed};
use crate::models::HealthResponse;
pub use crate::state::AppState;

/// Handler for GET /health
/// Reports whether the database is reachable
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if db::ping(&state.db).await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                database: "ok".to_string(),
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded".to_string(),
                database: "unavailable".to_string(),
            }),
        )
    }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds tracing and CORS middleware
pub fn create_router(state: AppState) -> Router {
    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1/auth", auth::router())
        .merge(categories::router())
        .fallback(handle_not_found)
        .layer(map_response(json_method_not_allowed))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
