//! # REST API for Badges

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::backend::io::rest::error::{respond, ApiError};
use crate::backend::io::rest::extract::ApiPath;
use crate::backend::io::rest::mappers::badge_mapper::BadgeMapper;
use crate::backend::AppState;

/// Create a router for badge APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/badges", get(list_badges))
        .route("/badges/evaluate", post(evaluate_badges))
}

/// Every catalog badge with the user's progress
pub async fn list_badges(State(state): State<AppState>, ApiPath(user_id): ApiPath<String>) -> Response {
    info!("GET /api/users/{}/badges", user_id);

    match state.badge_service.list_badges(&user_id).await {
        Ok(statuses) => respond(StatusCode::OK, BadgeMapper::to_list_response(statuses)),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Recompute progress; responds with the badges earned by this call
pub async fn evaluate_badges(State(state): State<AppState>, ApiPath(user_id): ApiPath<String>) -> Response {
    info!("POST /api/users/{}/badges/evaluate", user_id);

    match state.badge_service.evaluate(&user_id).await {
        Ok(earned) => respond(StatusCode::OK, BadgeMapper::to_dto_list(&earned)),
        Err(e) => ApiError::from(e).into_response(),
    }
}
