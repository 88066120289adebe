//! # REST API for Account Data
//!
//! Data export and permanent account deletion.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tracing::info;

use crate::backend::io::rest::error::{respond, ApiError};
use crate::backend::io::rest::extract::ApiJson;
use crate::backend::io::rest::mappers::account_mapper::AccountMapper;
use crate::backend::AppState;
use shared::UserDataRequest;

/// Create a router for account data APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export-data", post(export_data))
        .route("/delete-account", post(delete_account))
}

/// Everything stored for the user as one JSON document
pub async fn export_data(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UserDataRequest>,
) -> Response {
    info!("POST /api/export-data - user_id: {}", request.user_id);

    match state.export_service.export_user_data(&request.user_id).await {
        Ok(bundle) => respond(StatusCode::OK, AccountMapper::to_export_dto(bundle)),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_account(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UserDataRequest>,
) -> Response {
    info!("POST /api/delete-account - user_id: {}", request.user_id);

    match state.account_service.delete_user_data(&request.user_id).await {
        Ok(counts) => respond(
            StatusCode::OK,
            AccountMapper::to_delete_response(request.user_id, counts),
        ),
        Err(e) => ApiError::from(e).into_response(),
    }
}
