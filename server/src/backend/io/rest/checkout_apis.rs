//! # REST API for Premium Checkout

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
use crate::backend::AppState;
use shared::{CheckoutRequest, CheckoutResponse};

/// Create a router for checkout APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/checkout", post(create_checkout))
}

pub async fn create_checkout(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> Response {
    info!("POST /api/checkout - user_id: {}", request.user_id);

    match state
        .checkout_service
        .create_checkout_session(
            &request.user_id,
            request.success_url.as_deref(),
            request.cancel_url.as_deref(),
        )
        .await
    {
        Ok(session) => respond(
            StatusCode::OK,
            CheckoutResponse {
                session_id: session.id,
                url: session.url,
            },
        ),
        Err(e) => ApiError::from(e).into_response(),
    }
}
