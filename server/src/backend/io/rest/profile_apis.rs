//! # REST API for Profiles
//!
//! Endpoints for creating profiles, renaming them and switching subscription tier.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Router,
};
use tracing::info;

use crate::backend::io::rest::error::{respond, ApiError};
use crate::backend::io::rest::extract::{ApiJson, ApiPath};
use crate::backend::io::rest::mappers::profile_mapper::ProfileMapper;
use crate::backend::AppState;
use shared::{CreateProfileRequest, UpdateProfileRequest, UpdateSubscriptionRequest};

/// Create a router for profile related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_profile))
        .route("/:user_id", put(update_profile).get(get_profile))
        .route("/:user_id/subscription", put(update_subscription))
}

pub async fn create_profile(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateProfileRequest>,
) -> Response {
    info!("POST /api/profiles - user_id: {}", request.user_id);

    match state
        .profile_service
        .create_profile(&request.user_id, &request.display_name)
        .await
    {
        Ok(profile) => respond(StatusCode::CREATED, ProfileMapper::to_dto(profile)),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn get_profile(State(state): State<AppState>, ApiPath(user_id): ApiPath<String>) -> Response {
    info!("GET /api/profiles/{}", user_id);

    match state.profile_service.get_profile(&user_id).await {
        Ok(profile) => respond(StatusCode::OK, ProfileMapper::to_dto(profile)),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Response {
    info!("PUT /api/profiles/{}", user_id);

    match state
        .profile_service
        .update_display_name(&user_id, &request.display_name)
        .await
    {
        Ok(profile) => respond(StatusCode::OK, ProfileMapper::to_dto(profile)),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn update_subscription(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateSubscriptionRequest>,
) -> Response {
    info!("PUT /api/profiles/{}/subscription - tier: {}", user_id, request.tier.as_str());

    match state
        .profile_service
        .set_subscription_tier(&user_id, request.tier)
        .await
    {
        Ok(profile) => respond(StatusCode::OK, ProfileMapper::to_dto(profile)),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::io::rest::test_support::{send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_get_profile() {
        let app = TestApp::new().await;
        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/profiles",
            Some(json!({ "user_id": "user-1", "display_name": "Robin" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["display_name"], "Robin");
        assert_eq!(body["data"]["subscription_tier"], "free");
        assert_eq!(body["data"]["current_streak"], 0);

        let (status, body) = send(&app.router, Method::GET, "/api/profiles/user-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], "user-1");
    }

    #[tokio::test]
    async fn test_duplicate_and_missing_profiles() {
        let app = TestApp::new().await;
        let request = json!({ "user_id": "user-1", "display_name": "Robin" });
        send(&app.router, Method::POST, "/api/profiles", Some(request.clone())).await;

        let (status, body) = send(&app.router, Method::POST, "/api/profiles", Some(request)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);

        let (status, _) = send(&app.router, Method::GET, "/api/profiles/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rename_and_upgrade() {
        let app = TestApp::new().await;
        send(
            &app.router,
            Method::POST,
            "/api/profiles",
            Some(json!({ "user_id": "user-1", "display_name": "Robin" })),
        )
        .await;

        let (status, body) = send(
            &app.router,
            Method::PUT,
            "/api/profiles/user-1",
            Some(json!({ "display_name": "Rob" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["display_name"], "Rob");

        let (status, body) = send(
            &app.router,
            Method::PUT,
            "/api/profiles/user-1/subscription",
            Some(json!({ "tier": "premium" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["subscription_tier"], "premium");

        let (status, _) = send(
            &app.router,
            Method::PUT,
            "/api/profiles/user-1/subscription",
            Some(json!({ "tier": "platinum" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
