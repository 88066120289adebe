//! # REST API for Preferences
//!
//! Small per-user UI settings stored as key/value strings.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::info;

use crate::backend::domain::preference_service::validate_key;
use crate::backend::domain::DomainError;
use crate::backend::io::rest::error::{respond, ApiError};
use crate::backend::io::rest::extract::{ApiJson, ApiPath, ApiQuery};
use crate::backend::io::rest::mappers::account_mapper::AccountMapper;
use crate::backend::AppState;
use shared::{PreferenceEntry, PreferenceListResponse, PreferenceQuery, SetPreferenceRequest};

/// Create a router for preference APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/preferences", get(list_preferences))
        .route(
            "/preferences/:key",
            get(get_preference).put(set_preference).delete(delete_preference),
        )
}

pub async fn list_preferences(State(state): State<AppState>, ApiPath(user_id): ApiPath<String>) -> Response {
    info!("GET /api/users/{}/preferences", user_id);

    match state.preference_service.list(&user_id).await {
        Ok(pairs) => respond(
            StatusCode::OK,
            PreferenceListResponse {
                preferences: AccountMapper::to_preference_entries(pairs),
            },
        ),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// One preference; with `?default=` a missing value reads as the default instead of 404
pub async fn get_preference(
    State(state): State<AppState>,
    ApiPath((user_id, key)): ApiPath<(String, String)>,
    ApiQuery(query): ApiQuery<PreferenceQuery>,
) -> Response {
    info!("GET /api/users/{}/preferences/{}", user_id, key);

    if let Err(e) = validate_key(&key) {
        return ApiError::from(e).into_response();
    }
    if let Some(default) = query.default {
        let value = state.preference_service.get_string(&user_id, &key, &default).await;
        return respond(StatusCode::OK, PreferenceEntry { key, value });
    }

    match state.preference_service.get_raw(&user_id, &key).await {
        Ok(Some(value)) => respond(StatusCode::OK, PreferenceEntry { key, value }),
        Ok(None) => ApiError::from(DomainError::NotFound(format!("Preference not found: {}", key))).into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn set_preference(
    State(state): State<AppState>,
    ApiPath((user_id, key)): ApiPath<(String, String)>,
    ApiJson(request): ApiJson<SetPreferenceRequest>,
) -> Response {
    info!("PUT /api/users/{}/preferences/{}", user_id, key);

    match state
        .preference_service
        .set_string(&user_id, &key, &request.value)
        .await
    {
        Ok(()) => respond(
            StatusCode::OK,
            PreferenceEntry {
                key,
                value: request.value,
            },
        ),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn delete_preference(
    State(state): State<AppState>,
    ApiPath((user_id, key)): ApiPath<(String, String)>,
) -> Response {
    info!("DELETE /api/users/{}/preferences/{}", user_id, key);

    match state.preference_service.remove(&user_id, &key).await {
        Ok(()) => respond(StatusCode::OK, serde_json::json!({ "deleted_key": key })),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::io::rest::test_support::{send, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_preference_round_trip() {
        let app = TestApp::new().await;
        send(
            &app.router,
            Method::POST,
            "/api/profiles",
            Some(json!({ "user_id": "user-1", "display_name": "Robin" })),
        )
        .await;

        let uri = "/api/users/user-1/preferences/theme";
        let (status, _) = send(&app.router, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app.router, Method::PUT, uri, Some(json!({ "value": "dark" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["value"], "dark");

        let (_, body) = send(&app.router, Method::GET, uri, None).await;
        assert_eq!(body["data"]["value"], "dark");

        let (_, body) = send(&app.router, Method::GET, "/api/users/user-1/preferences", None).await;
        assert_eq!(body["data"]["preferences"][0]["key"], "theme");

        let (status, _) = send(&app.router, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app.router, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_with_default() {
        let app = TestApp::new().await;
        send(
            &app.router,
            Method::POST,
            "/api/profiles",
            Some(json!({ "user_id": "user-1", "display_name": "Robin" })),
        )
        .await;

        let uri = "/api/users/user-1/preferences/theme?default=light";
        let (status, body) = send(&app.router, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["value"], "light");

        send(
            &app.router,
            Method::PUT,
            "/api/users/user-1/preferences/theme",
            Some(json!({ "value": "dark" })),
        )
        .await;
        let (_, body) = send(&app.router, Method::GET, uri, None).await;
        assert_eq!(body["data"]["value"], "dark");

        let (status, _) = send(
            &app.router,
            Method::GET,
            "/api/users/user-1/preferences/bad%20key?default=x",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_set_without_profile_or_bad_key() {
        let app = TestApp::new().await;
        let (status, _) = send(
            &app.router,
            Method::PUT,
            "/api/users/ghost/preferences/theme",
            Some(json!({ "value": "dark" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app.router,
            Method::PUT,
            "/api/users/ghost/preferences/bad%20key",
            Some(json!({ "value": "dark" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
