//! # REST API Interface Layer
//!
//! HTTP endpoints for the wellness journal, all mounted under `/api`.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: One `router()` per area, merged by [`api_router`]
//! - **Error Handling**: [`error::ApiError`] turns domain errors into status codes
//! - **Envelopes**: Every body is `{"success": true, "data": ...}` or
//!   `{"success": false, "error": "..."}`, including extractor rejections
//! - **Logging**: One `info!` line per request naming the route

pub mod account_apis;
pub mod badge_apis;
pub mod checkout_apis;
pub mod companion_apis;
pub mod error;
pub mod extract;
pub mod health_apis;
pub mod journal_apis;
pub mod mappers;
pub mod preference_apis;
pub mod profile_apis;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{routing::get, Router};

use crate::backend::AppState;

/// Every API route, relative to `/api`
pub fn api_router() -> Router<AppState> {
    let user_routes = Router::new()
        .merge(journal_apis::router())
        .merge(badge_apis::router())
        .merge(preference_apis::router());

    Router::new()
        .route("/health", get(health_apis::health))
        .nest("/profiles", profile_apis::router())
        .nest("/users/:user_id", user_routes)
        .merge(companion_apis::router())
        .merge(account_apis::router())
        .merge(checkout_apis::router())
}

#[cfg(test)]
mod tests {
    use super::test_support::{send, TestApp};
    use axum::{
        body::Body,
        http::{header, HeaderMap, Method, Request, StatusCode},
    };
    use serde_json::json;
    use tower::util::ServiceExt; // for `oneshot`

    async fn preflight(app: &TestApp, origin: &str) -> HeaderMap {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/users/user-1/entries")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert!(response.status().is_success());
        response.headers().clone()
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_configured_origin() {
        let app = TestApp::new().await;
        let headers = preflight(&app, "http://localhost:8080").await;

        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:8080"
        );
        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        for method in ["GET", "POST", "PUT", "DELETE"] {
            assert!(methods.contains(method), "{} missing from {}", method, methods);
        }
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
    }

    #[tokio::test]
    async fn test_cors_rejects_other_origins() {
        let app = TestApp::new().await;
        let headers = preflight(&app, "http://evil.example.com").await;
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[tokio::test]
    async fn test_invalid_cors_origin_allows_any() {
        let app = TestApp::with_cors_origin("http://bad\norigin").await;
        let headers = preflight(&app, "http://anywhere.example.com").await;
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new().await;
        let (status, body) = send(&app.router, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_malformed_body_gets_failure_envelope() {
        let app = TestApp::new().await;
        let (status, body) = send(
            &app.router,
            Method::POST,
            "/api/users/user-1/entries",
            Some(json!({ "content": "hi", "mood": 9 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = TestApp::new().await;
        let (status, _) = send(&app.router, Method::GET, "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
