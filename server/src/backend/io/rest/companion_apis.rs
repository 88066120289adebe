//! # REST API for the AI Companion
//!
//! These endpoints always answer 200: when the completion API is unavailable
//! the body carries canned text with `generated_by: "fallback"`.

use axum::{extract::State, http::StatusCode, response::Response, routing::post, Router};
use tracing::info;

use crate::backend::io::rest::error::respond;
use crate::backend::io::rest::extract::ApiJson;
use crate::backend::AppState;
use shared::{GenerateAffirmationRequest, GenerateMoodQuoteRequest, GeneratePromptRequest};

/// Create a router for companion APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate-prompt", post(generate_prompt))
        .route("/generate-affirmation", post(generate_affirmation))
        .route("/generate-mood-quote", post(generate_mood_quote))
}

pub async fn generate_prompt(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GeneratePromptRequest>,
) -> Response {
    info!("POST /api/generate-prompt - mood: {:?}", request.mood);

    let text = state
        .companion_service
        .generate_prompt(request.mood, request.topic.as_deref())
        .await;
    respond(StatusCode::OK, text)
}

pub async fn generate_affirmation(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateAffirmationRequest>,
) -> Response {
    info!("POST /api/generate-affirmation - mood: {:?}", request.mood);

    let text = state
        .companion_service
        .generate_affirmation(request.mood, request.name.as_deref())
        .await;
    respond(StatusCode::OK, text)
}

pub async fn generate_mood_quote(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateMoodQuoteRequest>,
) -> Response {
    info!("POST /api/generate-mood-quote - mood: {}", request.mood);

    let text = state.companion_service.generate_mood_quote(request.mood).await;
    respond(StatusCode::OK, text)
}

#[cfg(test)]
mod tests {
    use crate::backend::io::rest::test_support::{send, StubCompletion, StubGateway, TestApp};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_fallback_when_completion_fails() {
        let app = TestApp::new().await;

        for (uri, body) in [
            ("/api/generate-prompt", json!({})),
            ("/api/generate-affirmation", json!({ "mood": 2, "name": "Ari" })),
            ("/api/generate-mood-quote", json!({ "mood": 1 })),
        ] {
            let (status, response) = send(&app.router, Method::POST, uri, Some(body)).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(response["success"], true);
            assert_eq!(response["data"]["generated_by"], "fallback");
            assert!(!response["data"]["text"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_completion_text_is_returned() {
        let app = TestApp::with_clients(
            StubCompletion(Some("What gave you energy today?".to_string())),
            StubGateway::default(),
        )
        .await;

        let (status, response) = send(
            &app.router,
            Method::POST,
            "/api/generate-prompt",
            Some(json!({ "mood": 5, "topic": "friends" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["data"]["generated_by"], "openai");
        assert_eq!(response["data"]["text"], "What gave you energy today?");
    }

    #[tokio::test]
    async fn test_mood_quote_requires_mood() {
        let app = TestApp::new().await;
        let (status, _) = send(&app.router, Method::POST, "/api/generate-mood-quote", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
