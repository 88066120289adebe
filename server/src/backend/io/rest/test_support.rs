//! Shared fixtures for router-level tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt; // for `oneshot`

use crate::backend::clients::{CompletionClient, CompletionRequest, PaymentGateway};
use crate::backend::domain::commands::checkout::{
    CheckoutSession, CheckoutSessionParams, CheckoutSettings,
};
use crate::backend::storage::DbConnection;
use crate::backend::{create_router, AppState};

/// Completion stub: `Some(text)` answers, `None` fails like an unreachable API
pub struct StubCompletion(pub Option<String>);

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        self.0.clone().ok_or_else(|| anyhow!("completion API unreachable"))
    }
}

#[derive(Default)]
pub struct StubGateway {
    pub fail: bool,
    pub seen: Mutex<Vec<CheckoutSessionParams>>,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_checkout_session(&self, params: &CheckoutSessionParams) -> Result<CheckoutSession> {
        self.seen.lock().unwrap().push(params.clone());
        if self.fail {
            return Err(anyhow!("gateway returned 500"));
        }
        Ok(CheckoutSession {
            id: "cs_test_42".to_string(),
            url: "https://checkout.example.com/cs_test_42".to_string(),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub gateway: Arc<StubGateway>,
}

impl TestApp {
    /// App whose completion API always fails
    pub async fn new() -> Self {
        Self::with_clients(StubCompletion(None), StubGateway::default()).await
    }

    pub async fn with_clients(completion: StubCompletion, gateway: StubGateway) -> Self {
        Self::build(completion, gateway, "http://localhost:8080").await
    }

    /// App allowing cross-origin requests from `cors_origin`
    pub async fn with_cors_origin(cors_origin: &str) -> Self {
        Self::build(StubCompletion(None), StubGateway::default(), cors_origin).await
    }

    async fn build(completion: StubCompletion, gateway: StubGateway, cors_origin: &str) -> Self {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let gateway = Arc::new(gateway);
        let settings = CheckoutSettings {
            price_id: Some("price_test".to_string()),
            success_url: "http://localhost:8080/?checkout=success".to_string(),
            cancel_url: "http://localhost:8080/?checkout=cancel".to_string(),
        };
        let state = AppState::new(db, Arc::new(completion), gateway.clone(), settings);

        Self {
            router: create_router(state, cors_origin),
            gateway,
        }
    }
}

/// Fire one request and decode the JSON envelope
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
