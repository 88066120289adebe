//! Payment processor client used by the subscription paywall.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::backend::domain::commands::checkout::{CheckoutSession, CheckoutSessionParams};

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout_session(&self, params: &CheckoutSessionParams) -> Result<CheckoutSession>;
}

#[derive(Debug, Deserialize)]
struct StripeSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

/// Stripe Checkout Sessions API client
#[derive(Clone)]
pub struct StripeGateway {
    http: reqwest::Client,
    base_url: String,
    secret_key: Option<String>,
}

impl StripeGateway {
    pub fn new(base_url: &str, secret_key: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key,
        })
    }
}

/// Form fields for a one-seat subscription checkout
fn session_form(params: &CheckoutSessionParams) -> Vec<(&'static str, String)> {
    vec![
        ("mode", "subscription".to_string()),
        ("client_reference_id", params.client_reference_id.clone()),
        ("line_items[0][price]", params.price_id.clone()),
        ("line_items[0][quantity]", "1".to_string()),
        ("success_url", params.success_url.clone()),
        ("cancel_url", params.cancel_url.clone()),
    ]
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(&self, params: &CheckoutSessionParams) -> Result<CheckoutSession> {
        let Some(secret_key) = self.secret_key.as_deref() else {
            bail!("Stripe secret key is not configured");
        };

        let url = format!("{}/v1/checkout/sessions", self.base_url);
        debug!("Creating checkout session for {}", params.client_reference_id);

        let session: StripeSessionResponse = self
            .http
            .post(&url)
            .bearer_auth(secret_key)
            .form(&session_form(params))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let url = session
            .url
            .ok_or_else(|| anyhow!("Checkout session {} has no redirect URL", session.id))?;

        Ok(CheckoutSession { id: session.id, url })
    }
}
