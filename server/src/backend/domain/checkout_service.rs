//! Subscription checkout for the premium tier.

use std::sync::Arc;
use tracing::{error, info};

use crate::backend::clients::PaymentGateway;
use crate::backend::domain::commands::checkout::{
    CheckoutSession, CheckoutSessionParams, CheckoutSettings,
};
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::profile_service::ProfileService;

fn redirect_url(requested: Option<&str>, default: &str, field: &str) -> DomainResult<String> {
    let url = requested
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or(default);
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(DomainError::Validation(format!(
            "{} must be an http(s) URL",
            field
        )));
    }
    Ok(url.to_string())
}

#[derive(Clone)]
pub struct CheckoutService {
    profile_service: ProfileService,
    gateway: Arc<dyn PaymentGateway>,
    settings: CheckoutSettings,
}

impl CheckoutService {
    pub fn new(profile_service: ProfileService, gateway: Arc<dyn PaymentGateway>, settings: CheckoutSettings) -> Self {
        Self {
            profile_service,
            gateway,
            settings,
        }
    }

    pub async fn create_checkout_session(
        &self,
        user_id: &str,
        success_url: Option<&str>,
        cancel_url: Option<&str>,
    ) -> DomainResult<CheckoutSession> {
        let profile = self.profile_service.get_profile(user_id).await?;
        if profile.is_premium() {
            return Err(DomainError::Conflict(format!(
                "Profile {} already has a premium subscription",
                user_id
            )));
        }

        let price_id = self
            .settings
            .price_id
            .clone()
            .ok_or_else(|| DomainError::Upstream("Checkout price is not configured".to_string()))?;

        let params = CheckoutSessionParams {
            client_reference_id: profile.id,
            price_id,
            success_url: redirect_url(success_url, &self.settings.success_url, "success_url")?,
            cancel_url: redirect_url(cancel_url, &self.settings.cancel_url, "cancel_url")?,
        };

        let session = self
            .gateway
            .create_checkout_session(&params)
            .await
            .map_err(|e| {
                error!("Checkout session failed for {}: {:#}", user_id, e);
                DomainError::Upstream("Payment provider request failed".to_string())
            })?;

        info!("Created checkout session {} for {}", session.id, user_id);
        Ok(session)
    }
}
