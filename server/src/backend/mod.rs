//! # Backend Module
//!
//! Everything behind the HTTP port of the wellness journal.
//!
//! This module brings together:
//! - **Domain**: Journal, streak, badge, companion and paywall rules
//! - **Storage**: SQLite persistence
//! - **Clients**: Outbound calls to the completion API and the payment processor
//! - **IO**: The REST layer exposed to the web frontend
//!
//! ## Architecture
//!
//! ```text
//! Web frontend
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓              ↓
//! Storage Layer   Clients (completion API, payments)
//! ```

pub mod clients;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::backend::clients::{CompletionClient, OpenAiClient, PaymentGateway, StripeGateway};
use crate::backend::domain::commands::checkout::CheckoutSettings;
use crate::backend::domain::{
    AccountService, BadgeService, CheckoutService, CompanionService, ExportService, JournalService,
    PreferenceService, ProfileService,
};
use crate::backend::storage::DbConnection;
use crate::config::Config;

const PAYMENT_TIMEOUT: Duration = Duration::from_secs(20);

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub profile_service: ProfileService,
    pub journal_service: JournalService,
    pub badge_service: BadgeService,
    pub companion_service: CompanionService,
    pub preference_service: PreferenceService,
    pub export_service: ExportService,
    pub account_service: AccountService,
    pub checkout_service: CheckoutService,
}

impl AppState {
    /// Wire every service onto one database and the given outbound clients
    pub fn new(
        db: DbConnection,
        completion_client: Arc<dyn CompletionClient>,
        payment_gateway: Arc<dyn PaymentGateway>,
        checkout_settings: CheckoutSettings,
    ) -> Self {
        let profile_service = ProfileService::new(db.clone());
        let badge_service = BadgeService::new(db.clone());
        let journal_service = JournalService::new(db.clone(), profile_service.clone(), badge_service.clone());
        let export_service = ExportService::new(db.clone(), profile_service.clone(), badge_service.clone());
        let checkout_service = CheckoutService::new(profile_service.clone(), payment_gateway, checkout_settings);

        Self {
            journal_service,
            export_service,
            checkout_service,
            companion_service: CompanionService::new(completion_client),
            preference_service: PreferenceService::new(db.clone()),
            account_service: AccountService::new(db),
            profile_service,
            badge_service,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up outbound clients");
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY not set, companion endpoints will serve fallback text");
    }
    let completion_client = OpenAiClient::new(
        &config.openai_base_url,
        config.openai_api_key.clone(),
        &config.openai_model,
        config.openai_timeout,
    )?;
    let payment_gateway = StripeGateway::new(
        &config.stripe_base_url,
        config.stripe_secret_key.clone(),
        PAYMENT_TIMEOUT,
    )?;

    info!("Setting up application state");
    Ok(AppState::new(
        db_conn,
        Arc::new(completion_client),
        Arc::new(payment_gateway),
        config.checkout_settings(),
    ))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = match origin.parse::<HeaderValue>() {
        Ok(value) => AllowOrigin::exact(value),
        Err(e) => {
            warn!("Invalid CORS origin {:?}: {}, allowing any origin", origin, e);
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .nest("/api", io::rest::api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .with_state(app_state)
}
