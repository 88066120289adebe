//! # Outbound Clients
//!
//! HTTP clients for third-party services, each behind a trait so domain
//! services can be exercised with in-process stubs.

pub mod completion;
pub mod payment;

pub use completion::{CompletionClient, CompletionRequest, OpenAiClient};
pub use payment::{PaymentGateway, StripeGateway};
