//! # Domain Module
//!
//! Business logic for the wellness journal.
//!
//! Services here know nothing about HTTP. They take plain values or command
//! structs, enforce the journal's rules and talk to storage through the
//! repositories and to external APIs through the client traits.
//!
//! ## Module Organization
//!
//! - **journal_service**: Entry CRUD, filtering, grouping and mood summaries
//! - **journal_query**: Pure filtering/sorting/grouping helpers
//! - **profile_service**: Profiles, streak counters and subscription tier
//! - **badge_service**: Achievement progress and earned badges
//! - **companion_service**: AI prompts, affirmations and quotes with fallbacks
//! - **preference_service**: Per-user key/value settings
//! - **export_service** / **account_service**: Data export and deletion
//! - **checkout_service**: Premium subscription checkout
//!
//! ## Business Rules
//!
//! - Entry content is non-empty after trimming; mood is a level from 1 to 5
//! - Photo attachments are a premium feature
//! - A streak counts consecutive calendar days (UTC) with at least one entry
//! - Earned badges stay earned

pub mod account_service;
pub mod badge_service;
pub mod checkout_service;
pub mod commands;
pub mod companion_service;
pub mod error;
pub mod export_service;
pub mod fallbacks;
pub mod journal_query;
pub mod journal_service;
pub mod models;
pub mod preference_service;
pub mod profile_service;

pub use account_service::AccountService;
pub use badge_service::{BadgeService, BadgeStatus};
pub use checkout_service::CheckoutService;
pub use companion_service::CompanionService;
pub use error::{DomainError, DomainResult};
pub use export_service::ExportService;
pub use journal_service::JournalService;
pub use preference_service::PreferenceService;
pub use profile_service::ProfileService;
