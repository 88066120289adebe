//! Wellness journal backend: journal entries, streaks, badges, an AI
//! companion and a subscription paywall served as a JSON API.

pub mod backend;
pub mod config;
