//! # Storage Module
//!
//! Handles all data persistence for the wellness journal.
//!
//! A single SQLite database (via SQLx) holds four tables: `profiles`,
//! `journal_entries`, `user_badges` and `preferences`. Every child table
//! references `profiles(id)` with `ON DELETE CASCADE`, and all queries are
//! scoped by user id so one user's rows are never visible to another.
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: Clean separation between domain and data access
//! - **Schema on startup**: `CREATE TABLE IF NOT EXISTS`, no migration tool
//! - **Testability**: `DbConnection::init_test()` gives each test its own in-memory database

pub mod connection;
pub mod repositories;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{
    BadgeRepository,
    EntryStats,
    JournalRepository,
    PreferenceRepository,
    ProfileRepository,
};
