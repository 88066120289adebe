//! # IO Module
//!
//! The adapter layer between HTTP clients and the domain services.
//!
//! Handlers translate JSON requests into domain calls, map domain results
//! into the DTOs from the `shared` crate and wrap every body in the
//! `{success, data | error}` envelope.

pub mod rest;
