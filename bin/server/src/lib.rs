//! Authentication endpoints for the orchestrator.
//!
//! This crate wires the session lifecycle to HTTP: GitHub as the identity
//! provider, a signed cookie as the credential store, and axum routes under
//! `/auth`.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
