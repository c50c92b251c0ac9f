//! # AuthBridge Shared Library
//!
//! This crate contains shared types, utilities, and business logic used across
//! the AuthBridge API server and client shell.
//!
//! ## Module Organization
//!
//! - `models`: Credential and profile models with their store operations
//! - `auth`: Password hashing, JWT sessions, and the session verifier
//! - `db`: PostgreSQL pool and migrations for the credential store
//! - `docstore`: Redis-backed document store for profile documents

pub mod auth;
pub mod db;
pub mod docstore;
pub mod models;

/// Current version of the AuthBridge shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
