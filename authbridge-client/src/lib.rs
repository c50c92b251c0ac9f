//! # AuthBridge Client Shell
//!
//! This library provides the client shell over the AuthBridge HTTP API:
//! typed service calls, file-backed token persistence, and route guarding.
//!
//! ## Modules
//!
//! - `config`: Configuration management
//! - `error`: Client error types
//! - `routes`: Route guarding
//! - `services`: HTTP service calls (auth, profile)
//! - `token_store`: Session token persistence

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod token_store;
