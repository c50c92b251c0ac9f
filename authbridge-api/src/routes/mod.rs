/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Identity endpoints (register, login)
/// - `profile`: Authenticated profile read/update

pub mod auth;
pub mod health;
pub mod profile;
