//! Core utilities and shared types
//!
//! - `config`: process-level settings read from the environment
//! - `user_error`: expected, user-facing failures with stable message texts

pub mod config;
pub mod user_error;
