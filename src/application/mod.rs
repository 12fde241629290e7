//! Application layer - command handlers and cross-port services.

pub mod handlers;
pub mod services;
