//! Agora - Deliberation Platform Backend
//!
//! This crate implements the domain core of a public-deliberation service:
//! users open talk sessions, post opinions, vote on each other's opinions,
//! report abusive content, and receive AI-generated clustering analysis
//! produced by an external service.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
