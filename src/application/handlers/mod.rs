//! Command handlers (interactors), one file per operation.

pub mod opinion;
pub mod talk_session;
pub mod timeline;
pub mod vote;
