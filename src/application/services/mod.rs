//! Domain services that span multiple ports.

mod access_control;
mod action_item_service;
mod consent_service;

pub use access_control::TalkSessionAccessControl;
pub use action_item_service::ActionItemService;
pub use consent_service::ConsentService;
