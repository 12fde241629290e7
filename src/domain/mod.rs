//! Domain layer - aggregates, value objects, and domain errors.
//!
//! Nothing in this layer touches storage, the network, or the wall
//! clock directly; time flows in through [`foundation::Clock`].

pub mod analysis;
pub mod conclusion;
pub mod foundation;
pub mod image;
pub mod opinion;
pub mod talk_session;
pub mod timeline;
pub mod user;
pub mod vote;
