//! Outbound adapters implementing the ports.

pub mod analysis;
pub mod memory;
pub mod postgres;
