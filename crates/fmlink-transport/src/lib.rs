//! fmlink Transport - the network side of the bridge
//!
//! This crate provides:
//! - The `FmNetwork` collaborator contract consumed by the bridge
//! - A nonblocking UDP gateway binding
//! - An in-memory loopback for tests and same-process wiring

pub mod network;
pub mod udp;

pub use network::*;
pub use udp::*;
