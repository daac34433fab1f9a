//! fmlink Bridge - modem/network audio conversion
//!
//! The bridge sits between the FM modem (bit-interleaved 12-bit PCM) and
//! the network gateway (big-endian 16-bit PCM) and converts whole chunks
//! in both directions. It is synchronous, converts each chunk in one
//! call, and keeps no state across calls beyond its enabled flag.

pub mod control;
pub mod filter;

pub use control::*;
pub use filter::*;
