//! fmlink Wire Formats - Modem and network PCM layouts
//!
//! This crate implements the two sample layouts at the FM boundary:
//! - Modem link: two 12-bit samples bit-interleaved into each 3-byte
//!   group (MSB-first bit addressing, LSB-first value bits)
//! - Network link: one 16-bit sample per big-endian byte pair

pub mod bitfield;
pub mod interleave;
pub mod pcm;

pub use bitfield::*;
pub use interleave::*;
pub use pcm::*;
