//! fmlink Core - Fundamental types and primitives
//!
//! This crate defines the core types used throughout the fmlink bridge:
//! - Sample representations (Sample12, Sample16) and their quantization
//! - Error types

pub mod error;
pub mod sample;

pub use error::*;
pub use sample::*;
