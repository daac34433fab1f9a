//! Sample representations for the modem and network links
//!
//! The modem link carries unsigned 12-bit PCM, the network link unsigned
//! 16-bit PCM. Both convert through a normalized float amplitude in
//! [-1.0, 1.0]. The scale constants differ (2048 vs 32767), so the two
//! paths are not bit-for-bit inverses of each other; a full round trip
//! accumulates up to one LSB of quantization error per stage.
//!
//! Rounding policy is fixed everywhere: add 0.5, then truncate.

use std::fmt;

/// Unsigned 12-bit PCM sample as carried on the modem link.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sample12(u16);

impl Sample12 {
    pub const ZERO: Sample12 = Sample12(0);

    /// Zero-amplitude level, the midpoint of the 12-bit range.
    pub const MID: u16 = 2048;

    /// Largest encodable value.
    pub const MAX: u16 = 4095;

    /// Create from a raw value. Only the low 12 bits are kept.
    #[inline]
    pub fn new(raw: u16) -> Self {
        Sample12(raw & 0x0FFF)
    }

    #[inline]
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Quantize a normalized amplitude to 12 bits.
    ///
    /// Only 12 value bits exist on the modem wire, so the result is
    /// masked: exactly +1.0 wraps to 0, matching what the link transmits.
    #[inline]
    pub fn from_amplitude(amplitude: f32) -> Self {
        Sample12(((amplitude + 1.0) * 2048.0 + 0.5) as u16 & 0x0FFF)
    }

    /// Expand to a normalized amplitude in [-1.0, 1.0).
    #[inline]
    pub fn to_amplitude(self) -> f32 {
        (self.0 as f32 - 2048.0) / 2048.0
    }
}

impl fmt::Debug for Sample12 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S12({:03x})", self.0)
    }
}

/// Unsigned 16-bit PCM sample as carried on the network link.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sample16(u16);

impl Sample16 {
    pub const ZERO: Sample16 = Sample16(0);

    /// Zero-amplitude level.
    pub const MID: u16 = 32767;

    #[inline]
    pub fn new(raw: u16) -> Self {
        Sample16(raw)
    }

    #[inline]
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Quantize a normalized amplitude to 16 bits.
    ///
    /// Amplitudes in [-1.0, 1.0] land in [0, 65534]. Inputs outside the
    /// domain are not clamped beyond the saturation of the cast itself;
    /// keeping the amplitude in range is the caller's contract.
    #[inline]
    pub fn from_amplitude(amplitude: f32) -> Self {
        Sample16(((amplitude + 1.0) * 32767.0 + 0.5) as u16)
    }

    /// Expand to a normalized amplitude.
    #[inline]
    pub fn to_amplitude(self) -> f32 {
        self.0 as f32 / 32767.0 - 1.0
    }
}

impl fmt::Debug for Sample16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S16({:04x})", self.0)
    }
}
