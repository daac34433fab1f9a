//! Bit-interleaved 12-bit sample groups for the modem link
//!
//! Each 3-byte group carries two samples: the first 12 raw bits (in
//! MSB-first byte order) hold sample one, the next 12 hold sample two.
//! Within a sample the raw bits run LSB-first: raw bit j is value bit j
//! of the reconstructed sample.

use fmlink_core::Sample12;

use crate::bitfield::{read_bit, write_bit};

/// Bytes per modem group.
pub const GROUP_BYTES: usize = 3;

/// Samples per modem group.
pub const GROUP_SAMPLES: usize = 2;

/// Value bits per modem sample.
pub const SAMPLE_BITS: usize = 12;

/// De-interleave one 3-byte group into its two samples.
///
/// Panics if `group` is shorter than [`GROUP_BYTES`].
pub fn unpack_group(group: &[u8]) -> (Sample12, Sample12) {
    let mut first = 0u16;
    let mut second = 0u16;
    let mut mask = 0x0001u16;

    for j in 0..SAMPLE_BITS {
        if read_bit(group, j) {
            first |= mask;
        }
        if read_bit(group, j + SAMPLE_BITS) {
            second |= mask;
        }
        mask <<= 1;
    }

    (Sample12::new(first), Sample12::new(second))
}

/// Pack one sample's 12 value bits at `bit_offset`, LSB-first.
///
/// Consecutive samples packed [`SAMPLE_BITS`] apart reproduce the group
/// layout that [`unpack_group`] reads.
pub fn pack_sample(buf: &mut [u8], bit_offset: usize, sample: Sample12) {
    let mut mask = 0x0001u16;

    for j in 0..SAMPLE_BITS {
        write_bit(buf, bit_offset + j, sample.raw() & mask != 0);
        mask <<= 1;
    }
}

/// Interleave two samples into a fresh 3-byte group.
pub fn pack_group(first: Sample12, second: Sample12) -> [u8; GROUP_BYTES] {
    let mut group = [0u8; GROUP_BYTES];
    pack_sample(&mut group, 0, first);
    pack_sample(&mut group, SAMPLE_BITS, second);
    group
}

/// Bytes needed to hold `samples` packed 12-bit samples.
#[inline]
pub fn packed_len(samples: usize) -> usize {
    (samples * SAMPLE_BITS + 7) / 8
}
