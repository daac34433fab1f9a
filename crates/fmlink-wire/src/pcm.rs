//! Byte-aligned 16-bit PCM for the network link
//!
//! One sample per 2-byte pair, high byte first.

use bytes::{Buf, BufMut};

use fmlink_core::{FmError, FmResult, Sample16};

/// Bytes per network sample.
pub const SAMPLE16_BYTES: usize = 2;

/// Encode samples into big-endian byte pairs. Returns the bytes written.
pub fn encode_pcm(samples: &[Sample16], mut buf: &mut [u8]) -> FmResult<usize> {
    let needed = samples.len() * SAMPLE16_BYTES;
    if buf.len() < needed {
        return Err(FmError::BufferTooShort {
            expected: needed,
            actual: buf.len(),
        });
    }

    for sample in samples {
        buf.put_u16(sample.raw());
    }

    Ok(needed)
}

/// Decode big-endian byte pairs into samples. Returns the samples read.
pub fn decode_pcm(mut data: &[u8], out: &mut [Sample16]) -> FmResult<usize> {
    if data.len() % SAMPLE16_BYTES != 0 {
        return Err(FmError::UnalignedPcmChunk(data.len()));
    }

    let count = data.len() / SAMPLE16_BYTES;
    if out.len() < count {
        return Err(FmError::BufferTooShort {
            expected: count,
            actual: out.len(),
        });
    }

    for slot in out.iter_mut().take(count) {
        *slot = Sample16::new(data.get_u16());
    }

    Ok(count)
}
