//! The modem/network bridge
//!
//! `write_modem` turns bit-interleaved modem bytes into 16-bit network
//! PCM; `read_modem` is the mirror. Working storage is fixed-capacity and
//! stack-allocated: the capacities below are part of the latency contract
//! of the link, so oversized chunks are rejected instead of growing
//! buffers.

use fmlink_core::{FmError, FmResult, Sample12, Sample16};
use fmlink_transport::FmNetwork;
use fmlink_wire::{
    decode_pcm, encode_pcm, pack_sample, packed_len, unpack_group, GROUP_BYTES, GROUP_SAMPLES,
    SAMPLE_BITS,
};

use crate::filter::AudioFilter;

/// Most samples one call may carry.
pub const MAX_SAMPLES: usize = 170;

/// Outbound 16-bit PCM staging capacity, in bytes.
pub const NET_OUT_CAPACITY: usize = 350;

/// Inbound network staging capacity, in bytes.
pub const NET_IN_CAPACITY: usize = 300;

/// Most bytes requested from the network per call.
pub const NET_READ_LIMIT: usize = 270;

/// Periodic control surface shared by link components.
pub trait Controllable {
    /// Advance internal timers by `ms` milliseconds.
    fn clock(&mut self, ms: u32);

    /// Switch processing on or off.
    fn set_enabled(&mut self, enabled: bool);
}

/// Converts between modem-side and network-side PCM.
///
/// One instance owns its network collaborator exclusively; callers
/// serialize access per instance.
pub struct FmBridge<N> {
    network: N,
    enabled: bool,
    deemphasis: Option<Box<dyn AudioFilter + Send>>,
    preemphasis: Option<Box<dyn AudioFilter + Send>>,
}

impl<N: FmNetwork> FmBridge<N> {
    pub fn new(network: N) -> Self {
        FmBridge {
            network,
            enabled: false,
            deemphasis: None,
            preemphasis: None,
        }
    }

    /// Install the de-emphasis stage of the modem-to-network path.
    pub fn set_deemphasis(&mut self, filter: Box<dyn AudioFilter + Send>) {
        self.deemphasis = Some(filter);
    }

    /// Install the pre-emphasis stage of the network-to-modem path.
    pub fn set_preemphasis(&mut self, filter: Box<dyn AudioFilter + Send>) {
        self.preemphasis = Some(filter);
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Access the network collaborator.
    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    /// Convert one chunk of bit-interleaved modem bytes and hand the
    /// resulting 16-bit PCM to the network collaborator.
    ///
    /// `data` must be whole 3-byte groups, at most [`MAX_SAMPLES`] worth.
    /// Returns the collaborator's success flag.
    pub fn write_modem(&mut self, data: &[u8]) -> FmResult<bool> {
        if data.is_empty() {
            return Err(FmError::EmptyChunk);
        }
        if data.len() % GROUP_BYTES != 0 {
            return Err(FmError::UnalignedModemChunk(data.len()));
        }
        let n_samples = data.len() / GROUP_BYTES * GROUP_SAMPLES;
        if n_samples > MAX_SAMPLES {
            return Err(FmError::CapacityExceeded {
                samples: n_samples,
                max: MAX_SAMPLES,
            });
        }

        let mut samples = [0.0f32; MAX_SAMPLES];
        let mut n = 0;
        for group in data.chunks_exact(GROUP_BYTES) {
            let (first, second) = unpack_group(group);
            samples[n] = first.to_amplitude();
            samples[n + 1] = second.to_amplitude();
            n += GROUP_SAMPLES;
        }

        // De-emphasis and CTCSS removal land here.
        if let Some(filter) = self.deemphasis.as_mut() {
            filter.process(&mut samples[..n]);
        }

        let mut quantized = [Sample16::ZERO; MAX_SAMPLES];
        for (slot, sample) in quantized[..n].iter_mut().zip(&samples[..n]) {
            *slot = Sample16::from_amplitude(*sample);
        }

        let mut out = [0u8; NET_OUT_CAPACITY];
        let written = encode_pcm(&quantized[..n], &mut out)?;

        tracing::trace!(samples = n, bytes = written, "modem chunk to network");
        Ok(self.network.write(&out[..written]))
    }

    /// Pull 16-bit PCM from the network collaborator and pack it into
    /// bit-interleaved modem bytes in `out`.
    ///
    /// Returns the number of samples packed; 0 when the collaborator has
    /// nothing to offer, which is a normal idle outcome.
    pub fn read_modem(&mut self, out: &mut [u8]) -> FmResult<usize> {
        if out.is_empty() {
            return Err(FmError::EmptyChunk);
        }

        let mut net = [0u8; NET_IN_CAPACITY];
        let received = self.network.read(&mut net[..NET_READ_LIMIT]);
        if received == 0 {
            return Ok(0);
        }

        let mut quantized = [Sample16::ZERO; MAX_SAMPLES];
        let n = decode_pcm(&net[..received], &mut quantized)?;

        let mut samples = [0.0f32; MAX_SAMPLES];
        for (slot, sample) in samples[..n].iter_mut().zip(&quantized[..n]) {
            *slot = sample.to_amplitude();
        }

        // Pre-emphasis lands here.
        if let Some(filter) = self.preemphasis.as_mut() {
            filter.process(&mut samples[..n]);
        }

        let needed = packed_len(n);
        if out.len() < needed {
            return Err(FmError::BufferTooShort {
                expected: needed,
                actual: out.len(),
            });
        }

        let mut offset = 0;
        for sample in &samples[..n] {
            pack_sample(out, offset, Sample12::from_amplitude(*sample));
            offset += SAMPLE_BITS;
        }

        tracing::trace!(samples = n, bytes = needed, "network chunk to modem");
        Ok(n)
    }
}

impl<N: FmNetwork> Controllable for FmBridge<N> {
    fn clock(&mut self, _ms: u32) {
        // Nothing timed yet; the tick must stay callable at any rate.
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmlink_transport::LoopbackNetwork;

    use crate::filter::AudioFilter;

    struct Invert;

    impl AudioFilter for Invert {
        fn process(&mut self, samples: &mut [f32]) {
            for sample in samples {
                *sample = -*sample;
            }
        }
    }

    struct RefusingNetwork;

    impl FmNetwork for RefusingNetwork {
        fn write(&mut self, _data: &[u8]) -> bool {
            false
        }

        fn read(&mut self, _buf: &mut [u8]) -> usize {
            0
        }
    }

    fn bridge() -> FmBridge<LoopbackNetwork> {
        FmBridge::new(LoopbackNetwork::new())
    }

    #[test]
    fn test_write_modem_known_group() {
        let mut bridge = bridge();
        // One group: samples 0 and 255 -> 16-bit 0x0000 and 0x0FF0.
        assert!(bridge.write_modem(&[0x00, 0x0F, 0xF0]).unwrap());

        let net = bridge.network_mut();
        assert_eq!(net.pop_outbound().unwrap(), vec![0x00, 0x00, 0x0F, 0xF0]);
        assert!(net.pop_outbound().is_none());
    }

    #[test]
    fn test_write_modem_propagates_network_refusal() {
        let mut bridge = FmBridge::new(RefusingNetwork);
        assert!(!bridge.write_modem(&[0x00, 0x0F, 0xF0]).unwrap());
    }

    #[test]
    fn test_write_modem_rejects_bad_chunks() {
        let mut bridge = bridge();
        assert!(matches!(bridge.write_modem(&[]), Err(FmError::EmptyChunk)));
        assert!(matches!(
            bridge.write_modem(&[0x00, 0x0F, 0xF0, 0x00]),
            Err(FmError::UnalignedModemChunk(4))
        ));
        assert_eq!(bridge.network_mut().outbound_len(), 0);
    }

    #[test]
    fn test_write_modem_capacity_bound() {
        let mut bridge = bridge();

        // 85 groups are exactly 170 samples and still fit.
        let full = vec![0u8; 85 * GROUP_BYTES];
        assert!(bridge.write_modem(&full).unwrap());
        assert_eq!(bridge.network_mut().pop_outbound().unwrap().len(), 340);

        // One more group is over the line.
        let over = vec![0u8; 86 * GROUP_BYTES];
        assert!(matches!(
            bridge.write_modem(&over),
            Err(FmError::CapacityExceeded { samples: 172, max: MAX_SAMPLES })
        ));
    }

    #[test]
    fn test_read_modem_idle_leaves_buffer() {
        let mut bridge = bridge();
        let mut out = [0xAAu8; 12];
        assert_eq!(bridge.read_modem(&mut out).unwrap(), 0);
        assert_eq!(out, [0xAA; 12]);
    }

    #[test]
    fn test_read_modem_known_pairs() {
        let mut bridge = bridge();
        // 0x0000 -> -1.0 -> modem 0; 0x0FF0 -> modem 255.
        bridge
            .network_mut()
            .push_inbound(&[0x00, 0x00, 0x0F, 0xF0]);

        let mut out = [0u8; 3];
        assert_eq!(bridge.read_modem(&mut out).unwrap(), 2);
        assert_eq!(out, [0x00, 0x0F, 0xF0]);
    }

    #[test]
    fn test_read_modem_rejects_bad_chunks() {
        let mut bridge = bridge();
        assert!(matches!(
            bridge.read_modem(&mut []),
            Err(FmError::EmptyChunk)
        ));

        bridge.network_mut().push_inbound(&[0x00, 0x00, 0x0F]);
        let mut out = [0u8; 12];
        assert!(matches!(
            bridge.read_modem(&mut out),
            Err(FmError::UnalignedPcmChunk(3))
        ));
    }

    #[test]
    fn test_read_modem_space_too_small() {
        let mut bridge = bridge();
        bridge
            .network_mut()
            .push_inbound(&[0x00, 0x00, 0x0F, 0xF0]);

        // Two samples need three bytes.
        let mut out = [0u8; 2];
        assert!(matches!(
            bridge.read_modem(&mut out),
            Err(FmError::BufferTooShort { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_deemphasis_seam_is_applied() {
        let mut bridge = bridge();
        bridge.set_deemphasis(Box::new(Invert));

        // -1.0 inverts to 1.0 -> 0xFFFE; 255 inverts to 0xF00E.
        assert!(bridge.write_modem(&[0x00, 0x0F, 0xF0]).unwrap());
        assert_eq!(
            bridge.network_mut().pop_outbound().unwrap(),
            vec![0xFF, 0xFE, 0xF0, 0x0E]
        );
    }

    #[test]
    fn test_preemphasis_seam_is_applied() {
        let mut bridge = bridge();
        bridge.set_preemphasis(Box::new(Invert));

        // 0x0FF0 -> amplitude a; -a quantizes to modem 3841.
        bridge
            .network_mut()
            .push_inbound(&[0x00, 0x00, 0x0F, 0xF0]);
        let mut out = [0u8; 3];
        assert_eq!(bridge.read_modem(&mut out).unwrap(), 2);

        let (first, second) = unpack_group(&out);
        assert_eq!(first.raw(), 0); // -(-1.0) wraps at full scale
        assert_eq!(second.raw(), 3841);
    }

    #[test]
    fn test_controllable_surface() {
        let mut bridge = bridge();
        assert!(!bridge.is_enabled());
        bridge.set_enabled(true);
        assert!(bridge.is_enabled());
        bridge.set_enabled(false);
        assert!(!bridge.is_enabled());

        // Ticks are accepted at any rate.
        for ms in [0, 1, 10, 1000] {
            bridge.clock(ms);
        }
    }
}
