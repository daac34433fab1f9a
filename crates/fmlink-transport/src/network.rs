//! Network collaborator contract

use std::collections::VecDeque;

/// The network side of the bridge.
///
/// `read` returning 0 means no data is currently available, which is a
/// normal idle outcome, not an error. Blocking, retry, and timeout policy
/// all belong to the implementation, never to the bridge.
pub trait FmNetwork {
    /// Send one chunk of 16-bit PCM bytes. Returns false on failure.
    fn write(&mut self, data: &[u8]) -> bool;

    /// Receive up to `buf.len()` bytes. Returns the count, 0 if none.
    fn read(&mut self, buf: &mut [u8]) -> usize;
}

/// In-memory queue pair, for tests and same-process wiring.
///
/// Chunks behave like datagrams: a `read` with a smaller buffer truncates
/// the chunk and the excess is dropped, as a UDP receive would.
#[derive(Debug, Default)]
pub struct LoopbackNetwork {
    outbound: VecDeque<Vec<u8>>,
    inbound: VecDeque<Vec<u8>>,
}

impl LoopbackNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a chunk for the next `read`.
    pub fn push_inbound(&mut self, data: &[u8]) {
        self.inbound.push_back(data.to_vec());
    }

    /// Take the next chunk handed to `write`.
    pub fn pop_outbound(&mut self) -> Option<Vec<u8>> {
        self.outbound.pop_front()
    }

    /// Number of chunks handed to `write` and not yet taken.
    pub fn outbound_len(&self) -> usize {
        self.outbound.len()
    }
}

impl FmNetwork for LoopbackNetwork {
    fn write(&mut self, data: &[u8]) -> bool {
        self.outbound.push_back(data.to_vec());
        true
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        match self.inbound.pop_front() {
            Some(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                n
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_queues_writes() {
        let mut net = LoopbackNetwork::new();
        assert!(net.write(&[1, 2, 3]));
        assert!(net.write(&[4]));
        assert_eq!(net.outbound_len(), 2);
        assert_eq!(net.pop_outbound().unwrap(), vec![1, 2, 3]);
        assert_eq!(net.pop_outbound().unwrap(), vec![4]);
        assert!(net.pop_outbound().is_none());
    }

    #[test]
    fn test_loopback_read_order_and_idle() {
        let mut net = LoopbackNetwork::new();
        let mut buf = [0u8; 8];
        assert_eq!(net.read(&mut buf), 0);

        net.push_inbound(&[9, 8]);
        net.push_inbound(&[7]);
        assert_eq!(net.read(&mut buf), 2);
        assert_eq!(&buf[..2], &[9, 8]);
        assert_eq!(net.read(&mut buf), 1);
        assert_eq!(buf[0], 7);
        assert_eq!(net.read(&mut buf), 0);
    }

    #[test]
    fn test_loopback_truncates_like_a_datagram() {
        let mut net = LoopbackNetwork::new();
        net.push_inbound(&[1, 2, 3, 4, 5]);
        let mut buf = [0u8; 3];
        assert_eq!(net.read(&mut buf), 3);
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(net.read(&mut buf), 0);
    }
}
