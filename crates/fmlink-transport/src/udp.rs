//! UDP binding to an FM gateway

use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};

use fmlink_core::{FmError, FmResult};

use crate::FmNetwork;

/// Nonblocking UDP socket speaking raw 16-bit PCM datagrams to a gateway.
pub struct UdpNetwork {
    socket: UdpSocket,
    remote: SocketAddr,
}

impl UdpNetwork {
    /// Bind a local address and aim at the gateway.
    pub fn bind(local: SocketAddr, remote: SocketAddr) -> FmResult<Self> {
        let socket =
            UdpSocket::bind(local).map_err(|e| FmError::TransportError(e.to_string()))?;
        socket
            .set_nonblocking(true)
            .map_err(|e| FmError::TransportError(e.to_string()))?;

        Ok(UdpNetwork { socket, remote })
    }

    /// Get local address
    pub fn local_addr(&self) -> FmResult<SocketAddr> {
        self.socket
            .local_addr()
            .map_err(|e| FmError::TransportError(e.to_string()))
    }

    /// Get the gateway address
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote
    }
}

impl FmNetwork for UdpNetwork {
    fn write(&mut self, data: &[u8]) -> bool {
        match self.socket.send_to(data, self.remote) {
            Ok(sent) if sent == data.len() => true,
            Ok(sent) => {
                tracing::warn!("short UDP send: {} of {} bytes", sent, data.len());
                false
            }
            Err(e) => {
                tracing::warn!("UDP send error: {}", e);
                false
            }
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        match self.socket.recv_from(buf) {
            Ok((len, addr)) if addr == self.remote => len,
            Ok((_, addr)) => {
                tracing::warn!("dropping datagram from unexpected source {}", addr);
                0
            }
            Err(ref e) if e.kind() == ErrorKind::WouldBlock => 0,
            Err(e) => {
                tracing::warn!("UDP receive error: {}", e);
                0
            }
        }
    }
}
