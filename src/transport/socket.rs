//! Async UDP socket that sends and receives ATP segments.
//!
//! This is the byte boundary of the crate: outgoing segments go out as their
//! wire buffer, incoming datagrams come back decoded. Retransmission and
//! connection state stay with the caller.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::UdpSocket;

use super::error::{TransportError, TransportResult};
use super::segment::Segment;
use crate::core::{DATA_HEADER_SIZE, MAX_DATAGRAM_SIZE, SegmentConfig};

/// Default receive buffer size.
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 65535;

/// Async UDP socket speaking ATP segments.
#[derive(Debug)]
pub struct SegmentSocket {
    socket: Arc<UdpSocket>,
    recv_buffer: Vec<u8>,
    /// Largest segment this socket will send.
    mtu: usize,
}

impl SegmentSocket {
    /// Bind a socket to the given address using the configured MTU.
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        SegmentSocketBuilder::new().bind(addr).await
    }

    /// Wrap an existing UDP socket using the configured MTU.
    pub fn from_socket(socket: UdpSocket) -> Self {
        SegmentSocketBuilder::new().from_socket(socket)
    }

    /// Get the MTU outgoing segments are checked against.
    pub fn mtu(&self) -> usize {
        self.mtu
    }

    /// Get the local address.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Connect to a remote address.
    ///
    /// After connecting, `send` and `recv` can be used instead of
    /// `send_to` and `recv_from`.
    pub async fn connect(&self, addr: SocketAddr) -> io::Result<()> {
        self.socket.connect(addr).await
    }

    /// Send a segment to a specific address.
    pub async fn send_to(&self, segment: &Segment, addr: SocketAddr) -> TransportResult<usize> {
        self.check_size(segment)?;
        Ok(self.socket.send_to(segment.as_bytes(), addr).await?)
    }

    /// Send a segment to the connected address.
    pub async fn send(&self, segment: &Segment) -> TransportResult<usize> {
        self.check_size(segment)?;
        Ok(self.socket.send(segment.as_bytes()).await?)
    }

    /// Receive one datagram and decode it.
    pub async fn recv_from(&mut self) -> TransportResult<(Segment, SocketAddr)> {
        let (len, addr) = self.socket.recv_from(&mut self.recv_buffer).await?;
        let segment = Segment::decode(self.recv_buffer[..len].to_vec())?;
        Ok((segment, addr))
    }

    /// Receive one datagram from the connected address and decode it.
    pub async fn recv(&mut self) -> TransportResult<Segment> {
        let len = self.socket.recv(&mut self.recv_buffer).await?;
        Ok(Segment::decode(self.recv_buffer[..len].to_vec())?)
    }

    /// Receive the next valid segment, dropping malformed datagrams.
    pub async fn next_segment_from(&mut self) -> io::Result<(Segment, SocketAddr)> {
        loop {
            match self.recv_from().await {
                Ok(received) => return Ok(received),
                Err(err) if err.is_silent_drop() => {
                    tracing::debug!(%err, "dropping datagram");
                }
                Err(TransportError::Io(err)) => return Err(err),
                Err(err) => return Err(io::Error::other(err)),
            }
        }
    }

    /// Get a reference to the underlying socket.
    pub fn inner(&self) -> &UdpSocket {
        &self.socket
    }

    /// Get a clone of the Arc-wrapped socket.
    pub fn socket_arc(&self) -> Arc<UdpSocket> {
        Arc::clone(&self.socket)
    }

    fn check_size(&self, segment: &Segment) -> TransportResult<()> {
        if segment.wire_len() > self.mtu {
            return Err(TransportError::DatagramTooLarge {
                size: segment.wire_len(),
                mtu: self.mtu,
            });
        }
        Ok(())
    }
}

/// Builder for creating segment sockets with custom options.
#[derive(Debug, Clone)]
pub struct SegmentSocketBuilder {
    recv_buffer_size: usize,
    mtu: usize,
}

impl Default for SegmentSocketBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentSocketBuilder {
    /// Create a builder using the process-wide MTU.
    pub fn new() -> Self {
        Self {
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
            mtu: SegmentConfig::current().mtu,
        }
    }

    /// Set the receive buffer size.
    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.recv_buffer_size = size;
        self
    }

    /// Override the MTU for this socket.
    ///
    /// Clamped so a header plus one payload byte fits in a single datagram.
    pub fn mtu(mut self, mtu: usize) -> Self {
        self.mtu = mtu.clamp(DATA_HEADER_SIZE + 1, MAX_DATAGRAM_SIZE);
        self
    }

    /// Bind to the given address and create a socket.
    pub async fn bind(self, addr: SocketAddr) -> io::Result<SegmentSocket> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(self.from_socket(socket))
    }

    /// Create a socket from an existing UDP socket.
    pub fn from_socket(self, socket: UdpSocket) -> SegmentSocket {
        SegmentSocket {
            socket: Arc::new(socket),
            recv_buffer: vec![0u8; self.recv_buffer_size],
            mtu: self.mtu,
        }
    }
}
