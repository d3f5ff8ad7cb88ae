//! Optional UDP channel for high-frequency packets.
//!
//! Each datagram is taken as exactly one packet: there is no reassembly and
//! no carry-over between receives.

use std::{
    io,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use bytes::BytesMut;
use insim_proto::{Frame, constants::UDP_BUFFER_CAPACITY};
use tracing::{debug, trace};

use crate::{error::InsimError, reassembler::is_poll_timeout};

/// UDP socket bound on the configured local port and connected to the host
/// on that same port.
///
/// The kernel drops datagrams from any other source address or port.
#[derive(Debug)]
pub struct UdpChannel {
    socket: UdpSocket,
    abort: Arc<AtomicBool>,
    current: Frame,
}

impl UdpChannel {
    pub(crate) fn bind(
        port: u16,
        host: IpAddr,
        poll_timeout: Duration,
        abort: Arc<AtomicBool>,
    ) -> Result<Self, InsimError> {
        let any: IpAddr = match host {
            IpAddr::V4(_) => Ipv4Addr::UNSPECIFIED.into(),
            IpAddr::V6(_) => Ipv6Addr::UNSPECIFIED.into(),
        };
        let socket = UdpSocket::bind(SocketAddr::new(any, port)).map_err(InsimError::UdpSetup)?;
        socket
            .connect(SocketAddr::new(host, port))
            .map_err(InsimError::UdpSetup)?;
        socket
            .set_read_timeout(Some(poll_timeout))
            .map_err(InsimError::UdpSetup)?;
        debug!(port, %host, "UDP channel connected");
        Ok(Self {
            socket,
            abort,
            current: Frame::default(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// The host address datagrams are accepted from.
    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.socket.peer_addr()
    }

    /// Blocks until the next non-empty datagram from the connected host arrives.
    ///
    /// The returned frame replaces the previous one. Datagrams longer than
    /// the buffer are truncated.
    pub fn pull_datagram(&mut self) -> Result<&Frame, InsimError> {
        let mut buf = BytesMut::zeroed(UDP_BUFFER_CAPACITY);
        loop {
            if self.abort.load(Ordering::Acquire) {
                return Err(InsimError::Aborted);
            }
            match self.socket.recv(&mut buf) {
                Ok(0) => trace!("empty datagram skipped"),
                Ok(n) => {
                    buf.truncate(n);
                    self.current = Frame::new(buf.freeze());
                    trace!(kind = self.current.kind_byte(), n, "datagram");
                    return Ok(&self.current);
                }
                Err(e) if is_poll_timeout(&e) || e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// The most recent datagram, empty before the first pull.
    pub fn current(&self) -> &Frame {
        &self.current
    }
}
