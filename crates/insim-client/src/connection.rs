//! Session lifecycle: connect, handshake, receive, disconnect.

use std::{
    io,
    net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use insim_proto::{
    Frame, Outbound, PacketType,
    packets::{Tiny, Ver},
};
use tracing::{debug, info, warn};

use crate::{
    config::ConnectConfig, error::InsimError, keepalive::KeepaliveFilter,
    reassembler::FrameReader, sender::Sender, udp::UdpChannel,
};

/// Cancels blocked receives from another thread.
///
/// Shutting down closes the TCP socket under the reader and raises the
/// shared abort flag, so blocked and future pulls fail with
/// [`InsimError::Aborted`]. A UDP pull notices within one poll timeout.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    stream: Arc<TcpStream>,
    abort: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        if self.abort.swap(true, Ordering::AcqRel) {
            return;
        }
        match self.stream.shutdown(Shutdown::Both) {
            Ok(()) => debug!("socket shut down"),
            Err(e) if e.kind() == io::ErrorKind::NotConnected => {}
            Err(e) => warn!(error = %e, "socket shutdown failed"),
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }
}

/// A live session with an InSim host.
///
/// Receiving needs `&mut self`: the returned frame borrows the connection
/// until the next call. Sending works through `&self` or a cloned
/// [`Sender`].
#[derive(Debug)]
pub struct Connection {
    packets: KeepaliveFilter<TcpStream, TcpStream>,
    udp: Option<UdpChannel>,
    shutdown: ShutdownHandle,
    host_version: Option<Ver>,
    peer: SocketAddr,
    closed: bool,
}

impl Connection {
    /// Opens the TCP session, the UDP channel if configured, and performs the
    /// handshake.
    ///
    /// The init packet and the poll timeout are validated before any socket
    /// is opened. Sockets opened before a later failure are closed on return.
    pub fn connect(config: &ConnectConfig) -> Result<Self, InsimError> {
        let isi = config.init_packet()?;
        if config.poll_timeout.is_zero() {
            return Err(InsimError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "poll timeout must be greater than zero",
            )));
        }

        let stream = open_stream(&config.host, config.port)?;
        stream.set_nodelay(true)?;
        stream.set_read_timeout(Some(config.poll_timeout))?;
        let peer = stream.peer_addr()?;

        let abort = Arc::new(AtomicBool::new(false));
        let shutdown = ShutdownHandle {
            stream: Arc::new(stream.try_clone()?),
            abort: Arc::clone(&abort),
        };

        let udp = config
            .udp_port
            .map(|port| {
                UdpChannel::bind(port, peer.ip(), config.poll_timeout, Arc::clone(&abort))
            })
            .transpose()?;

        let sender = Sender::new(stream.try_clone()?, config.insim_version);
        sender.send(&isi)?;
        debug!(version = config.insim_version, udp_port = isi.udp_port, "init sent");

        let reader = FrameReader::new(stream, config.insim_version, abort);
        let mut packets = KeepaliveFilter::new(reader, sender);

        let host_version = if config.request_version {
            Some(await_version(&mut packets)?)
        } else {
            None
        };

        match &host_version {
            Some(ver) => info!(
                %peer,
                product = %ver.product,
                version = %ver.version,
                insim = ver.insim_version,
                "connected"
            ),
            None => info!(%peer, "connected"),
        }

        Ok(Self {
            packets,
            udp,
            shutdown,
            host_version,
            peer,
            closed: false,
        })
    }

    /// Next packet from the host, keepalives excluded.
    pub fn next_packet(&mut self) -> Result<&Frame, InsimError> {
        self.packets.next_packet()
    }

    /// Next datagram from the UDP channel.
    pub fn udp_next_packet(&mut self) -> Result<&Frame, InsimError> {
        self.udp
            .as_mut()
            .ok_or(InsimError::UdpUnavailable)?
            .pull_datagram()
    }

    pub fn send<P: Outbound>(&self, packet: &P) -> Result<(), InsimError> {
        self.packets.sender().send(packet)
    }

    /// A sender for use from other threads.
    pub fn sender(&self) -> Sender {
        self.packets.sender().clone()
    }

    /// Moves the UDP channel out, e.g. to poll it on its own thread.
    ///
    /// A taken channel is no longer closed by [`Connection::disconnect`]. It
    /// sees the abort flag and stops at its next poll timeout, and its socket
    /// closes when the channel is dropped.
    pub fn take_udp(&mut self) -> Option<UdpChannel> {
        self.udp.take()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// The version reply captured during the handshake, if one was requested.
    pub fn host_version(&self) -> Option<&Ver> {
        self.host_version.as_ref()
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Sends the close notification and shuts the sockets down.
    ///
    /// The sockets are shut down even if the notification fails, and the
    /// send error is returned. Calling it again does nothing.
    ///
    /// Only a UDP channel still owned by the connection is closed here. One
    /// moved out with [`Connection::take_udp`] keeps its socket open until it
    /// is dropped, and its pull returns [`InsimError::Aborted`] at the next
    /// poll timeout.
    pub fn disconnect(&mut self) -> Result<(), InsimError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let res = if self.shutdown.is_shutdown() {
            Ok(())
        } else {
            self.send(&Tiny::close())
        };
        self.shutdown.shutdown();
        self.udp = None;
        info!(peer = %self.peer, "disconnected");
        res
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Err(e) = self.disconnect() {
            warn!(error = %e, "disconnect on drop failed");
        }
    }
}

fn open_stream(host: &str, port: u16) -> Result<TcpStream, InsimError> {
    let resolve_err = |source| InsimError::Resolve {
        host: host.to_owned(),
        source,
    };
    let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs().map_err(resolve_err)?.collect();
    if addrs.is_empty() {
        return Err(resolve_err(io::Error::new(
            io::ErrorKind::NotFound,
            "no addresses found",
        )));
    }

    let mut last = None;
    for addr in &addrs {
        match TcpStream::connect(addr) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!(%addr, error = %e, "connect attempt failed");
                last = Some(e);
            }
        }
    }
    Err(InsimError::Connect {
        addr: format!("{host}:{port}"),
        source: last.unwrap_or_else(|| io::ErrorKind::NotConnected.into()),
    })
}

fn await_version(packets: &mut KeepaliveFilter<TcpStream, TcpStream>) -> Result<Ver, InsimError> {
    let frame = packets.next_packet()?;
    if frame.packet_type() != Some(PacketType::Ver) {
        return Err(InsimError::UnexpectedReply {
            expected: PacketType::Ver,
            actual: frame.kind_byte(),
        });
    }
    Ok(Ver::decode(frame.as_bytes())?)
}
