//! Serialised packet writes.

use std::{io::Write, net::TcpStream, sync::Arc};

use insim_proto::{Outbound, encode_packet};
use parking_lot::Mutex;
use tracing::trace;

use crate::error::InsimError;

/// Write half of a connection.
///
/// Clones share one writer and one lock, so whole packets never interleave
/// on the wire no matter how many threads send.
#[derive(Debug)]
pub struct Sender<W = TcpStream> {
    inner: Arc<SenderInner<W>>,
}

#[derive(Debug)]
struct SenderInner<W> {
    writer: Mutex<W>,
    version: u8,
}

impl<W> Clone for Sender<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W: Write> Sender<W> {
    /// Wraps `writer`; size fields are encoded for protocol `version`.
    pub fn new(writer: W, version: u8) -> Self {
        Self {
            inner: Arc::new(SenderInner {
                writer: Mutex::new(writer),
                version,
            }),
        }
    }

    pub fn version(&self) -> u8 {
        self.inner.version
    }

    /// Encodes and writes one packet.
    ///
    /// The lock is held from encoding until the last byte is written. A
    /// packet that fails to encode writes nothing.
    pub fn send<P: Outbound>(&self, packet: &P) -> Result<(), InsimError> {
        let mut writer = self.inner.writer.lock();
        let frame = encode_packet(packet, self.inner.version)?;
        writer.write_all(&frame)?;
        writer.flush()?;
        trace!(kind = %P::KIND, len = frame.len(), "sent packet");
        Ok(())
    }
}
