//! Splits a byte stream into complete packets.
//!
//! Packets arrive in arbitrary chunks: one read may hold several packets, a
//! fraction of one, or both. Bytes past the last complete packet stay in the
//! receive buffer as carry-over for the next pull.

use std::{
    io::{self, Read},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use insim_proto::{Frame, constants::RX_BUFFER_CAPACITY};
use tracing::trace;

use crate::{error::InsimError, rx_buffer::RxBuffer};

/// Pulls complete frames out of a blocking reader.
///
/// The reader is expected to time out periodically (a socket read timeout).
/// Timeouts are retried until data arrives or the abort flag is raised.
#[derive(Debug)]
pub struct FrameReader<R> {
    reader: R,
    rx: RxBuffer,
    version: u8,
    abort: Arc<AtomicBool>,
    current: Frame,
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R, version: u8, abort: Arc<AtomicBool>) -> Self {
        Self::with_capacity(reader, version, RX_BUFFER_CAPACITY, abort)
    }

    pub fn with_capacity(reader: R, version: u8, capacity: usize, abort: Arc<AtomicBool>) -> Self {
        Self {
            reader,
            rx: RxBuffer::new(capacity),
            version,
            abort,
            current: Frame::default(),
        }
    }

    /// Blocks until the next complete packet is buffered and returns it.
    ///
    /// The returned frame stays valid until the next pull.
    pub fn pull_frame(&mut self) -> Result<&Frame, InsimError> {
        loop {
            if let Some(len) = self.rx.declared_len(self.version) {
                if len > self.rx.capacity() {
                    return Err(InsimError::BufferOverflow {
                        needed: len,
                        capacity: self.rx.capacity(),
                    });
                }
                if self.rx.len() >= len {
                    self.current = Frame::new(self.rx.take(len));
                    trace!(kind = self.current.kind_byte(), len, "frame complete");
                    return Ok(&self.current);
                }
            }
            if self.rx.is_full() {
                return Err(InsimError::BufferOverflow {
                    needed: self.rx.len() + 1,
                    capacity: self.rx.capacity(),
                });
            }
            self.fill()?;
        }
    }

    /// The most recently pulled frame, empty before the first pull.
    pub fn current(&self) -> &Frame {
        &self.current
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    fn aborted(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }

    fn fill(&mut self) -> Result<(), InsimError> {
        loop {
            if self.aborted() {
                return Err(InsimError::Aborted);
            }
            match self.rx.fill_from(&mut self.reader) {
                Ok(0) if self.aborted() => return Err(InsimError::Aborted),
                Ok(0) => return Err(InsimError::PeerClosed),
                Ok(n) => {
                    trace!(n, buffered = self.rx.len(), "received");
                    return Ok(());
                }
                Err(e) if is_poll_timeout(&e) => trace!("poll timeout"),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(_) if self.aborted() => return Err(InsimError::Aborted),
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// A read timeout surfaces as `WouldBlock` on Unix and `TimedOut` on Windows.
pub(crate) fn is_poll_timeout(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}
