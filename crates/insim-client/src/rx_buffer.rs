use std::io::{self, Read};

use bytes::{Buf, Bytes, BytesMut};
use insim_proto::decoded_size;

/// Carry-over bytes not yet handed out as a frame.
///
/// Never holds more than `capacity` bytes. Every read lands in freshly
/// zeroed tail space.
#[derive(Debug)]
pub(crate) struct RxBuffer {
    buf: BytesMut,
    capacity: usize,
}

impl RxBuffer {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn is_full(&self) -> bool {
        self.buf.len() >= self.capacity
    }

    /// Length declared by the leading size byte. `None` while the buffer is
    /// empty or the size byte is zero.
    pub(crate) fn declared_len(&self, version: u8) -> Option<usize> {
        match self.buf.first() {
            Some(&size) if size != 0 => Some(decoded_size(size, version)),
            _ => None,
        }
    }

    /// Performs one read into the free tail.
    pub(crate) fn fill_from<R: Read>(&mut self, reader: &mut R) -> io::Result<usize> {
        let start = self.buf.len();
        self.buf.resize(self.capacity, 0);
        let res = reader.read(&mut self.buf[start..]);
        let filled = match &res {
            Ok(n) => start + n,
            Err(_) => start,
        };
        self.buf.truncate(filled);
        res
    }

    /// Copies out the leading `len` bytes and drops them from the buffer.
    pub(crate) fn take(&mut self, len: usize) -> Bytes {
        let frame = Bytes::copy_from_slice(&self.buf[..len]);
        self.buf.advance(len);
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_byte_declares_nothing() {
        let mut rx = RxBuffer::new(16);
        assert_eq!(rx.declared_len(9), None);
        rx.fill_from(&mut &[0u8, 3, 0, 0][..]).unwrap();
        assert_eq!(rx.len(), 4);
        assert_eq!(rx.declared_len(9), None);
    }

    #[test]
    fn reads_never_exceed_capacity() {
        let mut rx = RxBuffer::new(8);
        let data = [1u8; 20];
        let mut src = &data[..];
        assert_eq!(rx.fill_from(&mut src).unwrap(), 8);
        assert!(rx.is_full());
        assert_eq!(rx.fill_from(&mut src).unwrap(), 0);
        assert_eq!(rx.len(), 8);
    }

    #[test]
    fn take_keeps_order_of_carry_over() {
        let mut rx = RxBuffer::new(16);
        rx.fill_from(&mut &[4u8, 3, 0, 0, 8, 4, 1][..]).unwrap();
        assert_eq!(rx.declared_len(8), Some(4));
        assert_eq!(&rx.take(4)[..], &[4, 3, 0, 0]);
        assert_eq!(rx.declared_len(8), Some(8));
        assert_eq!(rx.len(), 3);
    }
}
