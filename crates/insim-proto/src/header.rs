use bytes::{BufMut, BytesMut};

use crate::{constants::HEADER_LEN, error::ProtoError, packet_type::PacketType, wire::ensure_len};

/// Common packet header (wire format).
///
/// Every packet starts with the same four bytes:
/// - 0 size (raw bytes, or 4-byte units above version 8)
/// - 1 type tag
/// - 2 request id (0 unless the packet answers or asks for something)
/// - 3 sub-type, or a packet specific byte (zero, UCID, PLID, sound)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Size byte exactly as found on the wire. Not decoded.
    pub size: u8,
    pub kind: u8,
    pub req_i: u8,
    pub data: u8,
}

impl Header {
    pub const LEN: usize = HEADER_LEN;

    pub fn decode(buf: &[u8]) -> Result<Header, ProtoError> {
        ensure_len(buf, HEADER_LEN)?;
        Ok(Header {
            size: buf[0],
            kind: buf[1],
            req_i: buf[2],
            data: buf[3],
        })
    }

    /// Type tag, if it is one this crate knows.
    pub fn packet_type(&self) -> Option<PacketType> {
        PacketType::from_repr(self.kind)
    }
}

/// Writes the three header bytes that follow the size field.
pub(crate) fn put_head(out: &mut BytesMut, kind: PacketType, req_i: u8, data: u8) {
    out.put_u8(kind as u8);
    out.put_u8(req_i);
    out.put_u8(data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_len_is_locked() {
        assert_eq!(Header::LEN, 4);
    }

    #[test]
    fn put_head_follows_the_size_byte() {
        let mut buf = BytesMut::new();
        buf.put_u8(0x11);
        put_head(&mut buf, PacketType::Small, 0x22, 0x33);
        assert_eq!(&buf[..], &[0x11, 4, 0x22, 0x33]);

        let h = Header::decode(&buf).unwrap();
        assert_eq!(
            h,
            Header {
                size: 0x11,
                kind: PacketType::Small as u8,
                req_i: 0x22,
                data: 0x33,
            }
        );
        assert_eq!(h.packet_type(), Some(PacketType::Small));
    }

    #[test]
    fn header_decode_requires_four_bytes() {
        assert!(matches!(
            Header::decode(&[4, 3, 0]),
            Err(ProtoError::TooShort { need: 4, have: 3 })
        ));
    }
}
