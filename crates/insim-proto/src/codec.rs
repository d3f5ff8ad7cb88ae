//! Size-field arithmetic and outbound frame encoding.
//!
//! The size field is the first byte of every packet. Up to protocol version 8
//! it holds the packet length in bytes; above that it holds the length in
//! 4-byte units, which widens the largest packet to 1020 bytes. Every packet
//! length must therefore be a multiple of 4 once scaling is active, and the
//! two text-bearing command kinds pad their text to keep it so.

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    constants::{SIZE_UNIT, scales_size},
    error::ProtoError,
    packet_type::PacketType,
};

/// An outbound packet record.
///
/// Implementors describe their logical length and body; the size byte is
/// computed by [`encode_packet`] for the negotiated protocol version, so a
/// record can be sent under any version.
pub trait Outbound {
    const KIND: PacketType;

    /// Logical length in bytes, size byte included.
    ///
    /// Text-bearing kinds validate their text here.
    fn wire_len(&self) -> Result<usize, ProtoError>;

    /// Writes every byte after the size field.
    ///
    /// Output shorter than [`Outbound::wire_len`] is zero padded.
    fn write_body(&self, out: &mut BytesMut);
}

/// Size field for a packet of `raw_len` bytes under `version`.
pub fn encoded_size(raw_len: usize, version: u8) -> Result<u8, ProtoError> {
    let field = if scales_size(version) {
        if raw_len % SIZE_UNIT != 0 {
            return Err(ProtoError::UnalignedSize(raw_len));
        }
        raw_len / SIZE_UNIT
    } else {
        raw_len
    };
    u8::try_from(field).map_err(|_| ProtoError::SizeOverflow(raw_len))
}

/// Byte length described by a size field under `version`.
#[inline]
pub fn decoded_size(size_field: u8, version: u8) -> usize {
    if scales_size(version) {
        size_field as usize * SIZE_UNIT
    } else {
        size_field as usize
    }
}

/// Length of a text-bearing packet: header plus text rounded up to 4 bytes.
///
/// Text that is already aligned is not padded further, and empty text adds
/// nothing.
pub fn padded_text_length(
    raw_len: usize,
    header_len: usize,
    max_text_len: usize,
) -> Result<usize, ProtoError> {
    if raw_len > max_text_len {
        return Err(ProtoError::TextTooLong {
            len: raw_len,
            max: max_text_len,
        });
    }
    Ok(header_len + raw_len.next_multiple_of(SIZE_UNIT))
}

/// Encodes a complete wire frame for `packet` under `version`.
pub fn encode_packet<P: Outbound>(packet: &P, version: u8) -> Result<Bytes, ProtoError> {
    let len = packet.wire_len()?;
    let size = encoded_size(len, version)?;

    let mut out = BytesMut::with_capacity(len);
    out.put_u8(size);
    packet.write_body(&mut out);
    debug_assert!(out.len() <= len, "{} body overran its length", P::KIND);
    out.resize(len, 0);
    Ok(out.freeze())
}
