use thiserror::Error;

use crate::packet_type::PacketType;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtoError {
    #[error("packet length {0} is not a multiple of 4")]
    UnalignedSize(usize),
    #[error("packet length {0} does not fit the size field")]
    SizeOverflow(usize),
    #[error("text is {len} bytes, limit is {max}")]
    TextTooLong { len: usize, max: usize },
    #[error("{field} is {len} bytes, limit is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("buffer too short: need {need}, have {have}")]
    TooShort { need: usize, have: usize },
    #[error("unknown packet type: {0}")]
    UnknownPacketType(u8),
    #[error("expected {expected} packet, got type {actual}")]
    UnexpectedType { expected: PacketType, actual: u8 },
}
