//! Tagged decoding of inbound packets.

use bytes::Bytes;

use crate::{
    error::ProtoError,
    packet_type::PacketType,
    packets::{Btc, Btt, Mso, Small, Tiny, Ver},
    wire::ensure_len,
};

/// An inbound packet.
///
/// Kinds without a typed record keep their raw bytes in [`Packet::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Ver(Ver),
    Tiny(Tiny),
    Small(Small),
    Mso(Mso),
    Btc(Btc),
    Btt(Btt),
    Other { kind: PacketType, bytes: Bytes },
}

impl Packet {
    /// Decodes a complete frame, size byte included.
    pub fn decode(buf: &[u8]) -> Result<Packet, ProtoError> {
        ensure_len(buf, 2)?;
        let kind = PacketType::from_repr(buf[1]).ok_or(ProtoError::UnknownPacketType(buf[1]))?;
        Ok(match kind {
            PacketType::Ver => Packet::Ver(Ver::decode(buf)?),
            PacketType::Tiny => Packet::Tiny(Tiny::decode(buf)?),
            PacketType::Small => Packet::Small(Small::decode(buf)?),
            PacketType::Mso => Packet::Mso(Mso::decode(buf)?),
            PacketType::Btc => Packet::Btc(Btc::decode(buf)?),
            PacketType::Btt => Packet::Btt(Btt::decode(buf)?),
            kind => Packet::Other {
                kind,
                bytes: Bytes::copy_from_slice(buf),
            },
        })
    }

    pub fn kind(&self) -> PacketType {
        match self {
            Packet::Ver(_) => PacketType::Ver,
            Packet::Tiny(_) => PacketType::Tiny,
            Packet::Small(_) => PacketType::Small,
            Packet::Mso(_) => PacketType::Mso,
            Packet::Btc(_) => PacketType::Btc,
            Packet::Btt(_) => PacketType::Btt,
            Packet::Other { kind, .. } => *kind,
        }
    }

    pub fn is_keepalive(&self) -> bool {
        matches!(self, Packet::Tiny(t) if t.is_keepalive())
    }
}
