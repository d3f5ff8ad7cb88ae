use bytes::{Buf, BufMut, BytesMut};

use crate::{
    codec::Outbound,
    error::ProtoError,
    header::put_head,
    packet_type::{PacketType, SmallType, TinyType},
};

use super::check_kind;

/// General purpose 4-byte packet.
///
/// The host sends `TINY/NONE` as a keepalive and expects it echoed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiny {
    pub req_i: u8,
    /// Raw sub-type; see [`Tiny::subtype`].
    pub sub_t: u8,
}

impl Tiny {
    pub const LEN: usize = 4;

    pub fn new(sub: TinyType) -> Self {
        Self {
            req_i: 0,
            sub_t: sub as u8,
        }
    }

    pub fn with_req_i(mut self, req_i: u8) -> Self {
        self.req_i = req_i;
        self
    }

    /// The pong sent in answer to a keepalive ping.
    pub fn keepalive() -> Self {
        Self::new(TinyType::None)
    }

    /// Graceful close notification.
    pub fn close() -> Self {
        Self::new(TinyType::Close)
    }

    pub fn subtype(&self) -> Option<TinyType> {
        TinyType::from_repr(self.sub_t)
    }

    pub fn is_keepalive(&self) -> bool {
        self.sub_t == TinyType::None as u8
    }

    pub fn decode(buf: &[u8]) -> Result<Self, ProtoError> {
        check_kind(buf, PacketType::Tiny, Self::LEN)?;
        Ok(Self {
            req_i: buf[2],
            sub_t: buf[3],
        })
    }
}

impl Outbound for Tiny {
    const KIND: PacketType = PacketType::Tiny;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        Ok(Self::LEN)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, self.req_i, self.sub_t);
    }
}

/// General purpose 8-byte packet carrying one 32-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Small {
    pub req_i: u8,
    pub sub_t: u8,
    pub value: u32,
}

impl Small {
    pub const LEN: usize = 8;

    pub fn new(sub: SmallType, value: u32) -> Self {
        Self {
            req_i: 0,
            sub_t: sub as u8,
            value,
        }
    }

    pub fn with_req_i(mut self, req_i: u8) -> Self {
        self.req_i = req_i;
        self
    }

    pub fn subtype(&self) -> Option<SmallType> {
        SmallType::from_repr(self.sub_t)
    }

    pub fn decode(buf: &[u8]) -> Result<Self, ProtoError> {
        check_kind(buf, PacketType::Small, Self::LEN)?;
        let mut rest = &buf[4..];
        Ok(Self {
            req_i: buf[2],
            sub_t: buf[3],
            value: rest.get_u32_le(),
        })
    }
}

impl Outbound for Small {
    const KIND: PacketType = PacketType::Small;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        Ok(Self::LEN)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, self.req_i, self.sub_t);
        out.put_u32_le(self.value);
    }
}
