use bytes::Bytes;

use crate::{error::ProtoError, header::Header, packet::Packet, packet_type::PacketType};

/// One complete received packet: the size byte and every byte it declares.
///
/// Cloning is cheap; the bytes are shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    pub fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    /// Raw type tag, 0 for an empty frame.
    pub fn kind_byte(&self) -> u8 {
        self.bytes.get(1).copied().unwrap_or(0)
    }

    pub fn packet_type(&self) -> Option<PacketType> {
        PacketType::from_repr(self.kind_byte())
    }

    pub fn header(&self) -> Result<Header, ProtoError> {
        Header::decode(&self.bytes)
    }

    /// Decodes the frame into its typed variant.
    pub fn decode(&self) -> Result<Packet, ProtoError> {
        Packet::decode(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl From<Bytes> for Frame {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
