use bitflags::bitflags;
use bytes::{Buf, BufMut, BytesMut};

use crate::{
    codec::Outbound,
    constants::{DEFAULT_INSIM_VERSION, NAME_LEN},
    error::ProtoError,
    header::put_head,
    packet_type::PacketType,
    wire::{check_field, put_fixed_str, read_fixed_str},
};

use super::check_kind;

bitflags! {
    /// Feature flags requested in the init packet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IsiFlags: u16 {
        const RES_0 = 1;
        const RES_1 = 1 << 1;
        /// Guest-side program: buttons do not clash with host programs.
        const LOCAL = 1 << 2;
        /// Keep colour codes in message-out text.
        const MSO_COLS = 1 << 3;
        /// Receive node/lap packets.
        const NLP = 1 << 4;
        /// Receive multi car info packets.
        const MCI = 1 << 5;
        /// Receive car contact packets.
        const CON = 1 << 6;
        /// Receive object hit packets.
        const OBH = 1 << 7;
        /// Receive hot-lap validity packets.
        const HLV = 1 << 8;
        const AXM_LOAD = 1 << 9;
        const AXM_EDIT = 1 << 10;
        /// Decide join requests with join-request replies.
        const REQ_JOIN = 1 << 11;
    }
}

/// Init packet, the first packet a client sends.
///
/// Product name and admin password are validated on construction, so an
/// oversized value fails before any socket is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isi {
    /// Non-zero asks the host to answer with a version packet.
    pub req_i: u8,
    /// Port for UDP replies, 0 for none.
    pub udp_port: u16,
    pub flags: IsiFlags,
    pub insim_version: u8,
    /// Special host message prefix character, 0 for none.
    pub prefix: u8,
    /// Milliseconds between node/lap or multi car packets, 0 for none.
    pub interval_ms: u16,
    admin: String,
    name: String,
}

impl Isi {
    pub const LEN: usize = 44;

    pub fn new(name: &str, admin: &str) -> Result<Self, ProtoError> {
        check_field("product name", name, NAME_LEN)?;
        check_field("admin password", admin, NAME_LEN)?;
        Ok(Self {
            req_i: 0,
            udp_port: 0,
            flags: IsiFlags::empty(),
            insim_version: DEFAULT_INSIM_VERSION,
            prefix: 0,
            interval_ms: 0,
            admin: admin.to_owned(),
            name: name.to_owned(),
        })
    }

    /// Ask for (or stop asking for) the version reply.
    pub fn request_version(mut self, yes: bool) -> Self {
        self.req_i = u8::from(yes);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn admin(&self) -> &str {
        &self.admin
    }

    /// Reads an init packet. Clients never receive one; this is for hosts
    /// and test doubles.
    pub fn decode(buf: &[u8]) -> Result<Self, ProtoError> {
        check_kind(buf, PacketType::Isi, Self::LEN)?;
        let mut rest = &buf[4..];
        let udp_port = rest.get_u16_le();
        let flags = IsiFlags::from_bits_retain(rest.get_u16_le());
        let insim_version = rest.get_u8();
        let prefix = rest.get_u8();
        let interval_ms = rest.get_u16_le();
        Ok(Self {
            req_i: buf[2],
            udp_port,
            flags,
            insim_version,
            prefix,
            interval_ms,
            admin: read_fixed_str(&rest[..NAME_LEN]),
            name: read_fixed_str(&rest[NAME_LEN..NAME_LEN * 2]),
        })
    }
}

impl Outbound for Isi {
    const KIND: PacketType = PacketType::Isi;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        Ok(Self::LEN)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, self.req_i, 0);
        out.put_u16_le(self.udp_port);
        out.put_u16_le(self.flags.bits());
        out.put_u8(self.insim_version);
        out.put_u8(self.prefix);
        out.put_u16_le(self.interval_ms);
        put_fixed_str(out, &self.admin, NAME_LEN);
        put_fixed_str(out, &self.name, NAME_LEN);
    }
}

/// Version reply sent by the host when the init packet asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ver {
    pub req_i: u8,
    /// Host version string, e.g. `0.7F`.
    pub version: String,
    /// Product string: `DEMO`, `S1`, `S2` or `S3`.
    pub product: String,
    /// Protocol version the host speaks.
    pub insim_version: u8,
}

impl Ver {
    pub const LEN: usize = 20;

    pub fn decode(buf: &[u8]) -> Result<Self, ProtoError> {
        check_kind(buf, PacketType::Ver, Self::LEN)?;
        Ok(Self {
            req_i: buf[2],
            version: read_fixed_str(&buf[4..12]),
            product: read_fixed_str(&buf[12..18]),
            insim_version: buf[18],
        })
    }
}

/// Hosts and test doubles send VER; a client only reads it.
impl Outbound for Ver {
    const KIND: PacketType = PacketType::Ver;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        Ok(Self::LEN)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, self.req_i, 0);
        put_fixed_str(out, &self.version, 8);
        put_fixed_str(out, &self.product, 6);
        out.put_u8(self.insim_version);
    }
}
