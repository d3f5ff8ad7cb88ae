use bitflags::bitflags;
use bytes::{BufMut, BytesMut};
use strum::{Display, FromRepr};

use crate::{codec::Outbound, error::ProtoError, header::put_head, packet_type::PacketType};

bitflags! {
    /// Car set, one bit per car.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Cars: u32 {
        const XFG = 1;
        const XRG = 1 << 1;
        const XRT = 1 << 2;
        const RB4 = 1 << 3;
        const FXO = 1 << 4;
        const LX4 = 1 << 5;
        const LX6 = 1 << 6;
        const MRT = 1 << 7;
        const UF1 = 1 << 8;
        const RAC = 1 << 9;
        const FZ5 = 1 << 10;
        const FOX = 1 << 11;
        const XFR = 1 << 12;
        const UFR = 1 << 13;
        const FO8 = 1 << 14;
        const FXR = 1 << 15;
        const XRR = 1 << 16;
        const FZR = 1 << 17;
        const BF1 = 1 << 18;
        const FBM = 1 << 19;
    }
}

/// Restricts the cars a connection may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plc {
    /// 255 for every connection.
    pub ucid: u8,
    pub cars: Cars,
}

impl Plc {
    pub const LEN: usize = 12;

    pub fn new(ucid: u8, cars: Cars) -> Self {
        Self { ucid, cars }
    }
}

impl Outbound for Plc {
    const KIND: PacketType = PacketType::Plc;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        Ok(Self::LEN)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, 0, 0);
        out.put_u8(self.ucid);
        out.put_bytes(0, 3);
        out.put_u32_le(self.cars.bits());
    }
}

/// Placement used when resetting a car.
///
/// Coordinates use the layout object scale: 16 units per metre for x and y,
/// 4 per metre for z, and 256 heading steps per full turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectInfo {
    pub x: i16,
    pub y: i16,
    pub z: u8,
    pub flags: u8,
    pub index: u8,
    pub heading: u8,
}

impl ObjectInfo {
    /// Flag telling the host to use the given position.
    pub const USE_POSITION: u8 = 0x80;

    /// Converts a position in world units (65536 per metre) and a heading
    /// in car units (32768 per half turn) to object placement units.
    ///
    /// An all-zero input keeps the car where it is.
    pub fn from_position(x: i32, y: i32, z: i32, heading: u16) -> Self {
        let moved = x != 0 || y != 0 || z != 0 || heading != 0;
        let heading = if heading > 0 {
            ((u32::from(heading) / 182 + 180) % 360 * 256 / 360) as u8
        } else {
            0
        };
        Self {
            x: (x / 4096) as i16,
            y: (y / 4096) as i16,
            z: (z / 16384) as u8,
            flags: if moved { Self::USE_POSITION } else { 0 },
            index: 0,
            heading,
        }
    }

    fn put(&self, out: &mut BytesMut) {
        out.put_i16_le(self.x);
        out.put_i16_le(self.y);
        out.put_u8(self.z);
        out.put_u8(self.flags);
        out.put_u8(self.index);
        out.put_u8(self.heading);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum JrrAction {
    Reject = 0,
    Spawn = 1,
    Reset = 4,
    ResetNoRepair = 5,
}

/// Join request reply, also used to reset a car on track.
///
/// Join replies address a connection; resets address a player. The
/// constructors keep the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jrr {
    plid: u8,
    ucid: u8,
    action: JrrAction,
    start_pos: ObjectInfo,
}

impl Jrr {
    pub const LEN: usize = 16;

    /// Lets a connection that asked to join the race onto the track.
    pub fn spawn(ucid: u8) -> Self {
        Self {
            plid: 0,
            ucid,
            action: JrrAction::Spawn,
            start_pos: ObjectInfo::default(),
        }
    }

    pub fn reject(ucid: u8) -> Self {
        Self {
            action: JrrAction::Reject,
            ..Self::spawn(ucid)
        }
    }

    pub fn reset(plid: u8, start_pos: ObjectInfo, repair: bool) -> Self {
        Self {
            plid,
            ucid: 0,
            action: if repair {
                JrrAction::Reset
            } else {
                JrrAction::ResetNoRepair
            },
            start_pos,
        }
    }

    pub fn action(&self) -> JrrAction {
        self.action
    }
}

impl Outbound for Jrr {
    const KIND: PacketType = PacketType::Jrr;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        Ok(Self::LEN)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, 0, self.plid);
        out.put_u8(self.ucid);
        out.put_u8(self.action as u8);
        out.put_bytes(0, 2);
        self.start_pos.put(out);
    }
}
