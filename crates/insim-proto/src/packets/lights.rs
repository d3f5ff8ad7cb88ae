use bitflags::bitflags;
use bytes::{BufMut, BytesMut};
use strum::{Display, FromRepr};

use crate::{codec::Outbound, error::ProtoError, header::put_head, packet_type::PacketType};

/// Object index of the main start lights.
pub const MAIN_LIGHTS: u8 = 149;

/// Identifier addressing every start light group.
pub const ALL_LIGHTS: u8 = 0;

bitflags! {
    /// Start light bulbs switched by an override.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LightColor: u8 {
        const RED = 1;
        const YELLOW = 1 << 1;
        const GREEN = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum OcoAction {
    /// Hand every light back to the host.
    LightsReset = 4,
    LightsSet = 5,
    /// Hand one light group back to the host.
    LightsUnset = 6,
}

/// Object control: overrides the main start lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Oco {
    pub action: OcoAction,
    pub index: u8,
    pub identifier: u8,
    pub data: LightColor,
}

impl Oco {
    pub const LEN: usize = 8;

    pub fn set(identifier: u8, color: LightColor) -> Self {
        Self {
            action: OcoAction::LightsSet,
            index: MAIN_LIGHTS,
            identifier,
            data: color,
        }
    }

    pub fn unset(identifier: u8) -> Self {
        Self {
            action: OcoAction::LightsUnset,
            ..Self::set(identifier, LightColor::empty())
        }
    }

    pub fn reset_all() -> Self {
        Self {
            action: OcoAction::LightsReset,
            ..Self::set(ALL_LIGHTS, LightColor::empty())
        }
    }
}

impl Outbound for Oco {
    const KIND: PacketType = PacketType::Oco;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        Ok(Self::LEN)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, 0, 0);
        out.put_u8(self.action as u8);
        out.put_u8(self.index);
        out.put_u8(self.identifier);
        out.put_u8(self.data.bits());
    }
}
