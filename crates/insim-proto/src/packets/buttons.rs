use bitflags::bitflags;
use bytes::{BufMut, BytesMut};
use strum::{Display, FromRepr};

use crate::{
    codec::{Outbound, padded_text_length},
    error::ProtoError,
    header::put_head,
    limits::BTN_TEXT,
    packet_type::PacketType,
    wire::read_fixed_str,
};

use super::check_kind;

bitflags! {
    /// Button style bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonStyle: u8 {
        // Low three bits select a text colour.
        const C1 = 1;
        const C2 = 1 << 1;
        const C4 = 1 << 2;
        /// Clicks are reported back.
        const CLICK = 1 << 3;
        const LIGHT = 1 << 4;
        const DARK = 1 << 5;
        const LEFT = 1 << 6;
        const RIGHT = 1 << 7;
    }
}

/// Button placed on a connection's screen.
///
/// Coordinates are in the 0..=200 screen grid. The text is checked when the
/// frame is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Btn {
    /// Must be non-zero for the host to accept the button.
    pub req_i: u8,
    /// 255 places the button for every connection, 0 for the local one.
    pub ucid: u8,
    pub click_id: u8,
    pub inst: u8,
    pub style: ButtonStyle,
    /// Maximum characters accepted when typing in, 0 for none.
    pub type_in: u8,
    pub left: u8,
    pub top: u8,
    pub width: u8,
    pub height: u8,
    pub text: String,
}

impl Btn {
    pub fn new(ucid: u8, click_id: u8, text: impl Into<String>) -> Self {
        Self {
            req_i: 1,
            ucid,
            click_id,
            inst: 0,
            style: ButtonStyle::empty(),
            type_in: 0,
            left: 0,
            top: 0,
            width: 0,
            height: 0,
            text: text.into(),
        }
    }

    pub fn at(mut self, left: u8, top: u8, width: u8, height: u8) -> Self {
        self.left = left;
        self.top = top;
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }
}

impl Outbound for Btn {
    const KIND: PacketType = PacketType::Btn;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        padded_text_length(self.text.len(), BTN_TEXT.header_len, BTN_TEXT.max_text_len)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, self.req_i, self.ucid);
        out.put_u8(self.click_id);
        out.put_u8(self.inst);
        out.put_u8(self.style.bits());
        out.put_u8(self.type_in);
        out.put_u8(self.left);
        out.put_u8(self.top);
        out.put_u8(self.width);
        out.put_u8(self.height);
        out.put_slice(self.text.as_bytes());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum BfnType {
    DelBtn = 0,
    Clear = 1,
    UserClear = 2,
    Request = 3,
}

/// Button function: delete one or a range of buttons, or clear them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bfn {
    pub sub_t: BfnType,
    pub ucid: u8,
    pub click_id: u8,
    /// Last id of a deleted range, 0 for a single button.
    pub click_max: u8,
    pub inst: u8,
}

impl Bfn {
    pub const LEN: usize = 8;

    pub fn delete(ucid: u8, click_id: u8) -> Self {
        Self {
            sub_t: BfnType::DelBtn,
            ucid,
            click_id,
            click_max: 0,
            inst: 0,
        }
    }

    /// Deletes every button from `first` to `last`, in either order.
    pub fn delete_range(ucid: u8, first: u8, last: u8) -> Self {
        if first == last {
            return Self::delete(ucid, first);
        }
        Self {
            click_id: first.min(last),
            click_max: first.max(last),
            ..Self::delete(ucid, 0)
        }
    }

    /// Removes every button this program placed for `ucid`.
    pub fn clear(ucid: u8) -> Self {
        Self {
            sub_t: BfnType::Clear,
            ..Self::delete(ucid, 0)
        }
    }
}

impl Outbound for Bfn {
    const KIND: PacketType = PacketType::Bfn;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        Ok(Self::LEN)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, 0, self.sub_t as u8);
        out.put_u8(self.ucid);
        out.put_u8(self.click_id);
        out.put_u8(self.click_max);
        out.put_u8(self.inst);
    }
}

/// Button click report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Btc {
    pub req_i: u8,
    pub ucid: u8,
    pub click_id: u8,
    pub inst: u8,
    /// 1 left, 2 right, 4 ctrl, 8 shift.
    pub flags: u8,
}

impl Btc {
    pub const LEN: usize = 8;

    pub fn decode(buf: &[u8]) -> Result<Self, ProtoError> {
        check_kind(buf, PacketType::Btc, Self::LEN)?;
        Ok(Self {
            req_i: buf[2],
            ucid: buf[3],
            click_id: buf[4],
            inst: buf[5],
            flags: buf[6],
        })
    }
}

/// Text typed into a type-in button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Btt {
    pub req_i: u8,
    pub ucid: u8,
    pub click_id: u8,
    pub inst: u8,
    pub type_in: u8,
    pub text: String,
}

impl Btt {
    pub const LEN: usize = 104;
    pub const MIN_LEN: usize = 8;

    pub fn decode(buf: &[u8]) -> Result<Self, ProtoError> {
        check_kind(buf, PacketType::Btt, Self::MIN_LEN)?;
        Ok(Self {
            req_i: buf[2],
            ucid: buf[3],
            click_id: buf[4],
            inst: buf[5],
            type_in: buf[6],
            text: read_fixed_str(&buf[8..buf.len().min(Self::LEN)]),
        })
    }
}
