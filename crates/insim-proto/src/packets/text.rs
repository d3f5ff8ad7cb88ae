use bytes::{BufMut, BytesMut};
use strum::{Display, FromRepr};

use crate::{
    codec::{Outbound, padded_text_length},
    error::ProtoError,
    header::put_head,
    limits::{MST_MSG_LEN, MSX_MSG_LEN, MTC_TEXT},
    packet_type::PacketType,
    wire::{put_fixed_str, read_fixed_str},
};

use super::check_kind;

/// Sound played with a message to a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, FromRepr, Display)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Sound {
    #[default]
    Silent = 0,
    Message = 1,
    SysMessage = 2,
    InvalidKey = 3,
    Error = 4,
}

fn check_message(text: &str, width: usize) -> Result<(), ProtoError> {
    // The last byte of the field stays a terminator.
    let max = width - 1;
    if text.len() > max {
        return Err(ProtoError::TextTooLong {
            len: text.len(),
            max,
        });
    }
    Ok(())
}

/// Message typed as if by the local user, or a `/command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mst {
    text: String,
}

impl Mst {
    pub const LEN: usize = 4 + MST_MSG_LEN;
    pub const MAX_TEXT_LEN: usize = MST_MSG_LEN - 1;

    pub fn new(text: &str) -> Result<Self, ProtoError> {
        check_message(text, MST_MSG_LEN)?;
        Ok(Self {
            text: text.to_owned(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Outbound for Mst {
    const KIND: PacketType = PacketType::Mst;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        Ok(Self::LEN)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, 0, 0);
        put_fixed_str(out, &self.text, MST_MSG_LEN);
    }
}

/// Extended-length host message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Msx {
    text: String,
}

impl Msx {
    pub const LEN: usize = 4 + MSX_MSG_LEN;
    pub const MAX_TEXT_LEN: usize = MSX_MSG_LEN - 1;

    pub fn new(text: &str) -> Result<Self, ProtoError> {
        check_message(text, MSX_MSG_LEN)?;
        Ok(Self {
            text: text.to_owned(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Outbound for Msx {
    const KIND: PacketType = PacketType::Msx;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        Ok(Self::LEN)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, 0, 0);
        put_fixed_str(out, &self.text, MSX_MSG_LEN);
    }
}

/// Message to one connection or player.
///
/// `ucid` 255 addresses every connection; a non-zero `plid` takes
/// precedence over `ucid`. The text is checked when the frame is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mtc {
    pub req_i: u8,
    pub sound: Sound,
    pub ucid: u8,
    pub plid: u8,
    pub text: String,
}

impl Mtc {
    pub fn to_connection(ucid: u8, text: impl Into<String>) -> Self {
        Self {
            ucid,
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_sound(mut self, sound: Sound) -> Self {
        self.sound = sound;
        self
    }
}

impl Outbound for Mtc {
    const KIND: PacketType = PacketType::Mtc;

    fn wire_len(&self) -> Result<usize, ProtoError> {
        padded_text_length(self.text.len(), MTC_TEXT.header_len, MTC_TEXT.max_text_len)
    }

    fn write_body(&self, out: &mut BytesMut) {
        put_head(out, Self::KIND, self.req_i, self.sound as u8);
        out.put_u8(self.ucid);
        out.put_u8(self.plid);
        out.put_u8(0);
        out.put_u8(0);
        out.put_slice(self.text.as_bytes());
    }
}

/// Chat or system message relayed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mso {
    pub req_i: u8,
    /// Sending connection, 0 for the host.
    pub ucid: u8,
    /// Sending player, 0 if none.
    pub plid: u8,
    /// 0 system, 1 user, 2 prefixed, 3 hidden.
    pub user_type: u8,
    /// Byte offset of the message text, past the sender name.
    pub text_start: u8,
    pub msg: String,
}

impl Mso {
    pub const MIN_LEN: usize = 8;

    pub fn decode(buf: &[u8]) -> Result<Self, ProtoError> {
        check_kind(buf, PacketType::Mso, Self::MIN_LEN)?;
        Ok(Self {
            req_i: buf[2],
            ucid: buf[4],
            plid: buf[5],
            user_type: buf[6],
            text_start: buf[7],
            msg: read_fixed_str(&buf[8..]),
        })
    }

    /// The message without the sender name.
    pub fn body(&self) -> &str {
        self.msg.get(self.text_start as usize..).unwrap_or_default()
    }
}
