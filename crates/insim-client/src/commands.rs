//! One-call helpers for the common host commands.

use std::io::Write;

use insim_proto::{
    SmallType, TinyType,
    packets::{
        Bfn, Btn, Cars, Jrr, LightColor, Mst, Msx, Mtc, ObjectInfo, Oco, Plc, Small, Sound, Tiny,
    },
};

use crate::{error::InsimError, sender::Sender};

impl<W: Write> Sender<W> {
    pub fn send_tiny(&self, sub: TinyType, req_i: u8) -> Result<(), InsimError> {
        self.send(&Tiny::new(sub).with_req_i(req_i))
    }

    pub fn send_small(&self, sub: SmallType, value: u32) -> Result<(), InsimError> {
        self.send(&Small::new(sub, value))
    }

    /// Sends a message or `/command` as the local user.
    ///
    /// Up to 63 bytes go out as a host message, up to 95 as an extended one.
    pub fn send_message(&self, text: &str) -> Result<(), InsimError> {
        if text.len() <= Mst::MAX_TEXT_LEN {
            self.send(&Mst::new(text)?)
        } else {
            self.send(&Msx::new(text)?)
        }
    }

    /// Shows `text` to one connection, or to everyone with `ucid` 255.
    pub fn send_to_connection(&self, ucid: u8, text: &str, sound: Sound) -> Result<(), InsimError> {
        self.send(&Mtc::to_connection(ucid, text).with_sound(sound))
    }

    pub fn send_button(&self, button: &Btn) -> Result<(), InsimError> {
        self.send(button)
    }

    pub fn delete_button(&self, ucid: u8, click_id: u8) -> Result<(), InsimError> {
        self.send(&Bfn::delete(ucid, click_id))
    }

    pub fn delete_button_range(&self, ucid: u8, first: u8, last: u8) -> Result<(), InsimError> {
        self.send(&Bfn::delete_range(ucid, first, last))
    }

    pub fn clear_buttons(&self, ucid: u8) -> Result<(), InsimError> {
        self.send(&Bfn::clear(ucid))
    }

    /// Limits the cars `ucid` may select (255 for every connection).
    pub fn allow_cars(&self, ucid: u8, cars: Cars) -> Result<(), InsimError> {
        self.send(&Plc::new(ucid, cars))
    }

    pub fn set_light(&self, identifier: u8, color: LightColor) -> Result<(), InsimError> {
        self.send(&Oco::set(identifier, color))
    }

    pub fn reset_light(&self, identifier: u8) -> Result<(), InsimError> {
        self.send(&Oco::unset(identifier))
    }

    pub fn reset_all_lights(&self) -> Result<(), InsimError> {
        self.send(&Oco::reset_all())
    }

    pub fn accept_join(&self, ucid: u8) -> Result<(), InsimError> {
        self.send(&Jrr::spawn(ucid))
    }

    pub fn reject_join(&self, ucid: u8) -> Result<(), InsimError> {
        self.send(&Jrr::reject(ucid))
    }

    /// Resets a player's car, optionally moving it.
    ///
    /// Position is in world units (65536 per metre) and heading in car units;
    /// all zero resets the car where it stands.
    pub fn reset_car(
        &self,
        plid: u8,
        position: (i32, i32, i32),
        heading: u16,
        repair: bool,
    ) -> Result<(), InsimError> {
        let (x, y, z) = position;
        let start = ObjectInfo::from_position(x, y, z, heading);
        self.send(&Jrr::reset(plid, start, repair))
    }
}

#[cfg(test)]
mod tests {
    use insim_proto::{PacketType, ProtoError};

    use super::*;
    use crate::mock::SharedSink;

    fn sender() -> (Sender<SharedSink>, SharedSink) {
        let sink = SharedSink::default();
        (Sender::new(sink.clone(), 9), sink)
    }

    #[test]
    fn message_kind_follows_length() {
        let (s, sink) = sender();
        s.send_message("/restart").unwrap();
        let bytes = sink.contents();
        assert_eq!(bytes.len(), 68);
        assert_eq!(bytes[1], PacketType::Mst as u8);

        let (s, sink) = sender();
        s.send_message(&"m".repeat(64)).unwrap();
        let bytes = sink.contents();
        assert_eq!(bytes.len(), 100);
        assert_eq!(bytes[1], PacketType::Msx as u8);

        let (s, sink) = sender();
        assert!(matches!(
            s.send_message(&"m".repeat(96)),
            Err(InsimError::Protocol(ProtoError::TextTooLong { len: 96, max: 95 }))
        ));
        assert!(sink.contents().is_empty());
    }

    #[test]
    fn button_helpers_use_button_function_packets() {
        let (s, sink) = sender();
        s.delete_button(3, 10).unwrap();
        s.delete_button_range(3, 20, 10).unwrap();
        s.clear_buttons(3).unwrap();
        assert_eq!(
            sink.contents(),
            vec![
                2, 42, 0, 0, 3, 10, 0, 0, //
                2, 42, 0, 0, 3, 10, 20, 0, //
                2, 42, 0, 1, 3, 0, 0, 0,
            ]
        );
    }

    #[test]
    fn reset_car_without_position_stays_put() {
        let (s, sink) = sender();
        s.reset_car(7, (0, 0, 0), 0, true).unwrap();
        let bytes = sink.contents();
        assert_eq!(&bytes[..8], &[4, PacketType::Jrr as u8, 0, 7, 0, 4, 0, 0]);
        assert_eq!(&bytes[8..], &[0u8; 8]);
    }

    #[test]
    fn lights_and_joins() {
        let (s, sink) = sender();
        s.set_light(1, LightColor::GREEN).unwrap();
        s.reset_all_lights().unwrap();
        s.reject_join(4).unwrap();
        let bytes = sink.contents();
        assert_eq!(&bytes[..8], &[2, 61, 0, 0, 5, 149, 1, 8]);
        assert_eq!(&bytes[8..16], &[2, 61, 0, 0, 4, 149, 0, 0]);
        assert_eq!(&bytes[16..24], &[4, 59, 0, 0, 4, 0, 0, 0]);
    }
}
