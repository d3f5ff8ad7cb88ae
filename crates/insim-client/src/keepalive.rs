use std::io::{Read, Write};

use insim_proto::{Frame, PacketType, TinyType, packets::Tiny};
use tracing::debug;

use crate::{error::InsimError, reassembler::FrameReader, sender::Sender};

/// Answers keepalive pings so callers never see them.
///
/// The host drops clients that stop answering, so `next_packet` has to be
/// called regularly even when nothing else is expected.
#[derive(Debug)]
pub struct KeepaliveFilter<R, W> {
    reader: FrameReader<R>,
    sender: Sender<W>,
}

impl<R: Read, W: Write> KeepaliveFilter<R, W> {
    pub fn new(reader: FrameReader<R>, sender: Sender<W>) -> Self {
        Self { reader, sender }
    }

    /// Next packet that is not a keepalive ping.
    pub fn next_packet(&mut self) -> Result<&Frame, InsimError> {
        while is_keepalive(self.reader.pull_frame()?) {
            debug!("keepalive ping, sending pong");
            self.sender.send(&Tiny::keepalive())?;
        }
        Ok(self.reader.current())
    }

    pub fn sender(&self) -> &Sender<W> {
        &self.sender
    }
}

fn is_keepalive(frame: &Frame) -> bool {
    frame.packet_type() == Some(PacketType::Tiny)
        && frame.as_bytes().get(3) == Some(&(TinyType::None as u8))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, atomic::AtomicBool};

    use super::*;
    use crate::mock::{ScriptedReader, SharedSink};

    fn filter(script: ScriptedReader, sink: &SharedSink) -> KeepaliveFilter<ScriptedReader, SharedSink> {
        let reader = FrameReader::new(script, 9, Arc::new(AtomicBool::new(false)));
        KeepaliveFilter::new(reader, Sender::new(sink.clone(), 9))
    }

    #[test]
    fn pings_are_answered_and_hidden() {
        let sink = SharedSink::default();
        let script = ScriptedReader::new()
            .chunk(&[1, 3, 0, 0])
            .chunk(&[1, 3, 7, 0, 2, 4, 1, 1])
            .chunk(&[0, 0, 0, 0]);
        let mut f = filter(script, &sink);

        let frame = f.next_packet().unwrap();
        assert_eq!(frame.packet_type(), Some(PacketType::Small));
        assert_eq!(frame.len(), 8);
        assert_eq!(sink.contents(), vec![1, 3, 0, 0, 1, 3, 0, 0]);
    }

    #[test]
    fn other_tiny_packets_pass_through() {
        let sink = SharedSink::default();
        let script = ScriptedReader::new().chunk(&[1, 3, 0, TinyType::Close as u8]);
        let mut f = filter(script, &sink);

        let frame = f.next_packet().unwrap();
        assert_eq!(frame.as_bytes()[3], TinyType::Close as u8);
        assert!(sink.contents().is_empty());
    }

    #[test]
    fn close_after_ping_still_replies_once() {
        let sink = SharedSink::default();
        let script = ScriptedReader::new().chunk(&[1, 3, 0, 0]);
        let mut f = filter(script, &sink);

        assert!(matches!(f.next_packet(), Err(InsimError::PeerClosed)));
        assert_eq!(sink.contents(), vec![1, 3, 0, 0]);
    }
}
