//! Transport error types.

use std::io;

use insim_proto::{PacketType, ProtoError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsimError {
    #[error("failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("connection to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("UDP setup failed: {0}")]
    UdpSetup(#[source] io::Error),

    #[error("connection closed by peer")]
    PeerClosed,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("operation aborted")]
    Aborted,

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtoError),

    #[error("expected {expected} reply, got packet type {actual}")]
    UnexpectedReply { expected: PacketType, actual: u8 },

    #[error("receive buffer overflow: need {needed} bytes, capacity {capacity}")]
    BufferOverflow { needed: usize, capacity: usize },

    #[error("no UDP channel configured")]
    UdpUnavailable,
}

impl InsimError {
    /// `true` when the session ended (peer close or local shutdown) rather
    /// than failing with a network or protocol error.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, InsimError::PeerClosed | InsimError::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disconnect_is_told_apart_from_errors() {
        assert!(InsimError::PeerClosed.is_disconnect());
        assert!(InsimError::Aborted.is_disconnect());
        assert!(!InsimError::Io(io::ErrorKind::ConnectionReset.into()).is_disconnect());
        assert!(!InsimError::from(ProtoError::UnalignedSize(3)).is_disconnect());
    }

    #[test]
    fn messages_name_the_packet_type() {
        let err = InsimError::UnexpectedReply {
            expected: PacketType::Ver,
            actual: 4,
        };
        assert_eq!(err.to_string(), "expected VER reply, got packet type 4");
    }
}
