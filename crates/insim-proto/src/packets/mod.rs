//! Fixed-layout packet records.
//!
//! Outbound records implement [`Outbound`](crate::codec::Outbound); inbound
//! records expose a `decode` taking the complete frame bytes, size byte
//! included.

use crate::{error::ProtoError, packet_type::PacketType, wire::ensure_len};

pub mod buttons;
pub mod cars;
pub mod control;
pub mod handshake;
pub mod lights;
pub mod text;

pub use buttons::{Bfn, BfnType, Btc, Btn, Btt, ButtonStyle};
pub use cars::{Cars, Jrr, JrrAction, ObjectInfo, Plc};
pub use control::{Small, Tiny};
pub use handshake::{Isi, IsiFlags, Ver};
pub use lights::{LightColor, Oco, OcoAction};
pub use text::{Mso, Mst, Msx, Mtc, Sound};

/// Checks the type tag and minimum length of an inbound frame.
pub(crate) fn check_kind(buf: &[u8], kind: PacketType, min_len: usize) -> Result<(), ProtoError> {
    ensure_len(buf, min_len)?;
    if buf[1] != kind as u8 {
        return Err(ProtoError::UnexpectedType {
            expected: kind,
            actual: buf[1],
        });
    }
    Ok(())
}
