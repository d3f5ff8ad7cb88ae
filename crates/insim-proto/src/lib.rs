//! InSim wire protocol.
//!
//! Pure packet-level code with no I/O: size-field scaling, text padding,
//! typed outbound records and tagged decoding of inbound packets. The
//! blocking socket transport lives in `insim-client`.

pub mod car_id;
pub mod codec;
pub mod constants;
pub mod error;
pub mod frame;
pub mod header;
pub mod lang;
pub mod laptime;
pub mod limits;
pub mod packet;
pub mod packet_type;
pub mod packets;

mod wire;

pub use codec::{Outbound, decoded_size, encode_packet, encoded_size, padded_text_length};
pub use error::ProtoError;
pub use frame::Frame;
pub use packet::Packet;
pub use packet_type::{PacketType, SmallType, TinyType};
