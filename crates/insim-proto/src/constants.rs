/// Length of the common packet header: size, type, request id, sub-type.
pub const HEADER_LEN: usize = 4;

/// Highest protocol version whose size field counts raw bytes.
///
/// Above this version the size byte counts [`SIZE_UNIT`]-byte units.
pub const LAST_UNSCALED_VERSION: u8 = 8;

/// Unit of the size field once scaling is active.
pub const SIZE_UNIT: usize = 4;

/// Protocol version requested when the caller does not pick one.
pub const DEFAULT_INSIM_VERSION: u8 = 9;

/// Largest packet the one-byte size field can describe (scaled).
pub const MAX_PACKET_LEN: usize = u8::MAX as usize * SIZE_UNIT;

/// Receive buffer capacity: one maximum-size packet of carry-over.
pub const RX_BUFFER_CAPACITY: usize = MAX_PACKET_LEN;

/// Receive buffer for a single UDP datagram.
pub const UDP_BUFFER_CAPACITY: usize = MAX_PACKET_LEN;

/// Width of the product name and admin password fields in the init packet.
pub const NAME_LEN: usize = 16;

/// Default TCP port of an InSim host.
pub const DEFAULT_TCP_PORT: u16 = 29999;

/// Returns `true` when `version` counts the size field in 4-byte units.
#[inline]
pub const fn scales_size(version: u8) -> bool {
    version > LAST_UNSCALED_VERSION
}
