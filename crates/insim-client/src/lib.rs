//! Blocking InSim client transport.
//!
//! A [`Connection`] owns one TCP session with an InSim host and, optionally,
//! a UDP socket for high-frequency packets. Inbound bytes are reassembled into
//! [`Frame`]s, keepalive pings are answered internally, and outbound packets
//! go through a [`Sender`] that can be cloned into other threads.

pub mod commands;
pub mod config;
pub mod connection;
pub mod error;
pub mod keepalive;
pub mod reassembler;
pub mod sender;
pub mod udp;

mod rx_buffer;

#[cfg(test)]
mod mock;

pub use config::ConnectConfig;
pub use connection::{Connection, ShutdownHandle};
pub use error::InsimError;
pub use insim_proto::Frame;
pub use sender::Sender;
pub use udp::UdpChannel;
