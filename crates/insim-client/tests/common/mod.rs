//! Minimal InSim host for integration tests.

#![allow(dead_code)]

use std::{
    io::Read,
    net::{TcpListener, TcpStream},
    thread::{self, JoinHandle},
    time::Duration,
};

use insim_proto::{decoded_size, encode_packet, packets::Ver};

pub const VERSION: u8 = 9;

/// Binds a listener on a free loopback port.
pub fn listen() -> anyhow::Result<(TcpListener, u16)> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    Ok((listener, port))
}

/// Accepts one client on a background thread and runs `script` against it.
pub fn serve<F>(listener: TcpListener, script: F) -> JoinHandle<anyhow::Result<()>>
where
    F: FnOnce(TcpStream) -> anyhow::Result<()> + Send + 'static,
{
    thread::spawn(move || {
        let (stream, _) = listener.accept()?;
        stream.set_read_timeout(Some(Duration::from_secs(5)))?;
        script(stream)
    })
}

/// Reads one complete packet.
pub fn read_packet(stream: &mut TcpStream) -> anyhow::Result<Vec<u8>> {
    let mut size = [0u8; 1];
    stream.read_exact(&mut size)?;
    let len = decoded_size(size[0], VERSION);
    anyhow::ensure!(len > 0, "zero size byte");
    let mut packet = vec![0u8; len];
    packet[0] = size[0];
    stream.read_exact(&mut packet[1..])?;
    Ok(packet)
}

pub fn version_reply() -> anyhow::Result<Vec<u8>> {
    let ver = Ver {
        req_i: 1,
        version: "0.7F".into(),
        product: "S3".into(),
        insim_version: VERSION,
    };
    Ok(encode_packet(&ver, VERSION)?.to_vec())
}
