mod common;

use std::{
    io::{Read, Write},
    net::UdpSocket,
    thread,
    time::Duration,
};

use common::{listen, read_packet, serve, version_reply};
use insim_client::{ConnectConfig, Connection, InsimError};
use insim_proto::{
    Packet, PacketType, ProtoError, SmallType, encode_packet,
    packets::{Isi, Small},
};

#[test]
fn handshake_keepalive_and_close() -> anyhow::Result<()> {
    let (listener, port) = listen()?;
    let host = serve(listener, |mut s| {
        let isi = Isi::decode(&read_packet(&mut s)?)?;
        assert_eq!(isi.name(), "tail-test");
        assert_eq!(isi.req_i, 1);
        assert_eq!(isi.insim_version, 9);

        s.write_all(&version_reply()?)?;
        s.write_all(&[1, 3, 0, 0])?;
        s.write_all(&encode_packet(&Small::new(SmallType::Vta, 7), 9)?)?;

        assert_eq!(read_packet(&mut s)?, vec![1, 3, 0, 0]);
        assert_eq!(read_packet(&mut s)?, vec![1, 3, 0, 2]);
        let mut rest = Vec::new();
        s.read_to_end(&mut rest)?;
        assert!(rest.is_empty());
        Ok(())
    });

    let mut conn = Connection::connect(&ConnectConfig::new("127.0.0.1", port).with_product("tail-test"))?;
    let ver = conn.host_version().expect("version reply");
    assert_eq!(ver.product, "S3");
    assert_eq!(ver.version, "0.7F");

    match conn.next_packet()?.decode()? {
        Packet::Small(small) => {
            assert_eq!(small.subtype(), Some(SmallType::Vta));
            assert_eq!(small.value, 7);
        }
        other => panic!("unexpected packet {other:?}"),
    }

    conn.disconnect()?;
    conn.disconnect()?;
    host.join().expect("host thread")?;
    Ok(())
}

#[test]
fn wrong_handshake_reply_fails_connect() -> anyhow::Result<()> {
    let (listener, port) = listen()?;
    let host = serve(listener, |mut s| {
        read_packet(&mut s)?;
        s.write_all(&encode_packet(&Small::new(SmallType::Tms, 0), 9)?)?;
        let mut rest = Vec::new();
        s.read_to_end(&mut rest)?;
        Ok(())
    });

    let err = Connection::connect(&ConnectConfig::new("127.0.0.1", port)).unwrap_err();
    assert!(matches!(
        err,
        InsimError::UnexpectedReply {
            expected: PacketType::Ver,
            actual: 4
        }
    ));
    host.join().expect("host thread")?;
    Ok(())
}

#[test]
fn peer_close_is_reported() -> anyhow::Result<()> {
    let (listener, port) = listen()?;
    let host = serve(listener, |mut s| {
        read_packet(&mut s)?;
        Ok(())
    });

    let config = ConnectConfig::new("127.0.0.1", port).with_request_version(false);
    let mut conn = Connection::connect(&config)?;
    host.join().expect("host thread")?;

    let err = conn.next_packet().unwrap_err();
    assert!(matches!(err, InsimError::PeerClosed));
    assert!(err.is_disconnect());
    Ok(())
}

#[test]
fn shutdown_aborts_a_blocked_receive() -> anyhow::Result<()> {
    let (listener, port) = listen()?;
    let host = serve(listener, |mut s| {
        read_packet(&mut s)?;
        let mut rest = Vec::new();
        s.read_to_end(&mut rest)?;
        // Shut down from outside: no close notification follows.
        assert!(rest.is_empty());
        Ok(())
    });

    let config = ConnectConfig::new("127.0.0.1", port)
        .with_request_version(false)
        .with_poll_timeout(Duration::from_millis(50));
    let mut conn = Connection::connect(&config)?;

    let handle = conn.shutdown_handle();
    let killer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        handle.shutdown();
    });

    assert!(matches!(conn.next_packet(), Err(InsimError::Aborted)));
    killer.join().expect("shutdown thread");
    conn.disconnect()?;
    host.join().expect("host thread")?;
    Ok(())
}

#[test]
fn sender_works_from_another_thread() -> anyhow::Result<()> {
    let (listener, port) = listen()?;
    let host = serve(listener, |mut s| {
        read_packet(&mut s)?;
        let mst = read_packet(&mut s)?;
        assert_eq!(mst[1], PacketType::Mst as u8);
        assert_eq!(&mst[4..9], b"hello");
        assert_eq!(read_packet(&mut s)?, vec![1, 3, 0, 2]);
        Ok(())
    });

    let config = ConnectConfig::new("127.0.0.1", port).with_request_version(false);
    let mut conn = Connection::connect(&config)?;
    let sender = conn.sender();
    thread::spawn(move || sender.send_message("hello"))
        .join()
        .expect("sender thread")?;

    conn.disconnect()?;
    host.join().expect("host thread")?;
    Ok(())
}

#[test]
fn oversized_product_fails_before_connecting() {
    // Nothing listens on port 1; validation has to fail first.
    let config = ConnectConfig::new("127.0.0.1", 1).with_product("a very long product name");
    assert!(matches!(
        Connection::connect(&config),
        Err(InsimError::Protocol(ProtoError::FieldTooLong {
            field: "product name",
            ..
        }))
    ));
}

#[test]
fn zero_poll_timeout_fails_before_connecting() {
    let config = ConnectConfig::new("127.0.0.1", 1).with_poll_timeout(Duration::ZERO);
    assert!(matches!(
        Connection::connect(&config),
        Err(InsimError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidInput
    ));
}

#[test]
fn refused_connection_is_a_connect_error() -> anyhow::Result<()> {
    let (listener, port) = listen()?;
    drop(listener);
    assert!(matches!(
        Connection::connect(&ConnectConfig::new("127.0.0.1", port)),
        Err(InsimError::Connect { .. })
    ));
    Ok(())
}

#[test]
fn udp_ignores_datagrams_from_other_ports() -> anyhow::Result<()> {
    let udp_port = UdpSocket::bind("127.0.0.1:0")?.local_addr()?.port();
    let (listener, port) = listen()?;
    let host = serve(listener, move |mut s| {
        let isi = Isi::decode(&read_packet(&mut s)?)?;
        assert_eq!(isi.udp_port, udp_port);

        // Not the host's UDP port, so the connected channel never sees it.
        let out = UdpSocket::bind("127.0.0.1:0")?;
        out.send_to(&[3, 38, 0, 1, 9, 9, 9, 9, 9, 9, 9, 9], ("127.0.0.1", udp_port))?;
        let mut rest = Vec::new();
        s.read_to_end(&mut rest)?;
        Ok(())
    });

    let config = ConnectConfig::new("127.0.0.1", port)
        .with_request_version(false)
        .with_udp_port(udp_port)
        .with_poll_timeout(Duration::from_millis(50));
    let mut conn = Connection::connect(&config)?;

    let handle = conn.shutdown_handle();
    let killer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(300));
        handle.shutdown();
    });
    assert!(matches!(conn.udp_next_packet(), Err(InsimError::Aborted)));
    killer.join().expect("shutdown thread");

    let mut udp = conn.take_udp().expect("udp channel");
    assert!(matches!(conn.udp_next_packet(), Err(InsimError::UdpUnavailable)));
    assert_eq!(udp.peer_addr()?.port(), udp_port);
    assert!(matches!(udp.pull_datagram(), Err(InsimError::Aborted)));

    drop(conn);
    host.join().expect("host thread")?;
    Ok(())
}
