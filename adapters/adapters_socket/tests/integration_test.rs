//! Integration tests for adapters_socket crate
//!
//! End-to-end lifecycle runs over the loopback interface: threaded TCP echo
//! exchanges, datagram sender tracking, and a large datagram payload round
//! trip. One network subsystem guard is shared by every test in the
//! process, mirroring the one-guard-per-process contract.

use std::sync::OnceLock;
use std::thread;

use adapters_socket::{Socket, SocketType};
use entities_addressing::{Address, IpVersion};
use entities_system_integration_common::{ErrorReporting, NetSubsystem};

fn net() -> &'static NetSubsystem {
    static NET: OnceLock<NetSubsystem> = OnceLock::new();
    NET.get_or_init(NetSubsystem::init)
}

fn address(version: IpVersion, text: &str, port: u16) -> Address {
    let mut addr = Address::new();
    addr.set_text(version, text, port).unwrap();
    addr
}

#[test]
fn test_tcp_echo_over_ipv6() {
    net();

    let mut server =
        Socket::with_addr(SocketType::Stream, &address(IpVersion::V6, "::", 0)).unwrap();
    server.init().unwrap();
    server.bind().unwrap();
    server.listen().unwrap();
    let port = server.local_addr().unwrap().port().unwrap();
    assert_ne!(port, 0);

    let client_thread = thread::spawn(move || {
        let mut client =
            Socket::with_addr(SocketType::Stream, &address(IpVersion::V6, "::1", port)).unwrap();
        client.init().unwrap();
        client.connect().unwrap();
        client.write(b"ping over v6").unwrap();

        let (buffer, received) = client.read(8192).unwrap();
        assert_eq!(&buffer[..received], b"ping over v6");
    });

    let mut connection = server.accept().unwrap();
    let peer = connection.addr().unwrap().text().unwrap();
    assert!(peer.starts_with("::1:"), "unexpected peer {peer}");

    let (buffer, received) = connection.read(8192).unwrap();
    assert_eq!(received, b"ping over v6".len());
    assert_eq!(buffer.len(), 8192);
    connection.write(&buffer[..received]).unwrap();

    client_thread.join().unwrap();
}

#[test]
fn test_tcp_echo_over_ipv4() {
    net();

    let mut server =
        Socket::with_addr(SocketType::Stream, &address(IpVersion::V4, "127.0.0.1", 0)).unwrap();
    server.init().unwrap();
    server.bind().unwrap();
    server.listen().unwrap();
    let port = server.local_addr().unwrap().port().unwrap();

    let client_thread = thread::spawn(move || {
        let mut client = Socket::with_addr(
            SocketType::Stream,
            &address(IpVersion::V4, "127.0.0.1", port),
        )
        .unwrap();
        client.init().unwrap();
        client.connect().unwrap();
        client.write(b"hello").unwrap();

        let (buffer, received) = client.read(64).unwrap();
        assert_eq!(&buffer[..received], b"HELLO-BACK");
    });

    let mut connection = server.accept().unwrap();
    let (buffer, received) = connection.read(64).unwrap();
    assert_eq!(&buffer[..received], b"hello");
    connection.write(b"HELLO-BACK").unwrap();

    client_thread.join().unwrap();

    // the listener is unaffected by the accepted connection's lifetime
    assert!(server.is_valid());
    assert_eq!(server.socket_type().unwrap(), SocketType::Stream);
}

#[test]
fn test_datagram_reply_targets_most_recent_sender() {
    net();

    let mut server =
        Socket::with_addr(SocketType::Datagram, &address(IpVersion::V6, "::", 0)).unwrap();
    server.init().unwrap();
    server.bind().unwrap();
    let port = server.local_addr().unwrap().port().unwrap();

    let client_thread = thread::spawn(move || {
        let mut client =
            Socket::with_addr(SocketType::Datagram, &address(IpVersion::V6, "::1", port)).unwrap();
        client.init().unwrap();
        client.write(b"who goes there").unwrap();

        let (buffer, received) = client.read(64).unwrap();
        assert_eq!(&buffer[..received], b"a friend");
    });

    let (buffer, received) = server.read(64).unwrap();
    assert_eq!(&buffer[..received], b"who goes there");

    // the read replaced the configured wildcard endpoint with the sender
    let stored = server.addr().unwrap().text().unwrap();
    assert!(stored.starts_with("::1:"), "unexpected stored peer {stored}");

    // no set_addr in between: the write must answer that sender
    server.write(b"a friend").unwrap();

    client_thread.join().unwrap();
}

#[test]
fn test_large_datagram_round_trip() {
    net();

    let mut server =
        Socket::with_addr(SocketType::Datagram, &address(IpVersion::V4, "127.0.0.1", 0)).unwrap();
    server.init().unwrap();
    server.bind().unwrap();
    let port = server.local_addr().unwrap().port().unwrap();

    let payload: Vec<u8> = (0..8192).map(|i| (i % 251) as u8).collect();
    let sent = payload.clone();

    let client_thread = thread::spawn(move || {
        let mut client = Socket::with_addr(
            SocketType::Datagram,
            &address(IpVersion::V4, "127.0.0.1", port),
        )
        .unwrap();
        client.init().unwrap();
        client.write(&sent).unwrap();
    });

    let (buffer, received) = server.read(65536).unwrap();
    client_thread.join().unwrap();

    // the buffer keeps the requested size; the reported length bounds the data
    assert_eq!(buffer.len(), 65536);
    assert_eq!(received, payload.len());
    assert_eq!(&buffer[..received], &payload[..]);
}

#[test]
fn test_accepted_peer_matches_connecting_socket() {
    net();

    let mut server =
        Socket::with_addr(SocketType::Stream, &address(IpVersion::V6, "::", 0)).unwrap();
    server.init().unwrap();
    server.bind().unwrap();
    server.listen().unwrap();
    let port = server.local_addr().unwrap().port().unwrap();

    let client_thread = thread::spawn(move || {
        let mut client =
            Socket::with_addr(SocketType::Stream, &address(IpVersion::V6, "::1", port)).unwrap();
        client.init().unwrap();
        client.connect().unwrap();
        client.local_addr().unwrap().port().unwrap()
    });

    let mut connection = server.accept().unwrap();
    let client_port = client_thread.join().unwrap();

    let peer = connection.addr().unwrap();
    assert_eq!(peer.ip_version().unwrap(), IpVersion::V6);
    assert_eq!(peer.port().unwrap(), client_port);
    assert_eq!(peer.text().unwrap(), format!("::1:{client_port}"));
}
