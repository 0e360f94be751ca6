//! Winsock Error and Resolution Primitives
//!
//! Wraps `WSAGetLastError`, system error-message rendering, Winsock
//! `getaddrinfo`, and `WSAStartup`/`WSACleanup` for the platform-neutral
//! dispatch layer. All raw pointer handling is confined to this module;
//! results cross the crate boundary as owned `std::net` values.

use std::ffi::CString;
use std::io;
use std::mem;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::ptr;

use windows_sys::Win32::Networking::WinSock::{
    freeaddrinfo, getaddrinfo, WSACleanup, WSAGetLastError, WSAStartup, ADDRINFOA, AF_INET,
    AF_INET6, AF_UNSPEC, SOCKADDR_IN, SOCKADDR_IN6, SOCKADDR_STORAGE, SOCK_STREAM, SOMAXCONN,
    WSADATA, WSAHOST_NOT_FOUND, WSATYPE_NOT_FOUND,
};

/// Current OS-level socket error code (`WSAGetLastError`).
pub fn last_error_code() -> i32 {
    unsafe { WSAGetLastError() }
}

/// Render an OS-level error code as human-readable text.
///
/// `std::io::Error` formats Windows codes through `FormatMessage`, which
/// covers the Winsock range as well.
pub fn error_message(code: i32) -> String {
    io::Error::from_raw_os_error(code).to_string()
}

/// Maximum listen backlog accepted by the platform.
pub fn max_backlog() -> i32 {
    SOMAXCONN as i32
}

/// Capacity of the platform's generic socket-address storage structure.
pub fn sockaddr_storage_len() -> usize {
    mem::size_of::<SOCKADDR_STORAGE>()
}

/// Network subsystem startup: `WSAStartup` requesting Winsock 2.2.
pub fn subsystem_startup() -> Result<(), i32> {
    let mut data: WSADATA = unsafe { mem::zeroed() };
    let rc = unsafe { WSAStartup(0x202, &mut data) };
    if rc != 0 {
        return Err(rc);
    }
    Ok(())
}

/// Network subsystem teardown: `WSACleanup`.
pub fn subsystem_teardown() {
    unsafe {
        WSACleanup();
    }
}

/// Resolve a host/service pair through the Winsock `getaddrinfo`.
///
/// Hints request an unspecified family and a stream socket type, so the
/// candidate list matches what a connect-oriented caller would be offered.
/// The whole native list is converted and `freeaddrinfo` runs before this
/// function returns, on the success and failure paths alike.
///
/// # Arguments
///
/// * `host` - Hostname or numeric address literal
/// * `service` - Numeric port or service name
///
/// # Returns
///
/// * `Ok(Vec<SocketAddr>)` - Every IPv4/IPv6 candidate, in resolver order
/// * `Err((code, message))` - The resolver's error code and rendered text
pub fn resolve_host(host: &str, service: &str) -> Result<Vec<SocketAddr>, (i32, String)> {
    let node = CString::new(host).map_err(|_| {
        (
            WSAHOST_NOT_FOUND,
            "host contains an interior NUL".to_string(),
        )
    })?;
    let serv = CString::new(service).map_err(|_| {
        (
            WSATYPE_NOT_FOUND,
            "service contains an interior NUL".to_string(),
        )
    })?;

    let mut hints: ADDRINFOA = unsafe { mem::zeroed() };
    hints.ai_family = AF_UNSPEC as i32;
    hints.ai_socktype = SOCK_STREAM as i32;

    let mut list: *mut ADDRINFOA = ptr::null_mut();
    let rc = unsafe {
        getaddrinfo(
            node.as_ptr() as *const u8,
            serv.as_ptr() as *const u8,
            &hints,
            &mut list,
        )
    };
    if rc != 0 {
        return Err((rc, error_message(rc)));
    }

    let mut candidates = Vec::new();
    let mut cursor = list;
    while !cursor.is_null() {
        let entry = unsafe { &*cursor };
        if let Some(candidate) = unsafe { candidate_from_entry(entry) } {
            candidates.push(candidate);
        }
        cursor = entry.ai_next;
    }
    unsafe { freeaddrinfo(list) };

    Ok(candidates)
}

/// Convert one `ADDRINFOA` entry into an owned socket address.
///
/// # Safety
///
/// `entry.ai_addr` must point to a structure matching `entry.ai_family`,
/// which `getaddrinfo` guarantees for the entries it returns.
unsafe fn candidate_from_entry(entry: &ADDRINFOA) -> Option<SocketAddr> {
    match entry.ai_family {
        family if family == AF_INET as i32 => {
            let raw = &*(entry.ai_addr as *const SOCKADDR_IN);
            let ip = Ipv4Addr::from(u32::from_be(raw.sin_addr.S_un.S_addr));
            Some(SocketAddr::V4(SocketAddrV4::new(
                ip,
                u16::from_be(raw.sin_port),
            )))
        }
        family if family == AF_INET6 as i32 => {
            let raw = &*(entry.ai_addr as *const SOCKADDR_IN6);
            let ip = Ipv6Addr::from(raw.sin6_addr.u.Byte);
            Some(SocketAddr::V6(SocketAddrV6::new(
                ip,
                u16::from_be(raw.sin6_port),
                raw.sin6_flowinfo,
                raw.Anonymous.sin6_scope_id,
            )))
        }
        _ => None,
    }
}
