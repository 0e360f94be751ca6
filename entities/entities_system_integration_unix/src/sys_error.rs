//! Unix Socket Error and Resolution Primitives
//!
//! Wraps `errno`, `strerror`-style rendering, and `getaddrinfo` for the
//! platform-neutral dispatch layer. All raw pointer handling is confined to
//! this module; results cross the crate boundary as owned `std::net` values.

use std::ffi::{CStr, CString};
use std::mem;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use std::ptr;

use nix::errno::Errno;

/// Current OS-level socket error code (`errno`).
pub fn last_error_code() -> i32 {
    Errno::last() as i32
}

/// Render an OS-level error code as human-readable text.
pub fn error_message(code: i32) -> String {
    Errno::from_i32(code).desc().to_string()
}

/// Maximum listen backlog accepted by the platform.
pub fn max_backlog() -> i32 {
    libc::SOMAXCONN
}

/// Capacity of the platform's generic socket-address storage structure.
pub fn sockaddr_storage_len() -> usize {
    mem::size_of::<libc::sockaddr_storage>()
}

/// Network subsystem startup. Nothing to start on Unix.
pub fn subsystem_startup() -> Result<(), i32> {
    Ok(())
}

/// Network subsystem teardown. Nothing to release on Unix.
pub fn subsystem_teardown() {}

/// Resolve a host/service pair through `getaddrinfo`.
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
    let node = CString::new(host)
        .map_err(|_| (libc::EAI_NONAME, "host contains an interior NUL".to_string()))?;
    let serv = CString::new(service)
        .map_err(|_| (libc::EAI_SERVICE, "service contains an interior NUL".to_string()))?;

    let mut hints: libc::addrinfo = unsafe { mem::zeroed() };
    hints.ai_family = libc::AF_UNSPEC;
    hints.ai_socktype = libc::SOCK_STREAM;

    let mut list: *mut libc::addrinfo = ptr::null_mut();
    let rc = unsafe { libc::getaddrinfo(node.as_ptr(), serv.as_ptr(), &hints, &mut list) };
    if rc != 0 {
        return Err((rc, resolver_message(rc)));
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
    unsafe { libc::freeaddrinfo(list) };

    Ok(candidates)
}

fn resolver_message(code: i32) -> String {
    // EAI_SYSTEM reports through errno instead of the resolver's own table
    if code == libc::EAI_SYSTEM {
        return error_message(last_error_code());
    }
    let text = unsafe { libc::gai_strerror(code) };
    if text.is_null() {
        return format!("unknown resolver error {code}");
    }
    unsafe { CStr::from_ptr(text) }.to_string_lossy().into_owned()
}

/// Convert one `addrinfo` entry into an owned socket address.
///
/// # Safety
///
/// `entry.ai_addr` must point to a structure matching `entry.ai_family`,
/// which `getaddrinfo` guarantees for the entries it returns.
unsafe fn candidate_from_entry(entry: &libc::addrinfo) -> Option<SocketAddr> {
    match entry.ai_family {
        libc::AF_INET => {
            let raw = &*(entry.ai_addr as *const libc::sockaddr_in);
            let ip = Ipv4Addr::from(u32::from_be(raw.sin_addr.s_addr));
            Some(SocketAddr::V4(SocketAddrV4::new(
                ip,
                u16::from_be(raw.sin_port),
            )))
        }
        libc::AF_INET6 => {
            let raw = &*(entry.ai_addr as *const libc::sockaddr_in6);
            let ip = Ipv6Addr::from(raw.sin6_addr.s6_addr);
            Some(SocketAddr::V6(SocketAddrV6::new(
                ip,
                u16::from_be(raw.sin6_port),
                raw.sin6_flowinfo,
                raw.sin6_scope_id,
            )))
        }
        _ => None,
    }
}
