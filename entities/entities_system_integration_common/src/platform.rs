//! Platform Primitive Dispatch
//!
//! One platform implementation crate is linked per target; every function
//! here forwards to it. This is the only place in the workspace that names
//! a platform crate.

use std::net::SocketAddr;

#[cfg(unix)]
use entities_system_integration_unix as sys;
#[cfg(windows)]
use entities_system_integration_win32 as sys;

/// Resolver failure: the resolver's own error code plus its rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveError {
    /// Resolver error code (`EAI_*` / `WSA*`)
    pub code: i32,
    /// Human-readable rendering of `code`
    pub message: String,
}

/// Current OS-level socket error code (`errno` / `WSAGetLastError`).
pub fn last_error_code() -> i32 {
    sys::last_error_code()
}

/// Render an OS-level error code as human-readable text.
pub fn error_message(code: i32) -> String {
    sys::error_message(code)
}

/// Maximum listen backlog accepted by the platform (`SOMAXCONN`).
pub fn max_backlog() -> i32 {
    sys::max_backlog()
}

/// Capacity of the platform's generic socket-address storage structure.
pub fn sockaddr_storage_len() -> usize {
    sys::sockaddr_storage_len()
}

/// Resolve a host/service pair through the platform resolver.
///
/// Hints request an unspecified family and a stream socket type; the full
/// candidate list is returned in resolver order and the native list is
/// always released before returning.
pub fn resolve_host(host: &str, service: &str) -> Result<Vec<SocketAddr>, ResolveError> {
    sys::resolve_host(host, service).map_err(|(code, message)| ResolveError { code, message })
}

/// Start the platform network subsystem. Only Windows has work to do here.
pub fn subsystem_startup() -> Result<(), i32> {
    sys::subsystem_startup()
}

/// Tear the platform network subsystem down again.
pub fn subsystem_teardown() {
    sys::subsystem_teardown()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_not_empty() {
        // code 1 is EPERM / ERROR_INVALID_FUNCTION, present on every target
        assert!(!error_message(1).is_empty());
    }

    #[test]
    fn test_resolve_failure_carries_code_and_text() {
        let error = resolve_host("localhost", "no-such-service-name").unwrap_err();
        assert_ne!(error.code, 0);
        assert!(!error.message.is_empty());
    }

    #[test]
    fn test_resolve_literal_keeps_port() {
        let candidates = resolve_host("127.0.0.1", "9000").unwrap();
        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|c| c.port() == 9000));
    }

    #[test]
    fn test_backlog_and_storage_constants() {
        assert!(max_backlog() > 0);
        // sockaddr_in6 needs 28 bytes on every supported platform
        assert!(sockaddr_storage_len() >= 28);
    }
}
