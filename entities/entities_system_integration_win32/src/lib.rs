//! Entities Layer: Windows Socket System Integration
//!
//! Provides the Winsock implementations of the platform socket primitives:
//! `WSAGetLastError` retrieval, `FormatMessage`-backed rendering, hostname
//! resolution through the Winsock `getaddrinfo`, socket-layer constants,
//! and `WSAStartup`/`WSACleanup` subsystem management.
//!
//! The platform-neutral surface lives in
//! `entities_system_integration_common`, which links exactly one platform
//! crate per target. Callers never use this crate directly.

#[cfg(windows)]
pub mod sys_error;

#[cfg(windows)]
pub use sys_error::{
    error_message, last_error_code, max_backlog, resolve_host, sockaddr_storage_len,
    subsystem_startup, subsystem_teardown,
};

#[cfg(not(windows))]
/// Windows-specific functionality is only available on Windows
pub fn windows_only() {
    // Placeholder for non-Windows platforms
}
