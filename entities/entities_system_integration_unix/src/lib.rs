//! Entities Layer: Unix Socket System Integration
//!
//! Provides the Unix implementations of the platform socket primitives:
//! last-error retrieval and rendering, hostname resolution through
//! `getaddrinfo`, socket-layer constants, and the (no-op) network
//! subsystem startup and teardown.
//!
//! The platform-neutral surface lives in
//! `entities_system_integration_common`, which links exactly one platform
//! crate per target. Callers never use this crate directly.

#[cfg(unix)]
pub mod sys_error;

#[cfg(unix)]
pub use sys_error::{
    error_message, last_error_code, max_backlog, resolve_host, sockaddr_storage_len,
    subsystem_startup, subsystem_teardown,
};

#[cfg(not(unix))]
/// Unix-specific functionality is only available on Unix
pub fn unix_only() {
    // Placeholder for non-Unix platforms
}
