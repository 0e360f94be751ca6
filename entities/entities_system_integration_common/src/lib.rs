//! Entities Layer: Platform-Neutral Socket System Integration
//!
//! Provides the single platform-neutral surface over the BSD-socket and
//! Winsock system primitives. Exactly one platform implementation crate is
//! linked per target through target-conditional dependencies; call sites
//! never branch on the platform themselves.
//!
//! ## Overview
//!
//! The `entities_system_integration_common` crate provides:
//! - **[`platform`](platform/index.html)**: last-error retrieval and
//!   rendering, hostname resolution, and socket-layer constants, dispatched
//!   to the Unix or Windows implementation selected at build time
//! - **[`error_reporting`](error_reporting/index.html)**: the shared
//!   "validity + last error" capability implemented by every networking
//!   value type
//! - **[`subsystem`](subsystem/index.html)**: the process-wide network
//!   subsystem startup/teardown guard
//!
//! ## See Also
//!
//! - [`entities_system_integration_unix`](../entities_system_integration_unix/index.html): Unix implementations
//! - [`entities_system_integration_win32`](../entities_system_integration_win32/index.html): Windows implementations

pub mod error_reporting;
pub mod platform;
pub mod subsystem;

pub use error_reporting::{ErrorReporting, ErrorSlot};
pub use platform::{
    error_message, last_error_code, max_backlog, resolve_host, sockaddr_storage_len, ResolveError,
};
pub use subsystem::NetSubsystem;
