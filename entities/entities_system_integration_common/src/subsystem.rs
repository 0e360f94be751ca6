//! Process-Wide Network Subsystem Guard
//!
//! Winsock requires `WSAStartup` before any socket call and `WSACleanup`
//! afterwards; BSD sockets need neither. The guard gives both platforms the
//! same shape: construct it once near process start, keep it alive for as
//! long as any socket work happens, and let its drop run the teardown.

use crate::platform;

/// Scoped startup/teardown of the platform socket library.
///
/// Construction is process-fatal on failure: a host whose socket subsystem
/// cannot start has nothing useful left to do, so the constructor panics
/// with the rendered startup error instead of returning it.
///
/// Holding two guards at once is unsupported by contract and not enforced.
///
/// # Examples
///
/// ```rust
/// use entities_system_integration_common::NetSubsystem;
///
/// let _net = NetSubsystem::init();
/// // sockets may be used until `_net` drops
/// ```
pub struct NetSubsystem {
    _priv: (),
}

impl NetSubsystem {
    /// Start the platform socket library. A no-op outside Windows.
    pub fn init() -> Self {
        if let Err(code) = platform::subsystem_startup() {
            panic!(
                "network subsystem startup failed: {}",
                platform::error_message(code)
            );
        }
        NetSubsystem { _priv: () }
    }
}

impl Drop for NetSubsystem {
    fn drop(&mut self) {
        platform::subsystem_teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_scopes_cleanly() {
        let guard = NetSubsystem::init();
        drop(guard);
        // a fresh process-lifetime may start again after full teardown
        let _second_lifetime = NetSubsystem::init();
    }
}
