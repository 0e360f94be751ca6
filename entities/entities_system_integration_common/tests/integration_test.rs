//! Integration tests for entities_system_integration_common crate
//!
//! Exercises the platform dispatch surface and the subsystem guard the way
//! downstream crates consume them.

use entities_system_integration_common::{
    error_message, max_backlog, resolve_host, sockaddr_storage_len, NetSubsystem,
};

#[test]
fn test_guarded_resolution_lifecycle() {
    let _net = NetSubsystem::init();

    let candidates = resolve_host("127.0.0.1", "7").unwrap();
    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|c| c.port() == 7));
}

#[test]
fn test_resolver_error_surfaces_code_and_message() {
    let error = resolve_host("localhost", "no-such-service-name").unwrap_err();
    assert_ne!(error.code, 0);
    assert!(!error.message.is_empty());
    // the rendering primitive also works on codes it has never seen
    assert!(!error_message(error.code).is_empty());
}

#[test]
fn test_platform_constants_are_sane() {
    assert!(max_backlog() > 0);
    assert!(sockaddr_storage_len() >= 28);
}
