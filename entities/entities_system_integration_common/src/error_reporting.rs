//! Shared Error-Reporting Capability
//!
//! Every networking value type in the workspace reports validity and its
//! most recent OS-level failure through the same trait, and records that
//! failure through the same slot type, so the capture logic exists once.

use std::io;

use crate::platform;

/// Validity plus last-failure reporting.
///
/// Implementors keep their own error state; there is no global "last
/// error" in this workspace, so concurrent users of distinct values never
/// race on shared error state.
pub trait ErrorReporting {
    /// Whether the value is in a usable, fully-populated state.
    fn is_valid(&self) -> bool;

    /// OS-level code of the most recent failure, 0 if none was recorded.
    fn last_error_code(&self) -> i32;

    /// Rendered message of the most recent failure, empty if none.
    fn last_error_message(&self) -> &str;
}

/// Per-instance storage behind [`ErrorReporting`].
#[derive(Debug, Clone, Default)]
pub struct ErrorSlot {
    code: i32,
    message: String,
}

impl ErrorSlot {
    /// Record an explicit code/message pair (resolver and parse failures).
    pub fn record(&mut self, code: i32, message: impl Into<String>) {
        self.code = code;
        self.message = message.into();
    }

    /// Record a failed native call.
    ///
    /// Takes the code carried by the error itself when present, falling
    /// back to the platform's current last-error query.
    pub fn record_os(&mut self, error: &io::Error) {
        self.code = error
            .raw_os_error()
            .unwrap_or_else(platform::last_error_code);
        self.message = error.to_string();
    }

    /// Code of the most recent recorded failure.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Message of the most recent recorded failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_starts_clean() {
        let slot = ErrorSlot::default();
        assert_eq!(slot.code(), 0);
        assert!(slot.message().is_empty());
    }

    #[test]
    fn test_record_explicit_pair() {
        let mut slot = ErrorSlot::default();
        slot.record(-2, "name or service not known");
        assert_eq!(slot.code(), -2);
        assert_eq!(slot.message(), "name or service not known");
    }

    #[test]
    fn test_record_os_error_keeps_raw_code() {
        let mut slot = ErrorSlot::default();
        let error = io::Error::from_raw_os_error(111);
        slot.record_os(&error);
        assert_eq!(slot.code(), 111);
        assert!(!slot.message().is_empty());
    }

    #[test]
    fn test_latest_record_wins() {
        let mut slot = ErrorSlot::default();
        slot.record(1, "first");
        slot.record(2, "second");
        assert_eq!(slot.code(), 2);
        assert_eq!(slot.message(), "second");
    }
}
