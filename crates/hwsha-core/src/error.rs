//! # Error Types
//!
//! Errors raised by the SHA-256 engine. Uses `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! The engine has no recoverable input errors: any byte string is a valid
//! message. What can go wrong is resource exhaustion while staging the padded
//! block, a message too long for the 64-bit length field, or a broken internal
//! invariant (which indicates a bug in this crate, never bad input).

use thiserror::Error;

/// Errors from a single digest computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The padded block buffer could not be allocated.
    #[error("allocation failed: could not reserve {requested} bytes for the padded block")]
    AllocationFailure {
        /// Number of bytes the encoder tried to reserve.
        requested: usize,
    },

    /// The message bit length does not fit the 64-bit length field.
    #[error("message of {len} bytes exceeds the SHA-256 maximum length")]
    MessageTooLong {
        /// Message length in bytes.
        len: usize,
    },

    /// An internal invariant was broken. This is an engine defect.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_failure_display() {
        let err = HashError::AllocationFailure { requested: 128 };
        let msg = format!("{err}");
        assert!(msg.contains("allocation failed"));
        assert!(msg.contains("128"));
    }

    #[test]
    fn test_message_too_long_display() {
        let err = HashError::MessageTooLong { len: usize::MAX };
        assert!(format!("{err}").contains(&usize::MAX.to_string()));
    }

    #[test]
    fn test_invariant_violation_display() {
        let err = HashError::InvariantViolation("block length 65".to_string());
        assert!(format!("{err}").contains("block length 65"));
    }
}
