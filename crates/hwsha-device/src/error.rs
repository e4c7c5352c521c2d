//! # Device Error Types
//!
//! Errors from the register device, its driver, and configuration loading.

use hwsha_core::HashError;
use thiserror::Error;

/// Errors from device submissions and result reads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The message does not fit the input window.
    #[error("input of {len} bytes exceeds the {capacity}-byte input window")]
    InputTooLarge {
        /// Submitted length in bytes.
        len: usize,
        /// Input window capacity in bytes.
        capacity: usize,
    },

    /// No digest has been published since construction or the last reset.
    #[error("no result ready")]
    NotReady,

    /// The engine failed; no digest was published.
    #[error("engine error: {0}")]
    Engine(#[from] HashError),
}

/// Errors loading or validating a [`DeviceConfig`](crate::DeviceConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The input capacity is zero or larger than the register window.
    #[error("input capacity {capacity} out of range (1..={max})")]
    InvalidCapacity {
        /// Configured capacity.
        capacity: usize,
        /// Largest capacity the register window can hold.
        max: usize,
    },

    /// YAML parsing failed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// I/O error reading the config file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_too_large_display() {
        let err = DeviceError::InputTooLarge {
            len: 2000,
            capacity: 1024,
        };
        let msg = format!("{err}");
        assert!(msg.contains("2000"));
        assert!(msg.contains("1024"));
    }

    #[test]
    fn test_engine_error_from_conversion() {
        let err = DeviceError::from(HashError::AllocationFailure { requested: 64 });
        assert!(matches!(err, DeviceError::Engine(_)));
        assert!(format!("{err}").contains("allocation failed"));
    }

    #[test]
    fn test_invalid_capacity_display() {
        let err = ConfigError::InvalidCapacity {
            capacity: 0,
            max: 1024,
        };
        assert!(format!("{err}").contains("1..=1024"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "device.yaml missing");
        let err = ConfigError::from(io_err);
        assert!(format!("{err}").contains("device.yaml missing"));
    }
}
