//! # Device Configuration
//!
//! Tunable parameters of the register device, loadable from YAML:
//!
//! ```yaml
//! input_capacity: 512
//! device_id: 0xFEEDCAFE
//! base_address: 0x4000000
//! ```
//!
//! Every field is optional; omitted fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::registers::{DEVICE_ID, INPUT_BUFFER_SIZE};

/// Physical base address the driver maps the window at.
pub const DEFAULT_BASE_ADDRESS: u64 = 0x0400_0000;

/// Register device configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceConfig {
    /// Largest message accepted, in bytes. At most the window size.
    pub input_capacity: usize,
    /// Value returned by the ID register.
    pub device_id: u32,
    /// Physical base address of the MMIO window. Informational only.
    pub base_address: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            input_capacity: INPUT_BUFFER_SIZE,
            device_id: DEVICE_ID,
            base_address: DEFAULT_BASE_ADDRESS,
        }
    }
}

impl DeviceConfig {
    /// Check field ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_capacity == 0 || self.input_capacity > INPUT_BUFFER_SIZE {
            return Err(ConfigError::InvalidCapacity {
                capacity: self.input_capacity,
                max: INPUT_BUFFER_SIZE,
            });
        }
        Ok(())
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml)?;
        tracing::debug!(path = %path.display(), ?config, "loaded device config");
        Ok(config)
    }
}
