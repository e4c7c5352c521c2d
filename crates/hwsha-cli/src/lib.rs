//! # hwsha-cli — SHA-256 Engine Command-Line Interface
//!
//! ## Subcommands
//!
//! - `hash` — digest a string, file, hex input, or stdin with the engine
//! - `device` — push one line through the register device the way the
//!   user-space test program did, and print the digest read back
//! - `selftest` — known-answer vectors through engine and device
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live here so they can be
//!   unit tested with in-memory readers and writers.
//! - Handlers return `anyhow::Result<u8>`, the process exit code on success.

use std::path::Path;

use anyhow::{Context, Result};

use hwsha_device::DeviceConfig;

pub mod device;
pub mod hash;
pub mod selftest;

/// Load the device configuration from `path`, or the defaults if absent.
pub fn load_config(path: Option<&Path>) -> Result<DeviceConfig> {
    match path {
        Some(p) => DeviceConfig::load(p)
            .with_context(|| format!("failed to load device config from {}", p.display())),
        None => Ok(DeviceConfig::default()),
    }
}
