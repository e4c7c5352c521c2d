//! # Self Test
//!
//! Runs known-answer vectors through both the engine and the register
//! device and reports each result.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};

use hwsha_core::sha256;
use hwsha_device::{DeviceConfig, Driver, Sha256Device};

/// (label, message, expected hex digest)
const VECTORS: &[(&str, &[u8], &str)] = &[
    (
        "empty",
        b"",
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    ),
    (
        "abc",
        b"abc",
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
    ),
    (
        "two-block",
        b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
        "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1",
    ),
    (
        "fox",
        b"The quick brown fox jumps over the lazy dog",
        "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592",
    ),
];

/// Execute the selftest subcommand against the process stdout.
pub fn run_selftest(config: &DeviceConfig) -> Result<u8> {
    let stdout = std::io::stdout();
    selftest_with_io(config, &mut stdout.lock())
}

/// Execute the selftest subcommand with explicit output.
///
/// Returns exit code 0 if every vector passes on both paths, 1 otherwise.
/// Vectors longer than the configured device capacity are skipped on the
/// device path.
pub fn selftest_with_io(config: &DeviceConfig, out: &mut dyn Write) -> Result<u8> {
    let device = Arc::new(Sha256Device::new(config.clone()).context("invalid device config")?);
    let driver = Driver::new(device);
    let mut failures = 0usize;

    for (label, message, expected) in VECTORS {
        let engine = sha256(message)?.to_hex();
        let engine_ok = engine == *expected;

        let device_status = if message.len() > driver.device().capacity() {
            "SKIP"
        } else if driver.digest(message)?.to_hex() == *expected {
            "PASS"
        } else {
            failures += 1;
            "FAIL"
        };
        if !engine_ok {
            failures += 1;
        }

        writeln!(
            out,
            "{label:<10} engine {} device {device_status}",
            if engine_ok { "PASS" } else { "FAIL" }
        )?;
    }

    if failures == 0 {
        tracing::info!(vectors = VECTORS.len(), "self test passed");
        Ok(0)
    } else {
        tracing::error!(failures, "self test failed");
        Ok(1)
    }
}
