//! # Device Subcommand
//!
//! Interactive round trip through the register device: read one line,
//! stage it through the driver, trigger, and print the digest read back
//! from the output window.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use hwsha_device::{DeviceConfig, Driver, Sha256Device};

/// Arguments for the device subcommand.
#[derive(Args, Debug)]
pub struct DeviceArgs {
    /// Text to hash. Prompts on stdin when omitted.
    pub text: Option<String>,
}

/// Execute the device subcommand against the process stdin/stdout.
pub fn run_device(args: &DeviceArgs, config: &DeviceConfig) -> Result<u8> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    device_with_io(args, config, &mut stdin.lock(), &mut stdout.lock())
}

/// Execute the device subcommand with explicit I/O.
pub fn device_with_io(
    args: &DeviceArgs,
    config: &DeviceConfig,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<u8> {
    let message = match &args.text {
        Some(text) => text.as_bytes().to_vec(),
        None => {
            write!(out, "Enter string to hash: ")?;
            out.flush()?;
            read_line(input)?
        }
    };

    let device = Arc::new(Sha256Device::new(config.clone()).context("invalid device config")?);
    let driver = Driver::new(device);

    driver
        .hash(&message)
        .context("failed to perform hash request")?;
    let digest = driver
        .read_digest()
        .context("failed to read hash result from device")?;

    writeln!(out, "SHA256 Hash read with the user program: {digest}")?;
    Ok(0)
}

/// Read one line as raw bytes, dropping the line terminator.
fn read_line(input: &mut dyn BufRead) -> Result<Vec<u8>> {
    let mut line = Vec::new();
    input
        .read_until(b'\n', &mut line)
        .context("error reading input")?;
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(line)
}
