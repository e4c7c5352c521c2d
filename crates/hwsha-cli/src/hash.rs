//! # Hash Subcommand
//!
//! Digest one input with the software engine.
//!
//! ```bash
//! hwsha hash abc
//! hwsha hash --file firmware.bin --json
//! hwsha hash --hex 610062
//! echo -n abc | hwsha hash
//! ```

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use hwsha_core::{sha256, Digest};

/// Arguments for the hash subcommand.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Text to hash (UTF-8 bytes, no trailing newline).
    pub text: Option<String>,

    /// Hash the contents of a file.
    #[arg(long, conflicts_with_all = ["text", "hex"])]
    pub file: Option<PathBuf>,

    /// Hash hex-encoded bytes.
    #[arg(long, conflicts_with = "text")]
    pub hex: Option<String>,

    /// Print a JSON report instead of the bare digest.
    #[arg(long)]
    pub json: bool,
}

/// JSON output of `hwsha hash --json`.
#[derive(Debug, Serialize)]
pub struct HashReport {
    /// Always `"sha256"`.
    pub algorithm: &'static str,
    /// Input length in bytes.
    pub length: usize,
    /// The digest, lowercase hex.
    pub digest: Digest,
}

/// Execute the hash subcommand against the process stdin/stdout.
pub fn run_hash(args: &HashArgs) -> Result<u8> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    hash_with_io(args, &mut stdin.lock(), &mut stdout.lock())
}

/// Execute the hash subcommand with explicit I/O.
pub fn hash_with_io(args: &HashArgs, input: &mut dyn Read, out: &mut dyn Write) -> Result<u8> {
    let message = read_message(args, input)?;
    let digest = sha256(&message).context("sha256 computation failed")?;
    tracing::info!(length = message.len(), %digest, "hashed input");

    if args.json {
        let report = HashReport {
            algorithm: "sha256",
            length: message.len(),
            digest,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{digest}")?;
    }
    Ok(0)
}

fn read_message(args: &HashArgs, input: &mut dyn Read) -> Result<Vec<u8>> {
    if let Some(path) = &args.file {
        return std::fs::read(path).with_context(|| format!("failed to read {}", path.display()));
    }
    if let Some(hex) = &args.hex {
        return decode_hex(hex);
    }
    if let Some(text) = &args.text {
        return Ok(text.as_bytes().to_vec());
    }
    let mut buf = Vec::new();
    input.read_to_end(&mut buf).context("failed to read stdin")?;
    Ok(buf)
}

/// Decode a hex string (whitespace ignored) into bytes.
pub fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = hex.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        bail!("hex input has odd length {}", digits.len());
    }
    digits
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let hi = hex_value(pair[0]);
            let lo = hex_value(pair[1]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => bail!("invalid hex digit near offset {}", i * 2),
            }
        })
        .collect()
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
