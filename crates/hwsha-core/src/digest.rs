//! # Digest Aggregation
//!
//! Drives padding, chunking, schedule expansion, and compression across a
//! whole message and emits the 32-byte [`Digest`].
//!
//! Each call to [`sha256`] owns its padded block and hash state for its own
//! duration and returns the digest by value. Nothing is cached between
//! calls, so two unrelated computations can never observe each other.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::compress::HashState;
use crate::error::HashError;
use crate::padding::PaddedBlock;
use crate::schedule::MessageSchedule;

/// Size of a SHA-256 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// A SHA-256 digest: the final hash state as 8 big-endian words.
///
/// Serializes as a 64-character lowercase hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build a digest from 8 state words, each serialized big-endian.
    pub fn from_words(words: [u32; 8]) -> Self {
        let mut bytes = [0u8; DIGEST_SIZE];
        for (out, word) in bytes.chunks_exact_mut(4).zip(words) {
            out.copy_from_slice(&word.to_be_bytes());
        }
        Self(bytes)
    }

    /// The raw 32 digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// The digest as 8 big-endian words.
    pub fn words(&self) -> [u32; 8] {
        let mut words = [0u32; 8];
        for (word, bytes) in words.iter_mut().zip(self.0.chunks_exact(4)) {
            *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        words
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, ParseDigestError> {
        let hex = hex.trim();
        if hex.len() != DIGEST_SIZE * 2 {
            return Err(ParseDigestError::Length(hex.len()));
        }
        if let Some(pos) = hex.bytes().position(|b| !b.is_ascii_hexdigit()) {
            return Err(ParseDigestError::Character(pos));
        }
        let mut bytes = [0u8; DIGEST_SIZE];
        for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
            let s = std::str::from_utf8(pair).map_err(|_| ParseDigestError::Character(i * 2))?;
            bytes[i] = u8::from_str_radix(s, 16).map_err(|_| ParseDigestError::Character(i * 2))?;
        }
        Ok(Self(bytes))
    }
}

impl From<HashState> for Digest {
    fn from(state: HashState) -> Self {
        Self::from_words(state.words())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Error parsing a hex digest.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDigestError {
    /// Wrong number of hex characters.
    #[error("expected 64 hex chars, got {0}")]
    Length(usize),

    /// A non-hex character.
    #[error("invalid hex character at offset {0}")]
    Character(usize),
}

/// Compute the SHA-256 digest of `message`.
///
/// # Errors
///
/// - [`HashError::AllocationFailure`] if the padded block cannot be
///   allocated. No digest is produced.
/// - [`HashError::MessageTooLong`] if the bit length overflows `u64`.
/// - [`HashError::InvariantViolation`] only on an engine defect.
pub fn sha256(message: &[u8]) -> Result<Digest, HashError> {
    let block = PaddedBlock::encode(message)?;
    let chunks = block.chunks()?;

    let mut state = HashState::new();
    for chunk in chunks.iter() {
        state.compress(&MessageSchedule::expand(chunk));
    }

    let digest = Digest::from(state);
    tracing::debug!(
        message_len = message.len(),
        chunks = chunks.len(),
        digest = %digest,
        "sha256 complete"
    );
    Ok(digest)
}

/// Compute the SHA-256 digest of `message` as a lowercase hex string.
///
/// Convenience wrapper around [`sha256()`].
pub fn sha256_hex(message: &[u8]) -> Result<String, HashError> {
    sha256(message).map(|d| d.to_hex())
}
