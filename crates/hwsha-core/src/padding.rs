//! # Message Padding
//!
//! Encodes a message into a [`PaddedBlock`]:
//!
//! ```text
//! | message (L bytes) | 0x80 | 0x00 ... 0x00 | L*8 as u64 big-endian |
//! ```
//!
//! The total length is the smallest multiple of 64 bytes (512 bits) with room
//! for the message, the stop bit, and the 8-byte length field. When the stop
//! byte leaves fewer than 8 bytes in the final 64-byte block, the padding
//! spills into one extra block.

use crate::chunk::{Chunks, CHUNK_SIZE};
use crate::error::HashError;

/// Size of the trailing bit-length field in bytes.
const LENGTH_FIELD_SIZE: usize = 8;

/// The stop byte: a single `1` bit followed by seven `0` bits.
const STOP_BYTE: u8 = 0x80;

/// Compute the padded length in bytes for a message of `len` bytes.
///
/// Returns `None` if the result would overflow `usize`.
pub fn padded_len(len: usize) -> Option<usize> {
    // len + 1 (stop byte) + 8 (length field), rounded up to a multiple of 64.
    let blocks = len.checked_add(LENGTH_FIELD_SIZE)? / CHUNK_SIZE + 1;
    blocks.checked_mul(CHUNK_SIZE)
}

/// A message after SHA-256 padding.
///
/// # Invariants
///
/// - `len() % 64 == 0` and `len() >= message_len + 9`.
/// - The byte after the message is `0x80`; the remaining padding is zero.
/// - The final 8 bytes hold `message_len * 8` as a big-endian `u64`.
///
/// The buffer is private; the only constructor is [`PaddedBlock::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedBlock {
    bytes: Vec<u8>,
    message_len: usize,
}

impl PaddedBlock {
    /// Pad `message` into a new block.
    ///
    /// # Errors
    ///
    /// - [`HashError::MessageTooLong`] if `message.len() * 8` does not fit
    ///   in a `u64` or the padded length overflows.
    /// - [`HashError::AllocationFailure`] if the buffer cannot be reserved.
    pub fn encode(message: &[u8]) -> Result<Self, HashError> {
        let len = message.len();
        let too_long = || HashError::MessageTooLong { len };

        let bit_len = u64::try_from(len)
            .ok()
            .and_then(|l| l.checked_mul(8))
            .ok_or_else(too_long)?;
        let total = padded_len(len).ok_or_else(too_long)?;

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(total)
            .map_err(|_| HashError::AllocationFailure { requested: total })?;
        bytes.extend_from_slice(message);
        bytes.push(STOP_BYTE);
        bytes.resize(total - LENGTH_FIELD_SIZE, 0);
        bytes.extend_from_slice(&bit_len.to_be_bytes());

        tracing::trace!(message_len = len, padded_len = total, "padded message");

        Ok(Self {
            bytes,
            message_len: len,
        })
    }

    /// The padded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the padded block in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`: even the empty message pads to one full chunk.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Length of the original message in bytes.
    pub fn message_len(&self) -> usize {
        self.message_len
    }

    /// The bit length recorded in the trailing length field.
    pub fn encoded_bit_len(&self) -> u64 {
        let mut field = [0u8; LENGTH_FIELD_SIZE];
        if let Some(tail) = self
            .bytes
            .len()
            .checked_sub(LENGTH_FIELD_SIZE)
            .and_then(|start| self.bytes.get(start..))
        {
            field.copy_from_slice(tail);
        }
        u64::from_be_bytes(field)
    }

    /// Partition the block into 64-byte chunks.
    pub fn chunks(&self) -> Result<Chunks<'_>, HashError> {
        Chunks::new(&self.bytes)
    }
}
