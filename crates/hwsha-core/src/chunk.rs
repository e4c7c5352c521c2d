//! # Chunking
//!
//! Partitions a padded block into 64-byte chunks. Chunks are views into the
//! one contiguous padded buffer, addressed by index at a fixed stride; no
//! chunk is copied or separately allocated.

use crate::error::HashError;

/// Size of one SHA-256 chunk (message block) in bytes.
pub const CHUNK_SIZE: usize = 64;

/// Index-addressed view of a padded block as a sequence of 64-byte chunks.
///
/// # Invariants
///
/// The underlying slice length is a multiple of [`CHUNK_SIZE`]. This is
/// checked once in [`Chunks::new`], so [`Chunks::get`] succeeds for every
/// index below [`Chunks::len`].
#[derive(Debug, Clone, Copy)]
pub struct Chunks<'a> {
    bytes: &'a [u8],
}

impl<'a> Chunks<'a> {
    /// Wrap a padded buffer.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvariantViolation`] if the length is not a
    /// multiple of 64. The encoder never produces such a buffer, so this
    /// signals an engine defect rather than bad caller input.
    pub fn new(bytes: &'a [u8]) -> Result<Self, HashError> {
        if bytes.len() % CHUNK_SIZE != 0 {
            return Err(HashError::InvariantViolation(format!(
                "padded block length {} is not a multiple of {CHUNK_SIZE}",
                bytes.len()
            )));
        }
        Ok(Self { bytes })
    }

    /// Number of chunks.
    pub fn len(&self) -> usize {
        self.bytes.len() / CHUNK_SIZE
    }

    /// Whether there are no chunks.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The chunk at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&'a [u8; CHUNK_SIZE]> {
        let start = index.checked_mul(CHUNK_SIZE)?;
        let end = start.checked_add(CHUNK_SIZE)?;
        self.bytes.get(start..end)?.try_into().ok()
    }

    /// Iterate over the chunks in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a [u8; CHUNK_SIZE]> + 'a {
        let chunks = *self;
        (0..chunks.len()).filter_map(move |i| chunks.get(i))
    }
}
