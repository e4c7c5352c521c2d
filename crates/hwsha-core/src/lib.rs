//! # hwsha-core — SHA-256 Engine
//!
//! A from-scratch implementation of the SHA-256 message digest (FIPS 180-4).
//! The engine is deliberately split into the same stages the standard
//! describes, each in its own module:
//!
//! 1. [`padding`] — encodes the message into a padded block whose length is a
//!    multiple of 64 bytes, ending with the 64-bit big-endian bit length.
//! 2. [`chunk`] — partitions the padded block into 64-byte chunks, addressed
//!    by index over one contiguous buffer.
//! 3. [`schedule`] — expands a chunk into the 64-word message schedule.
//! 4. [`compress`] — the 64-round compression function with Davies–Meyer
//!    feed-forward into the running [`HashState`].
//! 5. [`digest`] — drives the stages across all chunks and emits a [`Digest`].
//!
//! ## Usage
//!
//! ```
//! let digest = hwsha_core::sha256(b"abc").unwrap();
//! assert_eq!(
//!     digest.to_hex(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! ```
//!
//! ## Crate Policy
//!
//! - No global mutable state. Every computation owns its padded buffer and
//!   hash state; the digest is returned by value.
//! - Input is always an explicit-length slice. Bytes are hashed with full
//!   binary fidelity, including embedded `0x00`.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests. Allocation failure and
//!   internal invariant violations surface as [`HashError`].

#![forbid(unsafe_code)]

pub mod chunk;
pub mod compress;
pub mod digest;
pub mod error;
pub mod padding;
pub mod schedule;

// Re-export primary types for ergonomic imports.
pub use chunk::{Chunks, CHUNK_SIZE};
pub use compress::{HashState, INITIAL_STATE, ROUND_CONSTANTS};
pub use digest::{sha256, sha256_hex, Digest, ParseDigestError, DIGEST_SIZE};
pub use error::HashError;
pub use padding::{padded_len, PaddedBlock};
pub use schedule::MessageSchedule;
