//! # Message Schedule
//!
//! Expands one 64-byte chunk into the 64 working words consumed by the
//! compression rounds. The first 16 words are the chunk read as big-endian
//! `u32`s; each later word mixes four earlier ones:
//!
//! ```text
//! σ0(x) = rotr(x, 7) ^ rotr(x, 18) ^ (x >> 3)
//! σ1(x) = rotr(x, 17) ^ rotr(x, 19) ^ (x >> 10)
//! w[i]  = w[i-16] + σ0(w[i-15]) + w[i-7] + σ1(w[i-2])   (mod 2^32)
//! ```

use crate::chunk::CHUNK_SIZE;

/// Number of words in a message schedule (one per compression round).
pub const SCHEDULE_LEN: usize = 64;

#[inline]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// The 64-word schedule derived from one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSchedule([u32; SCHEDULE_LEN]);

impl MessageSchedule {
    /// Expand a chunk into its message schedule.
    pub fn expand(chunk: &[u8; CHUNK_SIZE]) -> Self {
        let mut w = [0u32; SCHEDULE_LEN];

        for (word, bytes) in w.iter_mut().zip(chunk.chunks_exact(4)) {
            *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }

        for i in 16..SCHEDULE_LEN {
            w[i] = w[i - 16]
                .wrapping_add(small_sigma0(w[i - 15]))
                .wrapping_add(w[i - 7])
                .wrapping_add(small_sigma1(w[i - 2]));
        }

        Self(w)
    }

    /// The schedule words.
    pub fn words(&self) -> &[u32; SCHEDULE_LEN] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padding::PaddedBlock;

    fn abc_schedule() -> MessageSchedule {
        let block = PaddedBlock::encode(b"abc").unwrap();
        let chunks = block.chunks().unwrap();
        MessageSchedule::expand(chunks.get(0).unwrap())
    }

    #[test]
    fn test_first_words_are_big_endian() {
        let w = abc_schedule();
        assert_eq!(w.words()[0], 0x6162_6380);
        assert!(w.words()[1..15].iter().all(|&x| x == 0));
        assert_eq!(w.words()[15], 0x0000_0018);
    }

    #[test]
    fn test_expanded_words_for_abc() {
        // Intermediate schedule words for the one-block "abc" message.
        let w = abc_schedule();
        assert_eq!(w.words()[16], 0x6162_6380);
        assert_eq!(w.words()[17], 0x000f_0000);
        assert_eq!(w.words()[63], 0x12b1_edeb);
    }

    #[test]
    fn test_sigma_functions() {
        assert_eq!(small_sigma0(0), 0);
        assert_eq!(small_sigma1(0), 0);
        // Bit 0 survives only the two rotations; the shift drops it.
        assert_eq!(small_sigma0(1), (1 << 25) | (1 << 14));
        assert_eq!(small_sigma1(1), (1 << 15) | (1 << 13));
    }

    #[test]
    fn test_additions_wrap() {
        let chunk = [0xffu8; CHUNK_SIZE];
        let w = MessageSchedule::expand(&chunk);
        // 0xffffffff + σ0(0xffffffff) + 0xffffffff + σ1(0xffffffff), mod 2^32.
        let all = u32::MAX;
        let expected = all
            .wrapping_add(small_sigma0(all))
            .wrapping_add(all)
            .wrapping_add(small_sigma1(all));
        assert_eq!(w.words()[16], expected);
    }
}
