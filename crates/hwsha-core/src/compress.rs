//! # Compression Function
//!
//! Folds one chunk's [`MessageSchedule`] into the running [`HashState`].
//!
//! ## Algorithm
//!
//! Eight working registers `a..h` start from the current state. Each of the
//! 64 rounds computes
//!
//! ```text
//! T1 = h + Σ1(e) + Ch(e, f, g) + K[i] + w[i]
//! T2 = Σ0(a) + Maj(a, b, c)
//! ```
//!
//! then shifts the registers down by one, injecting `T1` into `e` and
//! `T1 + T2` into `a`. After the last round the working registers are added
//! back into the state (Davies–Meyer feed-forward). All arithmetic is
//! modulo 2^32.

use crate::schedule::MessageSchedule;

/// Initial hash value: the first 32 bits of the fractional parts of the
/// square roots of the first 8 primes.
pub const INITIAL_STATE: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Round constants: the first 32 bits of the fractional parts of the cube
/// roots of the first 64 primes.
pub const ROUND_CONSTANTS: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

#[inline]
fn big_sigma0(a: u32) -> u32 {
    a.rotate_right(2) ^ a.rotate_right(13) ^ a.rotate_right(22)
}

#[inline]
fn big_sigma1(e: u32) -> u32 {
    e.rotate_right(6) ^ e.rotate_right(11) ^ e.rotate_right(25)
}

#[inline]
fn choose(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ (!e & g)
}

#[inline]
fn majority(a: u32, b: u32, c: u32) -> u32 {
    (a & b) ^ (a & c) ^ (b & c)
}

/// The running 8-word hash state.
///
/// Owned by exactly one digest computation. Starts at [`INITIAL_STATE`] and
/// is updated once per chunk by [`HashState::compress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashState([u32; 8]);

impl HashState {
    /// A fresh state holding the SHA-256 initial hash value.
    pub fn new() -> Self {
        Self(INITIAL_STATE)
    }

    /// Run the 64 compression rounds over `schedule` and feed the result
    /// forward into this state.
    pub fn compress(&mut self, schedule: &MessageSchedule) {
        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = self.0;

        for (&k, &w) in ROUND_CONSTANTS.iter().zip(schedule.words().iter()) {
            let t1 = h
                .wrapping_add(big_sigma1(e))
                .wrapping_add(choose(e, f, g))
                .wrapping_add(k)
                .wrapping_add(w);
            let t2 = big_sigma0(a).wrapping_add(majority(a, b, c));

            h = g;
            g = f;
            f = e;
            e = d.wrapping_add(t1);
            d = c;
            c = b;
            b = a;
            a = t1.wrapping_add(t2);
        }

        for (word, working) in self.0.iter_mut().zip([a, b, c, d, e, f, g, h]) {
            *word = word.wrapping_add(working);
        }
    }

    /// The eight state words.
    pub fn words(&self) -> [u32; 8] {
        self.0
    }
}

impl Default for HashState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padding::PaddedBlock;

    #[test]
    fn test_new_state_is_initial_value() {
        assert_eq!(HashState::new().words(), INITIAL_STATE);
        assert_eq!(HashState::default(), HashState::new());
    }

    #[test]
    fn test_choose_and_majority() {
        // Ch picks f where e is set, g where e is clear.
        assert_eq!(choose(0xffff_0000, 0x1234_5678, 0x9abc_def0), 0x1234_def0);
        assert_eq!(majority(0b110, 0b101, 0b011), 0b111);
        assert_eq!(majority(0b100, 0b010, 0b001), 0);
    }

    #[test]
    fn test_compress_abc_block() {
        let block = PaddedBlock::encode(b"abc").unwrap();
        let chunks = block.chunks().unwrap();
        let mut state = HashState::new();
        state.compress(&MessageSchedule::expand(chunks.get(0).unwrap()));
        assert_eq!(
            state.words(),
            [
                0xba7816bf, 0x8f01cfea, 0x414140de, 0x5dae2223, 0xb00361a3, 0x96177a9c, 0xb410ff61,
                0xf20015ad,
            ]
        );
    }

    #[test]
    fn test_compress_changes_state() {
        let schedule = MessageSchedule::expand(&[0u8; 64]);
        let mut state = HashState::new();
        state.compress(&schedule);
        assert_ne!(state.words(), INITIAL_STATE);
    }

    #[test]
    fn test_round_constant_endpoints() {
        assert_eq!(ROUND_CONSTANTS[0], 0x428a2f98);
        assert_eq!(ROUND_CONSTANTS[63], 0xc67178f2);
        assert_eq!(ROUND_CONSTANTS.len(), 64);
    }
}
