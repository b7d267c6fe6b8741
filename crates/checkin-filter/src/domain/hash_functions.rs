//! Index generation for the membership filter
//!
//! One SHA-256 digest per item, split into two 128-bit halves, expanded into
//! `k` positions with double hashing: `pos(i) = (h1 + i * h2) mod m`.
//!
//! The positions are produced incrementally as `pos(i+1) = (pos(i) + h2) mod m`
//! on values already reduced mod `m`, which gives exactly the same sequence as
//! evaluating the formula with unbounded integers.

use std::iter::FusedIterator;

use sha2::{Digest, Sha256};

/// Split the SHA-256 digest of `bytes` into `(h1, h2)`
///
/// `h1` is the high half and `h2` the low half, both big-endian. A zero `h2`
/// is replaced by 1 so successive rounds never collapse onto one index.
pub fn digest_halves(bytes: &[u8]) -> (u128, u128) {
    let digest = Sha256::digest(bytes);

    let mut high = [0u8; 16];
    let mut low = [0u8; 16];
    high.copy_from_slice(&digest[..16]);
    low.copy_from_slice(&digest[16..]);

    let h1 = u128::from_be_bytes(high);
    let h2 = u128::from_be_bytes(low).max(1);
    (h1, h2)
}

/// Lazy, restartable sequence of bit positions for one item
///
/// Yields exactly `rounds` positions, each in `[0, bit_count)`.
#[derive(Clone, Debug)]
pub struct IndexPositions {
    next: u128,
    step: u128,
    modulus: u128,
    remaining: usize,
}

impl IndexPositions {
    /// Positions for `bytes` in a filter of `bit_count` bits and `rounds` rounds
    ///
    /// # Panics
    /// Panics if `bit_count` is zero. Filters never construct one.
    pub fn new(bytes: &[u8], rounds: usize, bit_count: usize) -> Self {
        let (h1, h2) = digest_halves(bytes);
        Self::from_halves(h1, h2, rounds, bit_count)
    }

    /// Positions for an already computed digest pair
    ///
    /// # Panics
    /// Panics if `bit_count` is zero.
    pub fn from_halves(h1: u128, h2: u128, rounds: usize, bit_count: usize) -> Self {
        assert!(bit_count > 0, "bit_count must be non-zero");
        let modulus = bit_count as u128;
        Self {
            next: h1 % modulus,
            step: h2 % modulus,
            modulus,
            remaining: rounds,
        }
    }
}

impl Iterator for IndexPositions {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let pos = self.next;
        // Both operands are < modulus <= usize::MAX, so the sum fits in u128.
        self.next = (self.next + self.step) % self.modulus;
        Some(pos as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IndexPositions {}

impl FusedIterator for IndexPositions {}
