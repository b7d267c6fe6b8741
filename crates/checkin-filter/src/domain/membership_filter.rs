//! Add-only Bloom filter with a check-in-and-sign primitive
//!
//! INVARIANTS:
//! - `bit_count` and `hash_rounds` are fixed at construction, `hash_rounds >= 1`
//! - Bits only ever go from 0 to 1; nothing clears them
//! - No false negatives: after `insert(x)`, `might_contain(x)` is always true

use std::fmt;

use bitvec::prelude::*;

use super::config::FilterConfig;
use super::hash_functions::IndexPositions;
use super::item::Item;
use super::parameters::{calculate_fpr, derive_parameters};
use crate::error::FilterError;

/// Bloom filter for "has this item been seen before?" queries
///
/// The bit buffer is `ceil(bit_count / 8)` bytes; bit `i` lives in byte
/// `i / 8` at position `i % 8`, least significant bit first.
///
/// The filter is single-writer. Share it between threads through
/// [`CheckInService`](crate::service::CheckInService), which holds one lock
/// across the whole check-then-set sequence.
#[derive(Clone)]
pub struct MembershipFilter {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Design capacity (n)
    expected_items: u64,
    /// Design false positive rate (p)
    target_fpr: f64,
    /// Number of index rounds (k)
    hash_rounds: usize,
    /// Inserts that set at least one new bit
    items_recorded: u64,
}

impl MembershipFilter {
    /// Create a filter sized for `expected_items` at `target_fpr`
    ///
    /// # Errors
    /// `InvalidParameters` if `expected_items <= 0`, if `target_fpr` is not
    /// strictly between 0 and 1, or if the bit buffer cannot be allocated.
    pub fn new(expected_items: i64, target_fpr: f64) -> Result<Self, FilterError> {
        let params = derive_parameters(expected_items, target_fpr)?;

        let mut raw = Vec::<u8>::new();
        raw.try_reserve_exact(params.byte_len()).map_err(|_| {
            FilterError::invalid(expected_items, target_fpr, "bit array could not be allocated")
        })?;
        raw.resize(params.byte_len(), 0);

        let mut bits = BitVec::<u8, Lsb0>::from_vec(raw);
        bits.truncate(params.bit_count);

        Ok(Self {
            bits,
            expected_items: expected_items as u64,
            target_fpr,
            hash_rounds: params.hash_rounds,
            items_recorded: 0,
        })
    }

    /// Create a filter from a configuration
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        let expected_items = i64::try_from(config.expected_items).map_err(|_| {
            FilterError::invalid(i64::MAX, config.target_fpr, "expected_items is too large")
        })?;
        Self::new(expected_items, config.target_fpr)
    }

    /// Bit positions touched by `item`, in round order
    pub fn index_positions<'a>(&self, item: impl Into<Item<'a>>) -> IndexPositions {
        let item = item.into();
        IndexPositions::new(item.as_bytes(), self.hash_rounds, self.bits.len())
    }

    /// Record an item
    ///
    /// After insertion, `might_contain(item)` is guaranteed to return true.
    pub fn insert<'a>(&mut self, item: impl Into<Item<'a>>) {
        let mut flipped = false;
        for pos in self.index_positions(item) {
            flipped |= !self.bits.replace(pos, true);
        }
        if flipped {
            self.items_recorded += 1;
        }
    }

    /// Test if an item might have been recorded
    ///
    /// Returns:
    /// - `true` if the item might be in the set (could be a false positive)
    /// - `false` if the item is definitely NOT in the set (never a false negative)
    pub fn might_contain<'a>(&self, item: impl Into<Item<'a>>) -> bool {
        self.index_positions(item).all(|pos| self.bits[pos])
    }

    /// Admit an item the first time it is seen
    ///
    /// Returns `true` when the item was not present and has now been
    /// recorded, `false` when it was already present (or collided with
    /// recorded items). Repeated calls with the same item return `true` at
    /// most once.
    pub fn check_in_and_sign<'a>(&mut self, item: impl Into<Item<'a>>) -> bool {
        let item = item.into();
        if self.might_contain(&item) {
            return false;
        }
        self.insert(&item);
        true
    }

    /// Design capacity
    pub fn expected_items(&self) -> u64 {
        self.expected_items
    }

    /// Design false positive rate
    pub fn target_fpr(&self) -> f64 {
        self.target_fpr
    }

    /// Number of addressable bits (m)
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// Number of index rounds per item (k)
    pub fn hash_rounds(&self) -> usize {
        self.hash_rounds
    }

    /// Size of the bit buffer in bytes
    pub fn byte_len(&self) -> usize {
        self.bits.as_raw_slice().len()
    }

    /// Number of bits currently set
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of inserts that changed the buffer
    pub fn items_recorded(&self) -> u64 {
        self.items_recorded
    }

    /// False positive rate estimated from the items recorded so far
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    pub fn estimated_fpr(&self) -> f64 {
        calculate_fpr(self.bit_count(), self.items_recorded, self.hash_rounds)
    }

    /// Raw view of the bit buffer
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }
}

impl fmt::Debug for MembershipFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembershipFilter")
            .field("expected_items", &self.expected_items)
            .field("target_fpr", &self.target_fpr)
            .field("bit_count", &self.bit_count())
            .field("hash_rounds", &self.hash_rounds)
            .field("bits_set", &self.bits_set())
            .field("items_recorded", &self.items_recorded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_valid_filter() {
        let filter = MembershipFilter::new(100, 0.01).unwrap();

        assert_eq!(filter.bit_count(), 959);
        assert_eq!(filter.hash_rounds(), 7);
        assert_eq!(filter.byte_len(), 120);
        assert_eq!(filter.expected_items(), 100);
        assert_eq!(filter.target_fpr(), 0.01);
        assert_eq!(filter.bits_set(), 0, "All bits should be zero initially");
        assert!(filter.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_rejects_invalid_parameters() {
        for (n, p) in [(0, 0.01), (-5, 0.01), (100, 0.0), (100, 1.0), (100, 1.5)] {
            let result = MembershipFilter::new(n, p);
            assert!(
                matches!(result, Err(FilterError::InvalidParameters { .. })),
                "new({}, {}) should fail",
                n,
                p
            );
        }
    }

    #[test]
    fn test_unallocatable_filter_is_rejected() {
        // ~1.2 PB of bits: addressable by the bit index, larger than any heap
        let result = MembershipFilter::new(10_i64.pow(15), 0.01);

        match result {
            Err(FilterError::InvalidParameters { reason, .. }) => {
                assert_eq!(reason, "bit array could not be allocated");
            }
            other => panic!("expected InvalidParameters, got {:?}", other.map(|f| f.bit_count())),
        }
    }

    #[test]
    fn test_odd_bit_count_keeps_exact_length() {
        let filter = MembershipFilter::new(100, 0.01).unwrap();
        assert_eq!(filter.bit_count(), 959);
        assert_eq!(filter.as_bytes().len(), 959usize.div_ceil(8));
    }

    #[test]
    fn test_insert_sets_bits() {
        let mut filter = MembershipFilter::new(100, 0.01).unwrap();

        filter.insert("test_element_0xABCD1234");

        assert!(filter.bits_set() > 0, "After insert, some bits should be set");
        assert!(
            filter.bits_set() <= filter.hash_rounds(),
            "At most k bits should be set for one element"
        );
        assert_eq!(filter.items_recorded(), 1);
    }

    #[test]
    fn test_reinsert_changes_nothing() {
        let mut filter = MembershipFilter::new(100, 0.01).unwrap();
        filter.insert("alice");
        let snapshot = filter.as_bytes().to_vec();

        filter.insert("alice");

        assert_eq!(filter.as_bytes(), snapshot.as_slice());
        assert_eq!(filter.items_recorded(), 1);
    }

    #[test]
    fn test_bit_layout_is_lsb_first() {
        // "alice" lands on 250, 264, 278, 292, 306, 320, 334 in a 959-bit filter
        let mut filter = MembershipFilter::new(100, 0.01).unwrap();
        filter.insert("alice");

        let mut expected = vec![0u8; 120];
        for idx in [250usize, 264, 278, 292, 306, 320, 334] {
            expected[idx / 8] |= 1 << (idx % 8);
        }
        assert_eq!(filter.as_bytes(), expected.as_slice());
    }

    #[test]
    fn test_contains_after_insert() {
        let mut filter = MembershipFilter::new(100, 0.01).unwrap();
        filter.insert("0xABCD1234567890ABCDEF");

        assert!(filter.might_contain("0xABCD1234567890ABCDEF"));
        assert!(!filter.might_contain("never-inserted"));
    }

    #[test]
    fn test_no_false_negatives_bulk() {
        let mut filter = MembershipFilter::new(1000, 0.01).unwrap();
        let elements: Vec<String> = (0..1000).map(|i| format!("address_{:04x}", i)).collect();

        for elem in &elements {
            filter.insert(elem);
        }

        for elem in &elements {
            assert!(filter.might_contain(elem), "False negative for {}", elem);
        }
    }

    #[test]
    fn test_bits_are_monotonic() {
        let mut filter = MembershipFilter::new(50, 0.05).unwrap();
        let mut previous = filter.as_bytes().to_vec();

        for i in 0..200 {
            if i % 3 == 0 {
                filter.insert(format!("item-{}", i));
            } else {
                filter.check_in_and_sign(format!("item-{}", i / 2));
            }
            let current = filter.as_bytes();
            for (before, after) in previous.iter().zip(current) {
                assert_eq!(before & after, *before, "A set bit was cleared");
            }
            previous = current.to_vec();
        }
    }

    #[test]
    fn test_index_positions_deterministic() {
        let filter = MembershipFilter::new(100, 0.01).unwrap();

        let first: Vec<usize> = filter.index_positions("carol").collect();
        let second: Vec<usize> = filter.index_positions("carol").collect();

        assert_eq!(first, second);
        assert_eq!(first.len(), filter.hash_rounds());
        assert_eq!(
            filter.index_positions("abc").collect::<Vec<_>>(),
            vec![333, 49, 724, 440, 156, 831, 547]
        );
    }

    #[test]
    fn test_text_and_bytes_are_equivalent() {
        let mut filter = MembershipFilter::new(100, 0.01).unwrap();
        filter.insert("abc");

        assert!(filter.might_contain(b"abc"));
        assert!(filter.might_contain("abc".as_bytes()));
        assert!(filter.might_contain(vec![b'a', b'b', b'c']));
    }

    #[test]
    fn test_check_in_is_idempotent() {
        let mut filter = MembershipFilter::new(100, 0.01).unwrap();

        assert!(filter.check_in_and_sign("alice"));
        assert!(!filter.check_in_and_sign("alice"));
        assert!(filter.might_contain("alice"));
    }

    #[test]
    fn test_check_in_sequence() {
        let mut filter = MembershipFilter::new(100, 0.01).unwrap();

        assert!(filter.check_in_and_sign("u1"));
        assert!(filter.check_in_and_sign("u2"));
        assert!(!filter.check_in_and_sign("u1"));
        assert!(filter.check_in_and_sign("u3"));
        assert!(!filter.check_in_and_sign("u2"));
        assert_eq!(filter.items_recorded(), 3);
    }

    #[test]
    fn test_check_in_after_plain_insert() {
        let mut filter = MembershipFilter::new(100, 0.01).unwrap();
        filter.insert("dave");
        assert!(!filter.check_in_and_sign("dave"));
    }

    #[test]
    fn test_estimated_fpr_grows_with_items() {
        let mut filter = MembershipFilter::new(100, 0.01).unwrap();
        assert_eq!(filter.estimated_fpr(), 0.0);

        for i in 0..50 {
            filter.insert(format!("a{}", i));
        }
        let half = filter.estimated_fpr();
        for i in 50..100 {
            filter.insert(format!("a{}", i));
        }
        let full = filter.estimated_fpr();

        assert!(half > 0.0 && half < full);
        assert!(full <= 0.011, "Estimated FPR at capacity was {}", full);
    }

    #[test]
    fn test_from_config() {
        let config = FilterConfig {
            expected_items: 1000,
            target_fpr: 0.01,
        };
        let filter = MembershipFilter::from_config(&config).unwrap();
        assert_eq!(filter.bit_count(), 9586);

        let too_big = FilterConfig {
            expected_items: u64::MAX,
            target_fpr: 0.01,
        };
        assert!(MembershipFilter::from_config(&too_big).is_err());
    }

    #[test]
    fn test_debug_does_not_dump_buffer() {
        let filter = MembershipFilter::new(10_000, 0.01).unwrap();
        let rendered = format!("{:?}", filter);
        assert!(rendered.contains("bit_count: 95851"));
        assert!(rendered.len() < 200);
    }
}
