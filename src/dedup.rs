//! Duplicate suppression strategies
//!
//! Two detectors back the generation engine:
//! - `ExactSet`: in-memory HashSet, exact answers, memory grows with output
//! - `BloomFilter`: fixed-size probabilistic bit array for high-volume runs;
//!   never misses a real duplicate, but a small false-positive rate drops a
//!   fraction of genuinely new candidates

use ahash::RandomState;
use hashbrown::HashSet;
use std::hash::{BuildHasher, Hash, Hasher};

use crate::cli::Mode;

/// Membership tracking for previously emitted candidates
///
/// `insert` returns true when the item was not seen before. The engine owns
/// the detector for exactly one run; there is no reset.
pub trait DuplicateDetector {
    /// Record the item, returning true if it was previously unseen
    fn insert(&mut self, item: &str) -> bool;

    /// Check membership without recording
    fn contains(&self, item: &str) -> bool;

    /// Number of items recorded (estimated for probabilistic detectors)
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Approximate memory footprint in bytes
    fn memory_usage(&self) -> usize;
}

/// Exact in-memory detector
pub struct ExactSet {
    set: HashSet<String, RandomState>,
}

impl ExactSet {
    pub fn new() -> Self {
        Self {
            set: HashSet::with_hasher(RandomState::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            set: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }
}

impl Default for ExactSet {
    fn default() -> Self {
        Self::new()
    }
}

impl DuplicateDetector for ExactSet {
    fn insert(&mut self, item: &str) -> bool {
        self.set.insert(item.to_string())
    }

    fn contains(&self, item: &str) -> bool {
        self.set.contains(item)
    }

    fn len(&self) -> usize {
        self.set.len()
    }

    fn memory_usage(&self) -> usize {
        // Approximate: String overhead + content + table overhead per entry
        self.set.len() * 64 + self.set.capacity() * 8
    }
}

/// Probabilistic membership filter
///
/// Sized at construction from the expected item count and target false
/// positive rate using the standard optimal-filter formulas. Exceeding the
/// expected count degrades the false-positive rate instead of failing.
pub struct BloomFilter {
    bits: Vec<u64>,
    num_bits: usize,
    num_hashes: usize,
    hasher: RandomState,
    inserted: u64,
}

impl BloomFilter {
    /// Create a filter for `expected_items` at `false_positive_rate`
    pub fn new(expected_items: usize, false_positive_rate: f64) -> Self {
        let n = expected_items.max(1) as f64;
        let ln2 = std::f64::consts::LN_2;

        // m = -n * ln(p) / (ln 2)^2
        let num_bits = (-(n * false_positive_rate.ln()) / (ln2 * ln2)).ceil() as usize;
        let num_bits = num_bits.max(64);

        // k = round((m/n) * ln 2), at least one hash
        let num_hashes = ((num_bits as f64 / n) * ln2).round() as usize;
        let num_hashes = num_hashes.clamp(1, 16);

        let num_words = (num_bits + 63) / 64;

        Self {
            bits: vec![0u64; num_words],
            num_bits,
            num_hashes,
            hasher: RandomState::new(),
            inserted: 0,
        }
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Set the k bit positions for the item
    pub fn add(&mut self, item: &str) {
        let (h1, h2) = self.hash_pair(item);
        for i in 0..self.num_hashes {
            let index = self.bit_index(h1, h2, i);
            self.bits[index / 64] |= 1u64 << (index % 64);
        }
        self.inserted += 1;
    }

    /// True when all k positions are set; false negatives are impossible
    pub fn check(&self, item: &str) -> bool {
        let (h1, h2) = self.hash_pair(item);
        (0..self.num_hashes).all(|i| {
            let index = self.bit_index(h1, h2, i);
            self.bits[index / 64] & (1u64 << (index % 64)) != 0
        })
    }

    // Double hashing: position_i = (h1 + i * h2) mod m
    fn hash_pair(&self, item: &str) -> (usize, usize) {
        let mut hasher1 = self.hasher.build_hasher();
        item.hash(&mut hasher1);
        let h1 = hasher1.finish() as usize;

        let mut hasher2 = self.hasher.build_hasher();
        hasher2.write_usize(h1);
        item.hash(&mut hasher2);
        let h2 = hasher2.finish() as usize;

        (h1, h2)
    }

    #[inline]
    fn bit_index(&self, h1: usize, h2: usize, i: usize) -> usize {
        h1.wrapping_add(i.wrapping_mul(h2)) % self.num_bits
    }
}

impl DuplicateDetector for BloomFilter {
    fn insert(&mut self, item: &str) -> bool {
        if self.check(item) {
            return false;
        }
        self.add(item);
        true
    }

    fn contains(&self, item: &str) -> bool {
        self.check(item)
    }

    fn len(&self) -> usize {
        self.inserted as usize
    }

    fn memory_usage(&self) -> usize {
        self.bits.len() * 8
    }
}

/// Expected-item estimate and FP rate for the exhaustive engine's filter
const EXHAUSTIVE_EXPECTED_ITEMS: usize = 1_000_000;
const EXHAUSTIVE_FP_RATE: f64 = 0.01;

/// Select the duplicate detector for a generation mode
pub fn create_detector(mode: Mode, expected_items: usize) -> Box<dyn DuplicateDetector> {
    match mode {
        Mode::Compact => Box::new(ExactSet::with_capacity(expected_items)),
        Mode::Exhaustive => Box::new(BloomFilter::new(
            EXHAUSTIVE_EXPECTED_ITEMS,
            EXHAUSTIVE_FP_RATE,
        )),
    }
}
