//! Growable bit set over course indices.
//!
//! The same type plays two roles in the enumerator: a *selected set* (the courses
//! taken along a path) and a *forbidden set* (the union of pairwise conflicts of
//! those courses). Two partial paths can be joined only if the union of their
//! selected sets does not intersect the union of their forbidden sets.
//!
//! The set is a plain value: all set-algebra operations either return a new set
//! or mutate `self` in place, and clones never share storage.

use std::hash::{Hash, Hasher};

/// A bit set backed by a vector of u64 words.
///
/// Each bit corresponds to a flat course index. The bit set automatically grows
/// as needed when setting bits beyond the current capacity, so there is no upper
/// bound on the number of courses.
#[derive(Debug, Clone, Default)]
pub struct BitSet {
    /// Storage: each u64 holds 64 bits
    words: Vec<u64>,
}

impl BitSet {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Creates a new empty bit set with the given capacity (in bits).
    pub fn new(capacity: usize) -> Self {
        let num_words = capacity.div_ceil(Self::BITS_PER_WORD);
        Self { words: vec![0; num_words] }
    }

    /// Creates an empty bit set with no pre-allocated capacity.
    pub fn empty() -> Self {
        Self { words: Vec::new() }
    }

    /// Creates a bit set containing exactly one index.
    pub fn singleton(index: usize) -> Self {
        let mut bs = Self::empty();
        bs.insert(index);
        bs
    }

    /// Returns the number of set bits.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Returns the capacity in bits.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.words.len() * Self::BITS_PER_WORD
    }

    /// Gets the word index and bit position for a given bit index.
    #[inline]
    fn word_and_bit(index: usize) -> (usize, usize) {
        let word = index / Self::BITS_PER_WORD;
        let bit = index % Self::BITS_PER_WORD;
        (word, bit)
    }

    /// Returns true if the bit at the given index is set.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(index);
        if word_idx >= self.words.len() {
            return false;
        }
        let mask = 1u64 << bit_idx;
        (self.words[word_idx] & mask) != 0
    }

    /// Sets the bit at the given index. Returns true if the bit was not previously set.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(index);

        // Grow if necessary
        if word_idx >= self.words.len() {
            self.words.resize(word_idx + 1, 0);
        }

        let mask = 1u64 << bit_idx;
        let was_clear = (self.words[word_idx] & mask) == 0;
        self.words[word_idx] |= mask;
        was_clear
    }

    /// Clears the bit at the given index. Returns true if the bit was previously set.
    #[inline]
    pub fn remove(&mut self, index: usize) -> bool {
        let (word_idx, bit_idx) = Self::word_and_bit(index);

        if word_idx >= self.words.len() {
            return false;
        }

        let mask = 1u64 << bit_idx;
        let was_set = (self.words[word_idx] & mask) != 0;
        self.words[word_idx] &= !mask;
        was_set
    }

    /// In-place union: `self = self ∪ other`.
    pub fn union_with(&mut self, other: &BitSet) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (a, &b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
    }

    /// In-place intersection: `self = self ∩ other`.
    pub fn intersect_with(&mut self, other: &BitSet) {
        for (i, a) in self.words.iter_mut().enumerate() {
            *a &= other.words.get(i).copied().unwrap_or(0);
        }
    }

    /// In-place difference: `self = self \ other`.
    pub fn difference_with(&mut self, other: &BitSet) {
        for (a, &b) in self.words.iter_mut().zip(&other.words) {
            *a &= !b;
        }
    }

    /// Returns `self ∪ other`.
    pub fn union(&self, other: &BitSet) -> BitSet {
        let mut res = self.clone();
        res.union_with(other);
        res
    }

    /// Returns `self ∩ other`.
    pub fn intersection(&self, other: &BitSet) -> BitSet {
        let mut res = self.clone();
        res.intersect_with(other);
        res
    }

    /// Returns `self \ other`.
    pub fn difference(&self, other: &BitSet) -> BitSet {
        let mut res = self.clone();
        res.difference_with(other);
        res
    }

    /// Returns true if `self ∩ other` is non-empty, without allocating.
    pub fn intersects(&self, other: &BitSet) -> bool {
        self.words.iter().zip(&other.words).any(|(&a, &b)| a & b != 0)
    }

    /// Clears all bits.
    pub fn clear(&mut self) {
        for word in &mut self.words {
            *word = 0;
        }
    }

    /// Extends the bit set by setting all bits from an iterator.
    pub fn extend(&mut self, iter: impl IntoIterator<Item = usize>) {
        for index in iter {
            self.insert(index);
        }
    }

    /// Returns an iterator over all set bit indices, in increasing order.
    pub fn iter(&self) -> BitSetIter<'_> {
        BitSetIter {
            bitset: self,
            word_idx: 0,
            current_word: self.words.first().copied().unwrap_or(0),
        }
    }

    /// Words with trailing zero words stripped, so that equal sets compare equal
    /// regardless of how far they have grown.
    fn significant_words(&self) -> &[u64] {
        let len = self.words.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1);
        &self.words[..len]
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.significant_words() == other.significant_words()
    }
}

impl Eq for BitSet {}

impl Hash for BitSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_words().hash(state);
    }
}

impl FromIterator<usize> for BitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut bs = BitSet::empty();
        bs.extend(iter);
        bs
    }
}

/// Iterator over set bits in a BitSet.
pub struct BitSetIter<'a> {
    bitset: &'a BitSet,
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let bit_idx = self.current_word.trailing_zeros() as usize;
                self.current_word &= self.current_word - 1; // Clear lowest set bit
                return Some(self.word_idx * BitSet::BITS_PER_WORD + bit_idx);
            }

            self.word_idx += 1;
            if self.word_idx >= self.bitset.words.len() {
                return None;
            }
            self.current_word = self.bitset.words[self.word_idx];
        }
    }
}
