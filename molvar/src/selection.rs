//! Index sets ("selections").
//!
//! A [`Selection`] is a set of indexes over some universe, usually the atoms of the
//! loaded models.  A *bond* selection is an index set over bonds that carries a second,
//! companion set: the atoms at the bonds' endpoints.  The two sets always travel
//! together; cloning a bond selection duplicates both.
//!
//! A selection may also be *focused*: the single-item selection handed out when a
//! script iterates over a set one item at a time.
//!
//! [`Selection`]: struct.Selection.html

use core::fmt;

const WORD_BITS: usize = 64;

/// The largest index a selection literal may name.  Sets built from script text are
/// limited to this universe, which bounds the storage a literal can ask for.
pub const MAX_INDEX: usize = (1 << 24) - 1;

/// A growable set of non-negative indexes.
#[derive(Clone, Default)]
pub struct BitSet {
    words: Vec<u64>,
}

impl BitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set containing the given indexes.
    pub fn from_indexes<I: IntoIterator<Item = usize>>(indexes: I) -> Self {
        let mut bs = Self::new();
        for i in indexes {
            bs.set(i);
        }
        bs
    }

    pub fn set(&mut self, index: usize) {
        let word = index / WORD_BITS;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << (index % WORD_BITS);
    }

    /// Sets every index in `from..=to`.  Does nothing if `from > to`.
    pub fn set_range(&mut self, from: usize, to: usize) {
        if from > to {
            return;
        }

        let first = from / WORD_BITS;
        let last = to / WORD_BITS;
        if last >= self.words.len() {
            self.words.resize(last + 1, 0);
        }

        for word in first..=last {
            let lo = if word == first { from % WORD_BITS } else { 0 };
            let hi = if word == last { to % WORD_BITS } else { WORD_BITS - 1 };
            self.words[word] |= (u64::MAX << lo) & (u64::MAX >> (WORD_BITS - 1 - hi));
        }
    }

    pub fn clear(&mut self, index: usize) {
        let word = index / WORD_BITS;
        if word < self.words.len() {
            self.words[word] &= !(1u64 << (index % WORD_BITS));
        }
    }

    pub fn clear_all(&mut self) {
        self.words.clear();
    }

    pub fn get(&self, index: usize) -> bool {
        let word = index / WORD_BITS;
        word < self.words.len() && self.words[word] & (1u64 << (index % WORD_BITS)) != 0
    }

    /// The number of indexes in the set.
    pub fn cardinality(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Returns the first index at or after `from`, if any.
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        let mut word = from / WORD_BITS;
        if word >= self.words.len() {
            return None;
        }

        let mut bits = self.words[word] & (!0u64 << (from % WORD_BITS));
        loop {
            if bits != 0 {
                return Some(word * WORD_BITS + bits.trailing_zeros() as usize);
            }
            word += 1;
            if word >= self.words.len() {
                return None;
            }
            bits = self.words[word];
        }
    }

    /// Iterates over the set's indexes in ascending order.
    pub fn iter(&self) -> BitSetIter<'_> {
        BitSetIter { bs: self, next: 0 }
    }

    /// Adds every index in `other` to this set.
    pub fn union_with(&mut self, other: &BitSet) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (w, o) in self.words.iter_mut().zip(other.words.iter()) {
            *w |= *o;
        }
    }
}

impl PartialEq for BitSet {
    // Trailing empty words are not significant.
    fn eq(&self, other: &Self) -> bool {
        let len = self.words.len().max(other.words.len());
        (0..len).all(|i| {
            self.words.get(i).copied().unwrap_or(0) == other.words.get(i).copied().unwrap_or(0)
        })
    }
}

impl Eq for BitSet {}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<usize> for BitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_indexes(iter)
    }
}

/// Iterator over the indexes of a [`BitSet`](struct.BitSet.html).
pub struct BitSetIter<'a> {
    bs: &'a BitSet,
    next: usize,
}

impl Iterator for BitSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let found = self.bs.next_set_bit(self.next)?;
        self.next = found + 1;
        Some(found)
    }
}

/// The payload of a `Selection` value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    bits: BitSet,

    // For bond selections, the atoms at the bonds' endpoints.
    companion: Option<BitSet>,

    // The single item this selection stands for during iteration, if any.
    focus: Option<usize>,
}

impl Selection {
    /// Creates an atom selection.
    pub fn atoms(bits: BitSet) -> Self {
        Self {
            bits,
            companion: None,
            focus: None,
        }
    }

    /// Creates a bond selection with its companion set of endpoint atoms.
    pub fn bonds(bits: BitSet, companion: BitSet) -> Self {
        Self {
            bits,
            companion: Some(companion),
            focus: None,
        }
    }

    /// Creates a focused, single-item selection.  `bits` is the set the item is
    /// drawn from, normally containing just `index`.
    pub fn focused(index: usize, bits: BitSet) -> Self {
        Self {
            bits,
            companion: None,
            focus: Some(index),
        }
    }

    pub fn bits(&self) -> &BitSet {
        &self.bits
    }

    pub fn bits_mut(&mut self) -> &mut BitSet {
        &mut self.bits
    }

    pub fn companion(&self) -> Option<&BitSet> {
        self.companion.as_ref()
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub fn is_bonds(&self) -> bool {
        self.companion.is_some()
    }

    pub fn is_focused(&self) -> bool {
        self.focus.is_some()
    }

    /// Copies the selection as a plain, unfocused set, keeping the companion set of a
    /// bond selection.
    pub fn unfocused(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            companion: self.companion.clone(),
            focus: None,
        }
    }

    pub fn cardinality(&self) -> usize {
        self.bits.cardinality()
    }
}
