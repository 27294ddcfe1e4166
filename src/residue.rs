//! Bit set over the residues `0..modulus`.
//!
//! Used by the searcher for the set of forbidden coefficient values at the current
//! depth, and by the validator for the residues reached by true and false inputs.

use std::fmt;

/// A set of residues modulo a fixed `modulus`, backed by a vector of u64 words.
#[derive(Clone, PartialEq, Eq)]
pub struct ResidueSet {
    /// Storage: each u64 holds 64 residues
    words: Vec<u64>,
    /// Number of residues in the set (cached for O(1) len())
    count: usize,
    modulus: u32,
}

impl ResidueSet {
    /// Number of bits per word.
    const BITS_PER_WORD: usize = 64;

    /// Creates an empty set of residues modulo `modulus`.
    pub fn new(modulus: u32) -> Self {
        let num_words = (modulus as usize).div_ceil(Self::BITS_PER_WORD);
        Self {
            words: vec![0; num_words],
            count: 0,
            modulus,
        }
    }

    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    /// Returns the number of residues in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if every residue `0..modulus` is in the set.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.modulus as usize
    }

    #[inline]
    fn word_and_bit(residue: u32) -> (usize, usize) {
        let index = residue as usize;
        (index / Self::BITS_PER_WORD, index % Self::BITS_PER_WORD)
    }

    #[inline]
    pub fn contains(&self, residue: u32) -> bool {
        if residue >= self.modulus {
            return false;
        }
        let (word_idx, bit_idx) = Self::word_and_bit(residue);
        (self.words[word_idx] >> bit_idx) & 1 != 0
    }

    /// Adds a residue. Returns true if it was not already present.
    ///
    /// # Panics
    ///
    /// Panics if `residue >= modulus`.
    #[inline]
    pub fn insert(&mut self, residue: u32) -> bool {
        assert!(
            residue < self.modulus,
            "Residue {} out of range for modulus {}",
            residue,
            self.modulus
        );
        let (word_idx, bit_idx) = Self::word_and_bit(residue);
        let mask = 1u64 << bit_idx;
        let was_clear = self.words[word_idx] & mask == 0;
        if was_clear {
            self.words[word_idx] |= mask;
            self.count += 1;
        }
        was_clear
    }

    /// Adds every residue in `0..end` (clamped to the modulus).
    pub fn insert_below(&mut self, end: u32) {
        for residue in 0..end.min(self.modulus) {
            self.insert(residue);
        }
    }

    pub fn clear(&mut self) {
        for word in &mut self.words {
            *word = 0;
        }
        self.count = 0;
    }

    /// Returns the smallest residue present in both sets, if any.
    ///
    /// # Panics
    ///
    /// Panics if the moduli differ.
    pub fn first_common(&self, other: &ResidueSet) -> Option<u32> {
        assert_eq!(self.modulus, other.modulus, "Modulus mismatch");
        self.words
            .iter()
            .zip(&other.words)
            .enumerate()
            .find_map(|(i, (a, b))| {
                let common = a & b;
                (common != 0).then(|| (i * Self::BITS_PER_WORD) as u32 + common.trailing_zeros())
            })
    }

    pub fn is_disjoint(&self, other: &ResidueSet) -> bool {
        self.first_common(other).is_none()
    }

    /// Iterates over the residues in the set, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.modulus).filter(move |&r| self.contains(r))
    }

    /// Iterates over the residues *not* in the set, in ascending order.
    pub fn complement(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.modulus).filter(move |&r| !self.contains(r))
    }
}

impl fmt::Debug for ResidueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, r) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", r)?;
        }
        write!(f, "}} mod {}", self.modulus)
    }
}
