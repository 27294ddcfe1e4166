//! Sign-symmetric linear constraints.
//!
//! A [`Constraint`] is the difference `x - y` of a false input `x` and a true input
//! `y`, truncated after its last nonzero coordinate. A coefficient vector `q`
//! separates the pair modulo `p` iff `c · q ≢ 0 (mod p)`. Since `c · q ≡ 0` and
//! `(-c) · q ≡ 0` are the same condition, a constraint and its negation compare
//! and hash as equal.
//!
//! Equality and hashing go through a canonical representative: the lexicographically
//! larger of `c` and `-c`, i.e. the sign that makes the first nonzero coordinate
//! positive.

use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone)]
pub struct Constraint {
    data: Box<[i8]>,
    /// `1` if `data` is canonical, `-1` if `-data` is.
    sign: i8,
}

impl Constraint {
    /// Creates a constraint from raw coefficients.
    ///
    /// The coefficients must form a difference of two boolean vectors, i.e. lie in
    /// `{-1, 0, 1}`; negation is not defined for anything else.
    pub fn new(data: Vec<i8>) -> Self {
        debug_assert!(
            data.iter().all(|&x| (-1..=1).contains(&x)),
            "Constraint coefficients must be in {{-1, 0, 1}}, got {:?}",
            data
        );
        let data = data.into_boxed_slice();
        let sign = match data.iter().find(|&&x| x != 0) {
            Some(&x) if x < 0 => -1,
            _ => 1,
        };
        Self { data, sign }
    }

    /// Raw coefficients, as given at construction.
    pub fn coeffs(&self) -> &[i8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Index of the last coefficient, i.e. the search depth at which this
    /// constraint becomes fully evaluable.
    ///
    /// # Panics
    ///
    /// Panics on an empty constraint.
    pub fn depth(&self) -> usize {
        assert!(!self.data.is_empty(), "Empty constraint has no depth");
        self.data.len() - 1
    }

    /// Elementwise negation.
    pub fn negate(&self) -> Self {
        Self {
            data: self.data.iter().map(|&x| -x).collect(),
            sign: -self.sign,
        }
    }

    /// Coefficients of the canonical representative.
    pub fn canonical(&self) -> impl Iterator<Item = i8> + '_ {
        self.data.iter().map(move |&x| x * self.sign)
    }

    /// The single value of the last coefficient that makes `self · q ≡ 0 (mod p)`,
    /// given the already fixed coefficients `inputs = q[0..depth]`.
    ///
    /// The last coordinate must be `±1`, which is self-inverse modulo any `p`, so
    /// the pivot is `-c[k] * Σ c[j] * q[j]`. Every step is reduced modulo `p`.
    pub fn pivot(&self, inputs: &[u32], modulus: u32) -> u32 {
        let k = self.depth();
        debug_assert_eq!(inputs.len(), k, "Pivot needs exactly {} fixed inputs", k);
        let last = self.data[k] as i64;
        debug_assert!(last == 1 || last == -1, "Last coordinate must be ±1, got {}", last);
        let p = modulus as i64;
        let sum = self.data[..k]
            .iter()
            .zip(inputs)
            .fold(0i64, |acc, (&c, &q)| (acc - last * c as i64 * q as i64).rem_euclid(p));
        sum as u32
    }

    /// Dot product with a full coefficient prefix, reduced modulo `modulus`.
    pub fn dot(&self, q: &[u32], modulus: u32) -> u32 {
        let p = modulus as i64;
        self.data
            .iter()
            .zip(q)
            .fold(0i64, |acc, (&c, &q)| (acc + c as i64 * q as i64).rem_euclid(p)) as u32
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.data.len() == other.data.len() && self.canonical().eq(other.canonical())
    }
}

impl Eq for Constraint {}

impl Hash for Constraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.len().hash(state);
        for x in self.canonical() {
            x.hash(state);
        }
    }
}

impl PartialOrd for Constraint {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by canonical representative, so sorting is stable under negation.
impl Ord for Constraint {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.canonical().cmp(other.canonical())
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, ")")
    }
}
