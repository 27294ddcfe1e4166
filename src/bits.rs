//! Conversions between boolean vectors and their integer encodings.
//!
//! Vectors are read most-significant-bit first: position `i` of a vector of
//! length `l` has weight `2^(l-1-i)`. So `[true, false, true]` encodes `5`, and
//! the first leaf of a function is its highest-order input.

use crate::error::{Error, Result};

/// Largest supported number of inputs.
///
/// Truth tables are materialized over all `2^l` inputs, so this is far beyond what
/// is practical anyway; it only keeps every shift well-defined.
pub const MAX_ARITY: usize = 32;

/// Encodes a boolean vector as an integer, most significant bit first.
///
/// # Panics
///
/// Panics if the vector is longer than 64 bits.
pub fn to_int(bits: &[bool]) -> u64 {
    assert!(bits.len() <= 64, "Vector of length {} does not fit into u64", bits.len());
    bits.iter().fold(0u64, |acc, &b| (acc << 1) | b as u64)
}

/// Decodes `value` into a vector of exactly `padding` bits, zero padded on the left.
///
/// Inverse of [`to_int`]: `from_int(to_int(v), v.len()) == v`.
///
/// Fails with [`Error::ValueOutOfRange`] if `value >= 2^padding`.
pub fn from_int(value: u64, padding: usize) -> Result<Vec<bool>> {
    if padding > 64 || (padding < 64 && value >> padding != 0) {
        return Err(Error::ValueOutOfRange { value, padding });
    }
    Ok(decode(value, padding))
}

/// Decodes without the range check. Callers guarantee `value < 2^padding`.
pub(crate) fn decode(value: u64, padding: usize) -> Vec<bool> {
    (0..padding).map(|i| (value >> (padding - 1 - i)) & 1 == 1).collect()
}

/// Elementwise difference `a[i] - b[i]`, with values in `{-1, 0, 1}`.
pub fn diff(a: &[bool], b: &[bool]) -> Result<Vec<i8>> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(&x, &y)| x as i8 - y as i8).collect())
}

/// Iterates over all `2^arity` vectors in increasing [`to_int`] order.
///
/// # Panics
///
/// Panics if `arity > MAX_ARITY`.
pub fn all_vectors(arity: usize) -> impl Iterator<Item = Vec<bool>> {
    assert!(arity <= MAX_ARITY, "Arity should be in the range 0..={}", MAX_ARITY);
    (0..1u64 << arity).map(move |n| decode(n, arity))
}
