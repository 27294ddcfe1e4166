//! Independent check that an encoding separates a function.
//!
//! Recomputes `(q · v) mod p` for every input `v` and requires the residues of true
//! inputs and false inputs to be disjoint. This does not look at constraints at all,
//! so it catches mistakes in both constraint derivation and pivot arithmetic.

use crate::bits;
use crate::error::{Error, Result};
use crate::residue::ResidueSet;
use crate::table::{check_arity, BooleanFunction};

/// Residues reached by the false inputs and by the true inputs of a function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residues {
    pub false_residues: ResidueSet,
    pub true_residues: ResidueSet,
}

impl Residues {
    pub fn modulus(&self) -> u32 {
        self.false_residues.modulus()
    }

    /// Decodes a residue back to the function output, if it is reached at all.
    pub fn decode(&self, residue: u32) -> Option<bool> {
        if self.true_residues.contains(residue) {
            Some(true)
        } else if self.false_residues.contains(residue) {
            Some(false)
        } else {
            None
        }
    }
}

/// Projects every input of `f` through `q` modulo `modulus` and collects the residues
/// by output, without checking disjointness.
pub fn residues(f: &impl BooleanFunction, q: &[u32], modulus: u32) -> Result<Residues> {
    let l = check_arity(f)?;
    if q.len() != l {
        return Err(Error::ArityMismatch {
            expected: l,
            actual: q.len(),
        });
    }
    if modulus < 2 {
        return Err(Error::InvalidModulus { modulus });
    }

    let p = modulus as u64;
    let mut false_residues = ResidueSet::new(modulus);
    let mut true_residues = ResidueSet::new(modulus);
    for v in bits::all_vectors(l) {
        let r = v
            .iter()
            .zip(q)
            .filter(|&(&b, _)| b)
            .fold(0u64, |acc, (_, &qi)| (acc + qi as u64) % p) as u32;
        if f.eval(&v) {
            true_residues.insert(r);
        } else {
            false_residues.insert(r);
        }
    }
    Ok(Residues {
        false_residues,
        true_residues,
    })
}

/// Checks that `(q, modulus)` separates `f`.
///
/// Returns the residue sets on success, and [`Error::Unsound`] with the smallest
/// shared residue otherwise.
pub fn validate(f: &impl BooleanFunction, q: &[u32], modulus: u32) -> Result<Residues> {
    let residues = residues(f, q, modulus)?;
    match residues.false_residues.first_common(&residues.true_residues) {
        Some(residue) => Err(Error::Unsound { modulus, residue }),
        None => Ok(residues),
    }
}
