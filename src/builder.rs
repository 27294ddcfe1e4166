//! Turning a boolean function into depth-indexed separating constraints.
//!
//! For every pair of a false input `x` and a true input `y`, the coefficient vector
//! must satisfy `q · (x - y) ≢ 0 (mod p)`. The difference is truncated after its last
//! nonzero coordinate `k` and filed under depth `k`: it can be checked as soon as
//! `q[0..=k]` is known, and not before.

use std::collections::HashSet;
use std::fmt;

use log::debug;

use crate::bits;
use crate::constraint::Constraint;
use crate::error::Result;
use crate::table::{check_arity, BooleanFunction};

/// The inputs of a function, split by output.
///
/// Both sets hold integer encodings in increasing order; together they cover
/// `0..2^l` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub false_set: Vec<u64>,
    pub true_set: Vec<u64>,
}

/// Splits all `2^l` inputs of `f` by output.
pub fn partition(f: &impl BooleanFunction) -> Result<Partition> {
    let l = check_arity(f)?;
    let mut false_set = Vec::new();
    let mut true_set = Vec::new();
    for (i, input) in bits::all_vectors(l).enumerate() {
        if f.eval(&input) {
            true_set.push(i as u64);
        } else {
            false_set.push(i as u64);
        }
    }
    Ok(Partition { false_set, true_set })
}

/// Unique constraints of a function, grouped by depth.
///
/// `at_depth(k)` holds constraints of length `k + 1`. Immutable once built, so it can
/// be shared by reference between concurrent searches.
#[derive(Debug, Clone)]
pub struct ConstraintIndex {
    by_depth: Vec<HashSet<Constraint>>,
}

impl ConstraintIndex {
    /// Builds the constraint index of `f`.
    pub fn build(f: &impl BooleanFunction) -> Result<Self> {
        let l = check_arity(f)?;
        let Partition { false_set, true_set } = partition(f)?;

        let falses: Vec<Vec<bool>> = false_set.iter().map(|&x| bits::from_int(x, l)).collect::<Result<_>>()?;
        let trues: Vec<Vec<bool>> = true_set.iter().map(|&y| bits::from_int(y, l)).collect::<Result<_>>()?;

        let mut by_depth = vec![HashSet::new(); l];
        for x in &falses {
            for y in &trues {
                let mut c = bits::diff(x, y)?;
                // x != y, so some coordinate differs.
                let k = c.iter().rposition(|&d| d != 0).expect("distinct inputs");
                c.truncate(k + 1);
                by_depth[k].insert(Constraint::new(c));
            }
        }

        let index = Self { by_depth };
        debug!(
            "built {} constraints from {} x {} pairs, per depth: {:?}",
            index.total(),
            falses.len(),
            trues.len(),
            index.by_depth.iter().map(|s| s.len()).collect::<Vec<_>>()
        );
        Ok(index)
    }

    /// Number of inputs of the underlying function.
    pub fn arity(&self) -> usize {
        self.by_depth.len()
    }

    /// Constraints that become evaluable at depth `k`.
    pub fn at_depth(&self, k: usize) -> &HashSet<Constraint> {
        &self.by_depth[k]
    }

    /// Total number of unique constraints.
    pub fn total(&self) -> usize {
        self.by_depth.iter().map(|s| s.len()).sum()
    }

    /// Iterates over all constraints, depth by depth.
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.by_depth.iter().flatten()
    }

    /// All constraints as rows of length `l`, zero padded on the right.
    ///
    /// Rows appear by ascending depth, in canonical form, sorted within a depth.
    pub fn to_matrix(&self) -> Vec<Vec<i8>> {
        let l = self.arity();
        let mut rows = Vec::with_capacity(self.total());
        for set in &self.by_depth {
            let mut sorted: Vec<&Constraint> = set.iter().collect();
            sorted.sort();
            for c in sorted {
                let mut row: Vec<i8> = c.canonical().collect();
                row.resize(l, 0);
                rows.push(row);
            }
        }
        rows
    }
}

impl fmt::Display for ConstraintIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_matrix() {
            write!(f, "[")?;
            for (i, x) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>2}", x)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
