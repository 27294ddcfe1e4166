//! Pruned backtracking search for a separating coefficient vector under one modulus.
//!
//! The search fixes `q[0] = 1` (any nonzero multiple of a separating `q` separates
//! too) and extends the vector one coordinate at a time. At depth `k` a value is
//! forbidden if
//!
//! - it is below `q[prev]` for a declared symmetry `prev → k`, or
//! - it is the pivot of a depth-`k` constraint, i.e. the one value that would make
//!   that constraint vanish modulo `p`.
//!
//! Remaining values are tried in ascending order. Since a depth-`k` constraint only
//! involves `q[0..=k]`, a full vector that survived every depth violates no
//! constraint, and no value that could complete a separating vector is ever
//! forbidden. So the search finds a vector iff one exists with `q[0] = 1` in the
//! canonical symmetry order.

use log::debug;

use crate::builder::ConstraintIndex;
use crate::error::{Error, Result};
use crate::residue::ResidueSet;
use crate::symmetry::Symmetries;

/// Result of a single-modulus search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A complete coefficient vector.
    Found(Vec<u32>),
    /// The pruned space holds no separating vector.
    Exhausted,
    /// The interrupt callback asked the search to stop.
    Interrupted,
}

impl Outcome {
    pub fn found(self) -> Option<Vec<u32>> {
        match self {
            Outcome::Found(q) => Some(q),
            _ => None,
        }
    }
}

/// Counters collected during one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Partial vectors expanded.
    pub nodes: u64,
    /// Partial vectors whose every candidate failed.
    pub backtracks: u64,
    /// Values excluded by symmetry or pivot elimination, summed over nodes.
    pub pruned: u64,
}

enum Step {
    Found,
    Failed,
    Interrupted,
}

/// Backtracking searcher for a fixed constraint index, symmetry relation and modulus.
pub struct Searcher<'a> {
    index: &'a ConstraintIndex,
    symmetries: &'a Symmetries,
    modulus: u32,
}

impl<'a> Searcher<'a> {
    /// Creates a searcher over the residues modulo `modulus`.
    ///
    /// Fails with [`Error::InvalidModulus`] if `modulus < 2`, and with
    /// [`Error::InvalidSymmetry`] if a chain refers to a leaf beyond the arity.
    pub fn new(index: &'a ConstraintIndex, symmetries: &'a Symmetries, modulus: u32) -> Result<Self> {
        if modulus < 2 {
            return Err(Error::InvalidModulus { modulus });
        }
        let arity = index.arity();
        if let Some(chain) = symmetries.chains().iter().find(|c| c.iter().any(|&leaf| leaf >= arity)) {
            return Err(Error::InvalidSymmetry(format!(
                "chain {:?} is out of range for arity {}",
                chain, arity
            )));
        }
        Ok(Self {
            index,
            symmetries,
            modulus,
        })
    }

    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    /// Target length of the coefficient vector.
    pub fn arity(&self) -> usize {
        self.index.arity()
    }

    /// Values the next coefficient `q[k]`, `k = inputs.len()`, must not take.
    pub fn forbidden_values(&self, inputs: &[u32]) -> ResidueSet {
        let k = inputs.len();
        let mut forbidden = ResidueSet::new(self.modulus);

        for prev in self.symmetries.predecessors(k) {
            forbidden.insert_below(inputs[prev]);
        }

        for c in self.index.at_depth(k) {
            if forbidden.is_full() {
                break;
            }
            forbidden.insert(c.pivot(inputs, self.modulus));
        }

        forbidden
    }

    /// Allowed values for the next coefficient, in ascending order.
    pub fn candidates(&self, inputs: &[u32]) -> Vec<u32> {
        self.forbidden_values(inputs).complement().collect()
    }

    /// Extends `inputs` to a complete separating vector, if possible.
    pub fn search(&self, inputs: Vec<u32>) -> Option<Vec<u32>> {
        self.search_interruptible(inputs, || false).0.found()
    }

    /// Runs the search from the normalized start `[1]`.
    pub fn run(&self) -> Option<Vec<u32>> {
        self.search(vec![1])
    }

    /// Runs the search from `[1]`, polling `interrupt` at every node.
    pub fn run_interruptible(&self, interrupt: impl Fn() -> bool) -> (Outcome, SearchStats) {
        self.search_interruptible(vec![1], interrupt)
    }

    /// Extends `inputs`, polling `interrupt` at every node.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` is longer than the arity or holds a value outside `0..modulus`.
    pub fn search_interruptible(
        &self,
        mut inputs: Vec<u32>,
        interrupt: impl Fn() -> bool,
    ) -> (Outcome, SearchStats) {
        assert!(
            inputs.len() <= self.arity(),
            "Starting vector of length {} exceeds arity {}",
            inputs.len(),
            self.arity()
        );
        assert!(
            inputs.iter().all(|&x| x < self.modulus),
            "Starting vector {:?} is not reduced modulo {}",
            inputs,
            self.modulus
        );

        let mut stats = SearchStats::default();
        let outcome = match self.descend(&mut inputs, &mut stats, &interrupt) {
            Step::Found => Outcome::Found(inputs),
            Step::Failed => Outcome::Exhausted,
            Step::Interrupted => Outcome::Interrupted,
        };
        debug!(
            "search(p = {}, l = {}) -> {:?}, {:?}",
            self.modulus,
            self.arity(),
            outcome,
            stats
        );
        (outcome, stats)
    }

    // On `Found` the vector is left complete; on every other return `inputs` is
    // restored to its length at entry.
    fn descend<I>(&self, inputs: &mut Vec<u32>, stats: &mut SearchStats, interrupt: &I) -> Step
    where
        I: Fn() -> bool,
    {
        if inputs.len() == self.arity() {
            return Step::Found;
        }
        if interrupt() {
            return Step::Interrupted;
        }
        stats.nodes += 1;

        let candidates = self.candidates(inputs);
        stats.pruned += self.modulus as u64 - candidates.len() as u64;

        for x in candidates {
            inputs.push(x);
            match self.descend(inputs, stats, interrupt) {
                Step::Found => return Step::Found,
                Step::Failed => {
                    inputs.pop();
                }
                Step::Interrupted => {
                    inputs.pop();
                    return Step::Interrupted;
                }
            }
        }

        stats.backtracks += 1;
        Step::Failed
    }
}
