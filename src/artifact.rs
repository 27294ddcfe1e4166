//! Search inputs for one circuit node, bundled for re-use.
//!
//! The circuit side extracts, for a target gate, the ordered leaves of its fan-in
//! cone, the truth table of the gate over those leaves, and the leaf symmetries. A
//! [`TableArtifact`] holds exactly that triple, so the search can be re-run (or run
//! with a different prime window) without rebuilding the circuit graph. See the
//! [`io`](crate::io) module for the on-disk format.

use std::collections::HashSet;

use crate::driver::{find_encoding, Encoding, SearchConfig};
use crate::error::{Error, Result};
use crate::symmetry::Symmetries;
use crate::table::TruthTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableArtifact {
    leaves: Vec<String>,
    table: TruthTable,
    symmetries: Symmetries,
}

impl TableArtifact {
    /// Bundles leaves, truth table and symmetry chains, checking that they agree.
    ///
    /// Leaf labels must be non-empty, free of whitespace and unique; there must be
    /// exactly one per table input.
    pub fn new(leaves: Vec<String>, table: TruthTable, symmetries: Vec<Vec<usize>>) -> Result<Self> {
        if leaves.len() != table.arity() {
            return Err(Error::LeafCountMismatch {
                leaves: leaves.len(),
                arity: table.arity(),
            });
        }
        let mut seen = HashSet::new();
        for leaf in &leaves {
            if leaf.is_empty() || leaf.chars().any(char::is_whitespace) {
                return Err(Error::InvalidLeaf(format!("{:?} is empty or contains whitespace", leaf)));
            }
            if !seen.insert(leaf.as_str()) {
                return Err(Error::InvalidLeaf(format!("{:?} appears twice", leaf)));
            }
        }
        let symmetries = Symmetries::new(symmetries, table.arity())?;
        Ok(Self {
            leaves,
            table,
            symmetries,
        })
    }

    pub fn leaves(&self) -> &[String] {
        &self.leaves
    }

    pub fn table(&self) -> &TruthTable {
        &self.table
    }

    pub fn symmetries(&self) -> &Symmetries {
        &self.symmetries
    }

    /// Searches for an encoding and labels its coefficients with the leaves.
    pub fn search(&self, config: &SearchConfig) -> Result<Option<LeafEncoding>> {
        let found = find_encoding(&self.table, &self.symmetries, config)?;
        Ok(found.map(|encoding| self.label(encoding)))
    }

    /// Like [`search`](Self::search), but validates the encoding before returning it.
    pub fn search_verified(&self, config: &SearchConfig) -> Result<Option<LeafEncoding>> {
        match find_encoding(&self.table, &self.symmetries, config)? {
            Some(encoding) => {
                encoding.verify(&self.table)?;
                Ok(Some(self.label(encoding)))
            }
            None => Ok(None),
        }
    }

    fn label(&self, encoding: Encoding) -> LeafEncoding {
        LeafEncoding {
            assignment: self.leaves.iter().cloned().zip(encoding.coefficients).collect(),
            modulus: encoding.modulus,
        }
    }
}

/// Leaf → coefficient assignment, in leaf order, plus the modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafEncoding {
    pub assignment: Vec<(String, u32)>,
    pub modulus: u32,
}

impl LeafEncoding {
    /// Coefficient of the given leaf.
    pub fn get(&self, leaf: &str) -> Option<u32> {
        self.assignment.iter().find(|(l, _)| l == leaf).map(|&(_, q)| q)
    }

    /// Coefficients in leaf order.
    pub fn coefficients(&self) -> Vec<u32> {
        self.assignment.iter().map(|&(_, q)| q).collect()
    }
}
