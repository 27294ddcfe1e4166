//! Interchangeable leaf positions.
//!
//! A symmetry chain `(i, j, k)` declares leaves `i`, `j`, `k` interchangeable, e.g.
//! because they feed the same gate and nothing else. Any encoding can then be
//! permuted so that `q[i] <= q[j] <= q[k]`, and the search only explores that
//! canonical order. Each element of a chain is the predecessor of the next one.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symmetries {
    chains: Vec<Vec<usize>>,
}

impl Symmetries {
    /// No symmetries: nothing is pruned.
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a relation over leaves `0..arity`.
    ///
    /// Every chain must have at least two elements, all below `arity`, and be
    /// strictly increasing, so that a predecessor is always fixed before its
    /// successor during the search.
    pub fn new(chains: Vec<Vec<usize>>, arity: usize) -> Result<Self> {
        for chain in &chains {
            if chain.len() < 2 {
                return Err(Error::InvalidSymmetry(format!("chain {:?} has fewer than two leaves", chain)));
            }
            if let Some(&leaf) = chain.iter().find(|&&leaf| leaf >= arity) {
                return Err(Error::InvalidSymmetry(format!(
                    "leaf {} in chain {:?} is out of range for arity {}",
                    leaf, chain, arity
                )));
            }
            if chain.windows(2).any(|w| w[0] >= w[1]) {
                return Err(Error::InvalidSymmetry(format!("chain {:?} is not strictly increasing", chain)));
            }
        }
        Ok(Self { chains })
    }

    pub fn chains(&self) -> &[Vec<usize>] {
        &self.chains
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Leaves that immediately precede `target` in some chain.
    pub fn predecessors(&self, target: usize) -> impl Iterator<Item = usize> + '_ {
        self.chains.iter().filter_map(move |chain| {
            chain
                .iter()
                .skip(1)
                .position(|&leaf| leaf == target)
                .map(|pos| chain[pos])
        })
    }

    /// Checks that `q` respects the canonical order of every chain.
    pub fn is_canonical(&self, q: &[u32]) -> bool {
        self.chains
            .iter()
            .all(|chain| chain.windows(2).all(|w| q[w[0]] <= q[w[1]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predecessors() {
        let sym = Symmetries::new(vec![vec![0, 2, 3], vec![1, 3]], 4).unwrap();
        assert_eq!(sym.predecessors(0).collect::<Vec<_>>(), Vec::<usize>::new());
        assert_eq!(sym.predecessors(2).collect::<Vec<_>>(), vec![0]);
        assert_eq!(sym.predecessors(3).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(sym.predecessors(1).count(), 0);
    }

    #[test]
    fn test_invalid_chains() {
        assert!(matches!(Symmetries::new(vec![vec![1]], 3), Err(Error::InvalidSymmetry(_))));
        assert!(matches!(Symmetries::new(vec![vec![1, 3]], 3), Err(Error::InvalidSymmetry(_))));
        assert!(matches!(Symmetries::new(vec![vec![2, 1]], 3), Err(Error::InvalidSymmetry(_))));
        assert!(matches!(Symmetries::new(vec![vec![1, 1]], 3), Err(Error::InvalidSymmetry(_))));
    }

    #[test]
    fn test_is_canonical() {
        let sym = Symmetries::new(vec![vec![0, 1, 2]], 3).unwrap();
        assert!(sym.is_canonical(&[1, 1, 4]));
        assert!(!sym.is_canonical(&[1, 3, 2]));
        assert!(Symmetries::none().is_canonical(&[5, 0, 1]));
    }
}
