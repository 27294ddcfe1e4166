//! Trying candidate primes until one admits a separating encoding.
//!
//! Primes are tried in ascending order, since the cost of the downstream encoded
//! circuit grows with the modulus. The first success is returned; it is the smallest
//! prime in the window that works under the `q[0] = 1` normalization, but there is no
//! other optimality guarantee.
//!
//! # Examples
//!
//! ```
//! use linsep::driver::{find_encoding, SearchConfig};
//! use linsep::symmetry::Symmetries;
//! use linsep::table::TruthTable;
//!
//! let and = TruthTable::from_bools(&[false, false, false, true]).unwrap();
//! let enc = find_encoding(&and, &Symmetries::none(), &SearchConfig::default())
//!     .unwrap()
//!     .expect("AND is separable");
//! assert_eq!(enc.modulus, 3);
//! assert_eq!(enc.coefficients, vec![1, 1]);
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

use log::info;

use crate::builder::ConstraintIndex;
use crate::error::{Error, Result};
use crate::search::{Outcome, Searcher};
use crate::symmetry::Symmetries;
use crate::table::BooleanFunction;
use crate::validate::{validate, Residues};

/// Candidate moduli, in the order they are tried.
pub const PRIMES: [u32; 11] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31];

/// Options for the prime iteration.
///
/// Use `SearchConfig::default()` to try every prime in [`PRIMES`] sequentially.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Smallest modulus to try, inclusive (default: 2)
    pub p_min: u32,
    /// Largest modulus to try, inclusive (default: 31)
    pub p_max: u32,
    /// Search all admissible primes on separate threads (default: false)
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            p_min: 2,
            p_max: 31,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Sequential search over the primes in `[p_min, p_max]`.
    pub fn window(p_min: u32, p_max: u32) -> Self {
        Self {
            p_min,
            p_max,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.p_min > self.p_max {
            return Err(Error::InvalidWindow {
                p_min: self.p_min,
                p_max: self.p_max,
            });
        }
        Ok(())
    }

    /// Admissible primes, ascending.
    pub fn primes(&self) -> impl Iterator<Item = u32> + '_ {
        PRIMES.into_iter().filter(move |&p| self.p_min <= p && p <= self.p_max)
    }
}

/// A separating encoding: coefficient vector and modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub coefficients: Vec<u32>,
    pub modulus: u32,
}

impl Encoding {
    /// Re-checks the encoding against `f` with the independent validator.
    pub fn verify(&self, f: &impl BooleanFunction) -> Result<Residues> {
        validate(f, &self.coefficients, self.modulus)
    }
}

/// Finds a separating encoding of `f`, trying primes in ascending order.
///
/// `Ok(None)` means no admissible prime works; this is a normal outcome.
pub fn find_encoding(f: &impl BooleanFunction, symmetries: &Symmetries, config: &SearchConfig) -> Result<Option<Encoding>> {
    config.validate()?;
    let index = ConstraintIndex::build(f)?;
    if config.parallel {
        search_primes_parallel(&index, symmetries, config)
    } else {
        search_primes(&index, symmetries, config)
    }
}

/// Like [`find_encoding`], but searches every admissible prime on its own thread.
///
/// The result is the same as the sequential one: a worker gives up as soon as a
/// smaller prime has succeeded, and the smallest successful prime wins.
pub fn find_encoding_parallel(
    f: &impl BooleanFunction,
    symmetries: &Symmetries,
    config: &SearchConfig,
) -> Result<Option<Encoding>> {
    let config = SearchConfig {
        parallel: true,
        ..config.clone()
    };
    find_encoding(f, symmetries, &config)
}

/// Finds an encoding and validates it before returning.
///
/// A validation failure is reported as [`Error::Unsound`].
pub fn find_verified_encoding(
    f: &impl BooleanFunction,
    symmetries: &Symmetries,
    config: &SearchConfig,
) -> Result<Option<Encoding>> {
    match find_encoding(f, symmetries, config)? {
        Some(encoding) => {
            encoding.verify(f)?;
            Ok(Some(encoding))
        }
        None => Ok(None),
    }
}

/// Sequential prime iteration over a prebuilt constraint index.
pub fn search_primes(index: &ConstraintIndex, symmetries: &Symmetries, config: &SearchConfig) -> Result<Option<Encoding>> {
    config.validate()?;
    for p in config.primes() {
        info!("Trying p = {}", p);
        let searcher = Searcher::new(index, symmetries, p)?;
        if let Some(coefficients) = searcher.run() {
            info!("Found encoding {:?} mod {}", coefficients, p);
            return Ok(Some(Encoding { coefficients, modulus: p }));
        }
    }
    info!("No encoding found for p in [{}, {}]", config.p_min, config.p_max);
    Ok(None)
}

/// Parallel prime iteration over a prebuilt constraint index.
///
/// One scoped thread per admissible prime. The index and symmetries are shared by
/// reference, each worker owns its own coefficient stack.
pub fn search_primes_parallel(
    index: &ConstraintIndex,
    symmetries: &Symmetries,
    config: &SearchConfig,
) -> Result<Option<Encoding>> {
    config.validate()?;
    let searchers = config
        .primes()
        .map(|p| Searcher::new(index, symmetries, p))
        .collect::<Result<Vec<_>>>()?;
    if searchers.is_empty() {
        info!("No encoding found for p in [{}, {}]", config.p_min, config.p_max);
        return Ok(None);
    }

    // Smallest modulus that has succeeded so far.
    let best = AtomicU32::new(u32::MAX);

    let found: Vec<Encoding> = thread::scope(|s| {
        let handles: Vec<_> = searchers
            .iter()
            .map(|searcher| {
                let best = &best;
                s.spawn(move || {
                    let p = searcher.modulus();
                    let (outcome, stats) = searcher.run_interruptible(|| best.load(Ordering::Relaxed) < p);
                    info!("p = {}: {:?} after {} nodes", p, outcome, stats.nodes);
                    match outcome {
                        Outcome::Found(coefficients) => {
                            best.fetch_min(p, Ordering::Relaxed);
                            Some(Encoding { coefficients, modulus: p })
                        }
                        Outcome::Exhausted | Outcome::Interrupted => None,
                    }
                })
            })
            .collect();

        // Wait for all threads to finish
        handles
            .into_iter()
            .filter_map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let result = found.into_iter().min_by_key(|e| e.modulus);
    match &result {
        Some(e) => info!("Found encoding {:?} mod {}", e.coefficients, e.modulus),
        None => info!("No encoding found for p in [{}, {}]", config.p_min, config.p_max),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::table::{FnFunction, TruthTable};

    #[test]
    fn test_primes_window() {
        let config = SearchConfig::window(5, 20);
        assert_eq!(config.primes().collect::<Vec<_>>(), vec![5, 7, 11, 13, 17, 19]);
        assert_eq!(SearchConfig::default().primes().count(), PRIMES.len());
        assert_eq!(SearchConfig::window(24, 28).primes().count(), 0);
    }

    #[test]
    fn test_invalid_window() {
        let and = TruthTable::from_bools(&[false, false, false, true]).unwrap();
        let res = find_encoding(&and, &Symmetries::none(), &SearchConfig::window(7, 3));
        assert!(matches!(res, Err(Error::InvalidWindow { p_min: 7, p_max: 3 })));
    }

    #[test]
    fn test_and() {
        let and = TruthTable::from_bools(&[false, false, false, true]).unwrap();
        let enc = find_encoding(&and, &Symmetries::none(), &SearchConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(enc, Encoding { coefficients: vec![1, 1], modulus: 3 });
        enc.verify(&and).unwrap();
    }

    #[test]
    fn test_window_excludes_solution() {
        // AND needs p >= 3.
        let and = TruthTable::from_bools(&[false, false, false, true]).unwrap();
        let res = find_encoding(&and, &Symmetries::none(), &SearchConfig::window(2, 2)).unwrap();
        assert_eq!(res, None);
        let res = find_encoding(&and, &Symmetries::none(), &SearchConfig::window(4, 6)).unwrap();
        assert_eq!(res.map(|e| e.modulus), Some(5));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let f = FnFunction::new(4, |v: &[bool]| (v[0] && v[1]) ^ (v[2] && v[3]));
        let config = SearchConfig::default();
        let seq = find_encoding(&f, &Symmetries::none(), &config).unwrap();
        let par = find_encoding_parallel(&f, &Symmetries::none(), &config).unwrap();
        assert_eq!(seq, par);
        if let Some(enc) = par {
            enc.verify(&f).unwrap();
        }
    }

    #[test]
    fn test_parallel_empty_window() {
        let and = TruthTable::from_bools(&[false, false, false, true]).unwrap();
        let config = SearchConfig {
            p_min: 24,
            p_max: 28,
            parallel: true,
        };
        assert_eq!(find_encoding(&and, &Symmetries::none(), &config).unwrap(), None);
    }

    #[test]
    fn test_find_verified() {
        let xor = TruthTable::from_bools(&[false, true, true, false]).unwrap();
        let enc = find_verified_encoding(&xor, &Symmetries::none(), &SearchConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(enc.modulus, 2);
        assert_eq!(enc.coefficients, vec![1, 1]);
    }
}
