//! # linsep: linear separating encodings of boolean functions
//!
//! **`linsep`** searches for a *linear separating encoding* of a boolean function
//! `f: {0,1}^l → {0,1}`: a small prime `p` and a coefficient vector `q` such that the
//! residues `(q · v) mod p` of true inputs and of false inputs never coincide.
//! Such encodings let a boolean circuit (for instance an AES S-box built from AND
//! and XOR gates) be evaluated over the larger alphabet `Z/pZ`, with every gate
//! output recovered from a single residue.
//!
//! ## How the search works
//!
//! - Every pair of a false input `x` and a true input `y` gives a constraint
//!   `q · (x - y) ≢ 0 (mod p)`. Constraints are deduplicated up to sign and filed
//!   under the index of their last nonzero coordinate ([`builder`]).
//! - A backtracking search fixes `q[0] = 1` and extends `q` one coordinate at a time.
//!   At depth `k` every constraint of depth `k` forbids exactly one value of `q[k]`
//!   (its *pivot*), and declared leaf symmetries forbid values below a predecessor's
//!   coefficient ([`search`]).
//! - Primes `2, 3, 5, …, 31` are tried in ascending order within a configurable window
//!   ([`driver`]), optionally on parallel threads.
//! - The result can be re-checked independently by projecting every input
//!   ([`validate`]).
//!
//! ## Basic Usage
//!
//! ```rust
//! use linsep::driver::{find_encoding, SearchConfig};
//! use linsep::symmetry::Symmetries;
//! use linsep::table::TruthTable;
//!
//! // f(a, b) = a XOR b, outputs listed for inputs 00, 01, 10, 11.
//! let xor = TruthTable::from_bools(&[false, true, true, false]).unwrap();
//!
//! let enc = find_encoding(&xor, &Symmetries::none(), &SearchConfig::default())
//!     .unwrap()
//!     .expect("XOR is linear mod 2");
//! assert_eq!(enc.modulus, 2);
//!
//! let residues = enc.verify(&xor).unwrap();
//! assert!(residues.false_residues.is_disjoint(&residues.true_residues));
//! ```
//!
//! ## Core Components
//!
//! - **[`bits`]**: boolean vector ↔ integer codec.
//! - **[`table`]**: truth tables and the [`BooleanFunction`][crate::table::BooleanFunction] trait.
//! - **[`constraint`]**: sign-symmetric constraints.
//! - **[`builder`]**: input partition and the depth-indexed constraint index.
//! - **[`search`]**: the pruned backtracking searcher for one modulus.
//! - **[`driver`]**: prime iteration, sequential or parallel.
//! - **[`validate`]**: the independent encoding validator.
//! - **[`artifact`]** and **[`io`]**: the (leaves, truth table, symmetries) bundle and its file format.

pub mod artifact;
pub mod bits;
pub mod builder;
pub mod constraint;
pub mod driver;
pub mod error;
pub mod io;
pub mod residue;
pub mod search;
pub mod symmetry;
pub mod table;
pub mod validate;
