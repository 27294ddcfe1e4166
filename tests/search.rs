//! End-to-end tests for the encoding search.
//!
//! Tests cover the named scenarios (XOR, AND, symmetric leaves), soundness and
//! completeness of the search against the validator and a brute-force enumeration,
//! and the table artifact round trip.

use linsep::artifact::TableArtifact;
use linsep::bits;
use linsep::builder::{partition, ConstraintIndex};
use linsep::driver::{find_encoding, find_encoding_parallel, search_primes, SearchConfig, PRIMES};
use linsep::error::Error;
use linsep::search::Searcher;
use linsep::symmetry::Symmetries;
use linsep::table::{BooleanFunction, FnFunction, TruthTable};
use linsep::validate::validate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_table(rng: &mut impl Rng, n: usize) -> TruthTable {
    let outputs: Vec<bool> = (0..1usize << n).map(|_| rng.random_bool(0.5)).collect();
    TruthTable::from_bools(&outputs).unwrap()
}

/// Enumerates all `q` with `q[0] = 1` in canonical symmetry order and reports
/// whether any of them separates `f` modulo `p`.
fn brute_force_exists(f: &TruthTable, sym: &Symmetries, p: u32) -> bool {
    let l = f.arity();
    let free = (l - 1) as u32;
    (0..(p as u64).pow(free)).any(|mut code| {
        let mut q = vec![1u32];
        for _ in 0..free {
            q.push((code % p as u64) as u32);
            code /= p as u64;
        }
        sym.is_canonical(&q) && validate(f, &q, p).is_ok()
    })
}

// ─── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn xor_two_inputs() {
    let xor = TruthTable::from_bools(&[false, true, true, false]).unwrap();
    let enc = find_encoding(&xor, &Symmetries::none(), &SearchConfig::default())
        .unwrap()
        .unwrap();
    // XOR is linear over GF(2).
    assert_eq!(enc.modulus, 2);
    assert_eq!(enc.coefficients, vec![1, 1]);
    let residues = enc.verify(&xor).unwrap();
    assert!(residues.false_residues.is_disjoint(&residues.true_residues));

    // Without p = 2, the next prime works too.
    let enc = find_encoding(&xor, &Symmetries::none(), &SearchConfig::window(3, 31))
        .unwrap()
        .unwrap();
    assert_eq!(enc.modulus, 3);
    enc.verify(&xor).unwrap();
}

#[test]
fn and_two_inputs() {
    let and = TruthTable::from_bools(&[false, false, false, true]).unwrap();
    let enc = find_encoding(&and, &Symmetries::none(), &SearchConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(enc.modulus, 3);
    assert_eq!(enc.coefficients[0], 1);
    assert_eq!(enc.coefficients, vec![1, 1]);
    enc.verify(&and).unwrap();
}

#[test]
fn symmetric_leaves_are_ordered() {
    // f = a AND (b OR c): b and c are interchangeable.
    let f = TruthTable::from_fn(3, |v| v[0] && (v[1] || v[2]));
    let sym = Symmetries::new(vec![vec![1, 2]], 3).unwrap();
    let enc = find_encoding(&f, &sym, &SearchConfig::default()).unwrap().unwrap();
    enc.verify(&f).unwrap();
    assert!(enc.coefficients[1] <= enc.coefficients[2]);
}

#[test]
fn symmetric_sum_of_two_leaves() {
    // f depends only on b + c.
    let f = TruthTable::from_fn(3, |v| v[0] ^ (v[1] as u8 + v[2] as u8 == 1));
    let sym = Symmetries::new(vec![vec![1, 2]], 3).unwrap();
    let enc = find_encoding(&f, &sym, &SearchConfig::default()).unwrap().unwrap();
    enc.verify(&f).unwrap();
    assert!(enc.coefficients[1] <= enc.coefficients[2]);
}

#[test]
fn constant_function() {
    let f = TruthTable::from_fn(3, |_| true);
    let enc = find_encoding(&f, &Symmetries::none(), &SearchConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(enc.modulus, 2);
    assert_eq!(enc.coefficients, vec![1, 0, 0]);
}

#[test]
fn single_input() {
    let id = TruthTable::from_bools(&[false, true]).unwrap();
    let enc = find_encoding(&id, &Symmetries::none(), &SearchConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(enc.coefficients, vec![1]);
    enc.verify(&id).unwrap();
}

#[test]
fn callable_function() {
    let f = FnFunction::new(4, |v: &[bool]| (v[0] && v[1]) ^ v[2] ^ v[3]);
    let index = ConstraintIndex::build(&f).unwrap();
    let from_table = ConstraintIndex::build(&f.tabulate().unwrap()).unwrap();
    assert_eq!(index.to_matrix(), from_table.to_matrix());
    if let Some(enc) = search_primes(&index, &Symmetries::none(), &SearchConfig::default()).unwrap() {
        enc.verify(&f).unwrap();
    }
}

// ─── Soundness & Completeness ──────────────────────────────────────────────────

#[test]
fn search_success_implies_validation() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for n in 2..=6 {
        for _ in 0..20 {
            let f = random_table(&mut rng, n);
            let index = ConstraintIndex::build(&f).unwrap();
            let sym = Symmetries::none();
            for p in PRIMES {
                let searcher = Searcher::new(&index, &sym, p).unwrap();
                if let Some(q) = searcher.run() {
                    assert_eq!(q.len(), n);
                    assert_eq!(q[0], 1);
                    assert!(q.iter().all(|&x| x < p));
                    validate(&f, &q, p).unwrap();
                }
            }
        }
    }
}

#[test]
fn search_matches_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for n in 2..=4 {
        for _ in 0..30 {
            let f = random_table(&mut rng, n);
            let index = ConstraintIndex::build(&f).unwrap();
            let sym = Symmetries::none();
            for p in [2, 3, 5, 7] {
                let searcher = Searcher::new(&index, &sym, p).unwrap();
                assert_eq!(
                    searcher.run().is_some(),
                    brute_force_exists(&f, &sym, p),
                    "n = {}, p = {}, f = {:?}",
                    n,
                    p,
                    f
                );
            }
        }
    }
}

#[test]
fn symmetry_pruning_keeps_completeness() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..40 {
        // Functions symmetric in leaves 1 and 2.
        let base = random_table(&mut rng, 3);
        let f = TruthTable::from_fn(4, |v| {
            let (lo, hi) = if v[1] <= v[2] { (v[1], v[2]) } else { (v[2], v[1]) };
            base.eval(&[v[0], lo, hi]) ^ v[3]
        });
        let sym = Symmetries::new(vec![vec![1, 2]], 4).unwrap();
        let index = ConstraintIndex::build(&f).unwrap();
        for p in [2, 3, 5, 7] {
            let searcher = Searcher::new(&index, &sym, p).unwrap();
            let found = searcher.run();
            assert_eq!(found.is_some(), brute_force_exists(&f, &sym, p));
            if let Some(q) = found {
                assert!(sym.is_canonical(&q));
                validate(&f, &q, p).unwrap();
            }
        }
    }
}

#[test]
fn parallel_driver_matches_sequential() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..10 {
        let f = random_table(&mut rng, 5);
        let config = SearchConfig::default();
        let seq = find_encoding(&f, &Symmetries::none(), &config).unwrap();
        let par = find_encoding_parallel(&f, &Symmetries::none(), &config).unwrap();
        assert_eq!(seq, par);
    }
}

#[test]
fn validator_is_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let f = random_table(&mut rng, 5);
    for _ in 0..20 {
        let q: Vec<u32> = (0..5).map(|_| rng.random_range(0..11)).collect();
        let a = validate(&f, &q, 11).map(|r| r.true_residues).map_err(|e| e.to_string());
        let b = validate(&f, &q, 11).map(|r| r.true_residues).map_err(|e| e.to_string());
        assert_eq!(a, b);
    }
}

#[test]
fn unsound_encoding_is_distinct_error() {
    let and = TruthTable::from_bools(&[false, false, false, true]).unwrap();
    let err = validate(&and, &[1, 2], 3).unwrap_err();
    assert!(matches!(err, Error::Unsound { modulus: 3, .. }));
}

// ─── Partition ─────────────────────────────────────────────────────────────────

#[test]
fn partition_covers_all_inputs() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for n in 1..=8 {
        let f = random_table(&mut rng, n);
        let part = partition(&f).unwrap();
        assert_eq!(part.false_set.len() + part.true_set.len(), 1 << n);
        for &x in &part.true_set {
            assert!(f.eval(&bits::from_int(x, n).unwrap()));
        }
        for &x in &part.false_set {
            assert!(!f.eval(&bits::from_int(x, n).unwrap()));
        }
    }
}

// ─── Artifacts ─────────────────────────────────────────────────────────────────

#[test]
fn artifact_survives_file_and_search() {
    // z = (y1 & y2) ^ (y3 & y4) with both AND gates symmetric.
    let table = TruthTable::from_fn(4, |v| (v[0] && v[1]) ^ (v[2] && v[3]));
    let leaves = ["y1", "y2", "y3", "y4"].iter().map(|s| s.to_string()).collect();
    let artifact = TableArtifact::new(leaves, table, vec![vec![0, 1], vec![2, 3]]).unwrap();

    let path = std::env::temp_dir().join(format!("linsep-artifact-{}.table", std::process::id()));
    artifact.save(&path).unwrap();
    let loaded = TableArtifact::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, artifact);

    let config = SearchConfig::default();
    let a = artifact.search_verified(&config).unwrap();
    let b = loaded.search_verified(&config).unwrap();
    assert_eq!(a, b);
    if let Some(enc) = a {
        assert!(enc.get("y1").unwrap() <= enc.get("y2").unwrap());
        assert!(enc.get("y3").unwrap() <= enc.get("y4").unwrap());
        validate(loaded.table(), &enc.coefficients(), enc.modulus).unwrap();
    }
}
