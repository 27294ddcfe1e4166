//! Boolean functions: materialized truth tables and callables.
//!
//! A boolean function `f: {0,1}^l → {0,1}` is consumed through the
//! [`BooleanFunction`] trait. [`TruthTable`] stores all `2^l` outputs as the bits of a
//! `BigUint`, where bit `i` is `f(from_int(i, l))`. [`FnFunction`] wraps a closure.

use num_bigint::BigUint;

use crate::bits::{self, MAX_ARITY};
use crate::error::{Error, Result};

/// A boolean function with a fixed number of inputs.
pub trait BooleanFunction {
    /// Number of inputs `l`.
    fn arity(&self) -> usize;

    /// Evaluates the function on a vector of length [`arity`](Self::arity).
    ///
    /// Passing a vector of another length is a caller bug; implementations may
    /// panic. Use [`try_eval`](Self::try_eval) for vectors from outside the crate.
    fn eval(&self, input: &[bool]) -> bool;

    /// Like [`eval`](Self::eval), but checks the input length first.
    fn try_eval(&self, input: &[bool]) -> Result<bool> {
        if input.len() != self.arity() {
            return Err(Error::ArityMismatch {
                expected: self.arity(),
                actual: input.len(),
            });
        }
        Ok(self.eval(input))
    }
}

impl<F: BooleanFunction + ?Sized> BooleanFunction for &F {
    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn eval(&self, input: &[bool]) -> bool {
        (**self).eval(input)
    }
}

/// Checks that a function's arity is usable by the search.
pub fn check_arity(f: &impl BooleanFunction) -> Result<usize> {
    match f.arity() {
        0 => Err(Error::EmptyArity),
        l if l > MAX_ARITY => Err(Error::ValueOutOfRange {
            value: l as u64,
            padding: MAX_ARITY,
        }),
        l => Ok(l),
    }
}

/// A truth table for a boolean function on `n` inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    n: usize,
    bits: BigUint,
}

impl TruthTable {
    /// Creates a truth table from a big integer, where bit `i` is the output on input `i`.
    pub fn new(n: usize, bits: BigUint) -> Result<Self> {
        if n == 0 {
            return Err(Error::EmptyArity);
        }
        if n > MAX_ARITY {
            return Err(Error::ValueOutOfRange {
                value: n as u64,
                padding: MAX_ARITY,
            });
        }
        if bits.bits() > 1u64 << n {
            return Err(Error::Parse(format!(
                "truth table has {} significant bits, but arity {} allows only {}",
                bits.bits(),
                n,
                1u64 << n
            )));
        }
        Ok(Self { n, bits })
    }

    /// Creates the constant zero function.
    pub fn zero(n: usize) -> Self {
        assert!(n >= 1 && n <= MAX_ARITY, "Arity should be in the range 1..={}", MAX_ARITY);
        Self { n, bits: BigUint::default() }
    }

    /// Tabulates `f` over all `2^n` inputs.
    pub fn from_fn(n: usize, f: impl Fn(&[bool]) -> bool) -> Self {
        let mut table = Self::zero(n);
        for (i, input) in bits::all_vectors(n).enumerate() {
            if f(&input) {
                table.bits.set_bit(i as u64, true);
            }
        }
        table
    }

    /// Creates a truth table from its outputs listed in [`to_int`](bits::to_int) order.
    ///
    /// The length must be `2^n` for some `n >= 1`.
    pub fn from_bools(outputs: &[bool]) -> Result<Self> {
        let len = outputs.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(Error::TableLength { len });
        }
        let n = len.trailing_zeros() as usize;
        let mut table = Self::zero(n);
        for (i, &out) in outputs.iter().enumerate() {
            if out {
                table.bits.set_bit(i as u64, true);
            }
        }
        Ok(table)
    }

    /// Number of inputs.
    pub fn arity(&self) -> usize {
        self.n
    }

    /// Number of rows, `2^n`.
    pub fn len(&self) -> u64 {
        1 << self.n
    }

    /// Truth tables always have at least two rows.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn bits(&self) -> &BigUint {
        &self.bits
    }

    /// Output on the input with integer encoding `i`.
    pub fn eval_index(&self, i: u64) -> bool {
        assert!(i < self.len(), "Input index out of range");
        self.bits.bit(i)
    }

    /// Sets the output on the input with integer encoding `i`.
    pub fn set(&mut self, i: u64, value: bool) {
        assert!(i < self.len(), "Input index out of range");
        self.bits.set_bit(i, value);
    }

    /// Number of true outputs.
    pub fn count_ones(&self) -> u64 {
        self.bits.count_ones()
    }

    /// Outputs in [`to_int`](bits::to_int) order.
    pub fn outputs(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| self.bits.bit(i))
    }
}

impl BooleanFunction for TruthTable {
    fn arity(&self) -> usize {
        self.n
    }

    fn eval(&self, input: &[bool]) -> bool {
        assert_eq!(input.len(), self.n, "Input length mismatch");
        self.eval_index(bits::to_int(input))
    }
}

/// A boolean function given as a closure over input vectors.
pub struct FnFunction<F> {
    arity: usize,
    f: F,
}

impl<F> FnFunction<F>
where
    F: Fn(&[bool]) -> bool,
{
    pub fn new(arity: usize, f: F) -> Self {
        Self { arity, f }
    }

    /// Materializes the function into a [`TruthTable`].
    pub fn tabulate(&self) -> Result<TruthTable> {
        let n = check_arity(self)?;
        Ok(TruthTable::from_fn(n, &self.f))
    }
}

impl<F> BooleanFunction for FnFunction<F>
where
    F: Fn(&[bool]) -> bool,
{
    fn arity(&self) -> usize {
        self.arity
    }

    fn eval(&self, input: &[bool]) -> bool {
        (self.f)(input)
    }
}
