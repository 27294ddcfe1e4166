//! Error type shared by the whole crate.
//!
//! Exhausting the prime range is *not* an error: the driver reports it as `Ok(None)`.
//! Everything here is either a caller contract violation (bad input), a failure to
//! read or parse a table artifact, or [`Error::Unsound`], which means the search
//! produced an encoding that does not actually separate the function.

use std::fmt;
use std::io;

/// Error type for the search engine and the table artifact I/O.
#[derive(Debug)]
pub enum Error {
    /// A function over zero inputs was supplied.
    EmptyArity,
    /// A vector of the wrong length was passed for a function of known arity.
    ArityMismatch { expected: usize, actual: usize },
    /// A materialized truth table whose length is not `2^l` for some `l >= 1`.
    TableLength { len: usize },
    /// An integer that does not fit into `padding` bits.
    ValueOutOfRange { value: u64, padding: usize },
    /// Two vectors that should have the same length do not.
    LengthMismatch { left: usize, right: usize },
    /// The number of leaf labels does not match the truth table arity.
    LeafCountMismatch { leaves: usize, arity: usize },
    /// A malformed symmetry chain.
    InvalidSymmetry(String),
    /// A malformed or duplicate leaf label.
    InvalidLeaf(String),
    /// A modulus below 2, which has no nonzero residue to separate with.
    InvalidModulus { modulus: u32 },
    /// An empty prime window.
    InvalidWindow { p_min: u32, p_max: u32 },
    /// The validator found a residue shared by a true input and a false input.
    Unsound { modulus: u32, residue: u32 },
    /// File I/O error.
    Io(io::Error),
    /// Table artifact parse error with message.
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyArity => write!(f, "boolean function must have at least one input"),
            Error::ArityMismatch { expected, actual } => {
                write!(f, "expected a vector of length {}, got {}", expected, actual)
            }
            Error::TableLength { len } => {
                write!(f, "truth table length {} is not a power of two (at least 2)", len)
            }
            Error::ValueOutOfRange { value, padding } => {
                write!(f, "value {} does not fit into {} bits", value, padding)
            }
            Error::LengthMismatch { left, right } => {
                write!(f, "vector lengths differ: {} vs {}", left, right)
            }
            Error::LeafCountMismatch { leaves, arity } => {
                write!(f, "{} leaves given for a function of arity {}", leaves, arity)
            }
            Error::InvalidSymmetry(msg) => write!(f, "invalid symmetry: {}", msg),
            Error::InvalidLeaf(msg) => write!(f, "invalid leaf: {}", msg),
            Error::InvalidModulus { modulus } => write!(f, "modulus must be at least 2, got {}", modulus),
            Error::InvalidWindow { p_min, p_max } => {
                write!(f, "empty prime window [{}, {}]", p_min, p_max)
            }
            Error::Unsound { modulus, residue } => write!(
                f,
                "encoding is not separating: residue {} mod {} is reached by both true and false inputs",
                residue, modulus
            ),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}
