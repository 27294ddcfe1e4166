//! File I/O for table artifacts.
//!
//! # Table File Format (.table)
//!
//! ```text
//! table <arity>
//! L <index> <label>          # one line per leaf, indices 0..arity
//! S <i> <j> [<k> ...]        # one line per symmetry chain
//! T <hex>                    # truth table, bit i = output on input i
//! ```
//!
//! Lines starting with `c` are comments. Inputs are numbered most significant leaf
//! first, so bit `i` of the truth table is the output on `from_int(i, arity)`.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use num_bigint::BigUint;

use crate::artifact::TableArtifact;
use crate::error::{Error, Result};
use crate::table::TruthTable;

impl TableArtifact {
    /// Saves the artifact to a file in table format.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use linsep::artifact::TableArtifact;
    /// use linsep::table::TruthTable;
    ///
    /// let table = TruthTable::from_bools(&[false, true, true, false]).unwrap();
    /// let artifact = TableArtifact::new(vec!["y1".into(), "y2".into()], table, vec![vec![0, 1]]).unwrap();
    /// artifact.save("z0.table").unwrap();
    /// ```
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_table_string();
        fs::write(path, content)?;
        Ok(())
    }

    /// Converts the artifact to table format string.
    pub fn to_table_string(&self) -> String {
        let mut output = String::new();

        // Header
        writeln!(output, "c leaves are listed most significant first").unwrap();
        writeln!(output, "c").unwrap();
        writeln!(output, "c file syntax:").unwrap();
        writeln!(output, "c table number-of-leaves").unwrap();
        writeln!(output, "c L index-of-leaf label-of-leaf").unwrap();
        writeln!(output, "c S index-of-leaf index-of-leaf ...").unwrap();
        writeln!(output, "c T truth-table-in-hex").unwrap();
        writeln!(output, "c").unwrap();

        writeln!(output, "table {}", self.leaves().len()).unwrap();
        for (i, leaf) in self.leaves().iter().enumerate() {
            writeln!(output, "L {} {}", i, leaf).unwrap();
        }
        for chain in self.symmetries().chains() {
            write!(output, "S").unwrap();
            for leaf in chain {
                write!(output, " {}", leaf).unwrap();
            }
            output.push('\n');
        }
        writeln!(output, "T {}", self.table().bits().to_str_radix(16)).unwrap();

        output
    }

    /// Reads an artifact from a file in table format.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_table_string(&content)
    }

    /// Parses an artifact from table format string.
    pub fn from_table_string(content: &str) -> Result<Self> {
        let mut lines = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('c') && !line.is_empty());

        // Parse header
        let header = lines.next().ok_or_else(|| Error::Parse("Missing header".into()))?;
        let parts: Vec<&str> = header.split_whitespace().collect();
        if parts.len() != 2 || parts[0] != "table" {
            return Err(Error::Parse(format!("Invalid header: {}", header)));
        }
        let arity: usize = parts[1]
            .parse()
            .map_err(|_| Error::Parse(format!("Invalid arity: {}", parts[1])))?;

        let mut leaves: Vec<String> = Vec::with_capacity(arity);
        let mut symmetries: Vec<Vec<usize>> = Vec::new();
        let mut bits: Option<BigUint> = None;

        for line in lines {
            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "L" => {
                    if parts.len() != 3 {
                        return Err(Error::Parse(format!("Invalid leaf line: {}", line)));
                    }
                    let index: usize = parts[1]
                        .parse()
                        .map_err(|_| Error::Parse(format!("Invalid leaf index in: {}", line)))?;
                    if index != leaves.len() {
                        return Err(Error::Parse(format!(
                            "Leaf index {} out of order, expected {}",
                            index,
                            leaves.len()
                        )));
                    }
                    leaves.push(parts[2].to_string());
                }
                "S" => {
                    let chain = parts[1..]
                        .iter()
                        .map(|s| {
                            s.parse::<usize>()
                                .map_err(|_| Error::Parse(format!("Invalid symmetry leaf in: {}", line)))
                        })
                        .collect::<Result<Vec<_>>>()?;
                    symmetries.push(chain);
                }
                "T" => {
                    if bits.is_some() {
                        return Err(Error::Parse("Duplicate truth table".into()));
                    }
                    if parts.len() != 2 {
                        return Err(Error::Parse(format!("Invalid truth table line: {}", line)));
                    }
                    let value = BigUint::parse_bytes(parts[1].as_bytes(), 16)
                        .ok_or_else(|| Error::Parse(format!("Invalid hex truth table: {}", parts[1])))?;
                    bits = Some(value);
                }
                other => return Err(Error::Parse(format!("Unknown line type: {}", other))),
            }
        }

        let bits = bits.ok_or_else(|| Error::Parse("Missing truth table".into()))?;
        let table = TruthTable::new(arity, bits)?;
        TableArtifact::new(leaves, table, symmetries)
    }
}
