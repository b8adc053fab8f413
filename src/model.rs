//! Data model for sequence analysis.
//!
//! This module contains the value types shared by the analysis modules:
//! - Nucleotides and named sequence records
//! - The union of analysis outputs handed back to callers
//!
//! Everything here is built fresh per call and never shared mutably.

use std::fmt;

use serde::Serialize;

use crate::mutation::{CodonMutation, PositionalSubstitution};

/// One of the four recognized DNA bases.
///
/// Only uppercase symbols are accepted; there is no case folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    /// Parses an uppercase base symbol.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Nucleotide::A),
            'C' => Some(Nucleotide::C),
            'G' => Some(Nucleotide::G),
            'T' => Some(Nucleotide::T),
            _ => None,
        }
    }

    /// Watson-Crick partner: A<->T, C<->G.
    pub fn complement(self) -> Self {
        match self {
            Nucleotide::A => Nucleotide::T,
            Nucleotide::T => Nucleotide::A,
            Nucleotide::C => Nucleotide::G,
            Nucleotide::G => Nucleotide::C,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
        }
    }

    /// True for G and C.
    pub fn is_gc(self) -> bool {
        matches!(self, Nucleotide::G | Nucleotide::C)
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Represents a single sequence with its identifier and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence identifier (from FASTA header, without '>')
    pub id: String,
    /// The raw sequence symbols, case preserved
    pub data: String,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }
}

/// The outcome of a single analysis operation.
///
/// Serializes as a one-key JSON object named after the operation, e.g.
/// `{"reverse_complement": "CGAT"}` or `{"mutations": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisResult {
    ReverseComplement(String),
    GcContent(f64),
    ProteinSequence(String),
    Mutations(Vec<PositionalSubstitution>),
    CodonMutations(Vec<CodonMutation>),
    Validation { valid: bool, message: String },
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisResult::ReverseComplement(seq) | AnalysisResult::ProteinSequence(seq) => {
                write!(f, "{}", seq)
            }
            AnalysisResult::GcContent(pct) => write!(f, "{:.2}", pct),
            AnalysisResult::Mutations(records) => {
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", record)?;
                }
                Ok(())
            }
            AnalysisResult::CodonMutations(records) => {
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", record)?;
                }
                Ok(())
            }
            AnalysisResult::Validation { message, .. } => write!(f, "{}", message),
        }
    }
}
