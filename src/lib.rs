//! # dnakit - DNA Sequence Analysis
//!
//! Small, pure analyses over in-memory DNA sequences, with a thin
//! command-line front end.
//!
//! ## Architecture
//!
//! The analysis core is a set of stateless functions; the only shared data
//! is the read-only standard codon table:
//! - `genetic_code`: Codon tables, codon lookup and translation
//! - `validate`: Alphabet check (uppercase A, C, G, T)
//! - `transform`: Reverse complement and GC content
//! - `mutation`: Substitution detection and codon mutation classification
//!
//! Around it:
//! - `model`: Nucleotides, sequence records, analysis results
//! - `report`: Combined analysis report (text or JSON)
//! - `fasta`: FASTA input
//! - `commands`: Subcommands of the `dnakit` binary
//!
//! ## Conventions
//!
//! - Sequences are taken as written: no case folding, lowercase is invalid.
//! - Translation reads frame 1, drops a trailing partial codon and skips
//!   codons it cannot translate.
//! - Only substitutions are modeled; there is no indel detection.

pub mod commands;
pub mod error;
pub mod fasta;
pub mod genetic_code;
pub mod model;
pub mod mutation;
pub mod report;
pub mod transform;
pub mod validate;

pub use error::{DnaError, DnaResult};
pub use genetic_code::{translate, CodonTable, GeneticCodes, Residue};
pub use model::{AnalysisResult, Nucleotide, Sequence};
pub use mutation::{classify_mutations, detect_substitutions, CodonMutation, MutationClass, PositionalSubstitution};
pub use transform::{gc_content, reverse_complement};
pub use validate::validate;
