//! FASTA input.
//!
//! Reads named sequences for the command-line front end. Both single-line
//! and multi-line records are accepted.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::model::Sequence;

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses a FASTA file into its records.
///
/// # Examples
///
/// ```no_run
/// use dnakit::fasta::parse_fasta_file;
///
/// let records = parse_fasta_file("reference.fasta").unwrap();
/// println!("Loaded {} sequences", records.len());
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<Vec<Sequence>> {
    let file = File::open(path)?;
    parse_fasta(BufReader::new(file))
}

/// Parses FASTA content from a reader.
///
/// Symbols are kept exactly as written: no case folding, no filtering
/// beyond whitespace removal.
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<Vec<Sequence>> {
    let mut sequences = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_seq = String::new();

    for (index, line_result) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                sequences.push(Sequence::new(id, std::mem::take(&mut current_seq)));
            }

            // ID is everything before the first space
            let id = header.split_whitespace().next().unwrap_or("");
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }

            current_id = Some(id.to_string());
        } else {
            if current_id.is_none() {
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }
            current_seq.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    if let Some(id) = current_id {
        sequences.push(Sequence::new(id, current_seq));
    }

    if sequences.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    Ok(sequences)
}

/// Parses FASTA content from a string.
pub fn parse_fasta_str(content: &str) -> FastaResult<Vec<Sequence>> {
    parse_fasta(content.as_bytes())
}
