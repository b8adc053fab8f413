//! Error types for sequence analysis.
//!
//! All failures are deterministic input problems: they are raised where they
//! are detected and handed straight back to the caller.

use thiserror::Error;

/// Errors raised by the analysis core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnaError {
    #[error("Invalid nucleotide '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("Sequences must be of the same length (reference: {reference}, observed: {observed})")]
    LengthMismatch { reference: usize, observed: usize },

    #[error("Cannot compute GC content of an empty sequence")]
    EmptySequence,
}

/// Result type for analysis operations.
pub type DnaResult<T> = Result<T, DnaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DnaError::InvalidSymbol { symbol: 'X', position: 4 };
        assert_eq!(err.to_string(), "Invalid nucleotide 'X' at position 4");

        let err = DnaError::LengthMismatch { reference: 3, observed: 2 };
        assert!(err.to_string().contains("reference: 3, observed: 2"));
    }
}
