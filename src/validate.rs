//! Nucleotide alphabet validation.
//!
//! A sequence is valid when every symbol is an uppercase A, T, C or G.
//! The empty sequence is vacuously valid.

use crate::model::Nucleotide;

/// Returns true iff every symbol of `sequence` is one of A, T, C, G.
///
/// # Examples
///
/// ```
/// use dnakit::validate::validate;
///
/// assert!(validate("ATCG"));
/// assert!(!validate("ATCGX"));
/// assert!(validate(""));
/// ```
pub fn validate(sequence: &str) -> bool {
    first_invalid(sequence).is_none()
}

/// Finds the first symbol outside the alphabet, with its position.
pub fn first_invalid(sequence: &str) -> Option<(usize, char)> {
    sequence
        .chars()
        .enumerate()
        .find(|&(_, c)| Nucleotide::from_char(c).is_none())
}
