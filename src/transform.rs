//! Whole-sequence transforms: reverse complement and GC content.

use crate::error::{DnaError, DnaResult};
use crate::model::Nucleotide;

/// Reverse complements a DNA sequence.
///
/// Every symbol must be an uppercase A/C/G/T; the first one that is not
/// fails the whole call. The empty sequence maps to itself.
///
/// # Examples
///
/// ```
/// use dnakit::transform::reverse_complement;
///
/// assert_eq!(reverse_complement("ATCG").unwrap(), "CGAT");
/// assert_eq!(reverse_complement("").unwrap(), "");
/// assert!(reverse_complement("ATNG").is_err());
/// ```
pub fn reverse_complement(sequence: &str) -> DnaResult<String> {
    let bases = sequence
        .chars()
        .enumerate()
        .map(|(position, symbol)| {
            Nucleotide::from_char(symbol).ok_or(DnaError::InvalidSymbol { symbol, position })
        })
        .collect::<DnaResult<Vec<_>>>()?;

    Ok(bases.iter().rev().map(|b| b.complement().as_char()).collect())
}

/// Percentage of G and C symbols in `sequence`, in `[0, 100]`.
///
/// Symbols other than G and C (including lowercase and invalid ones) count
/// toward the length only. An empty sequence is an error rather than NaN.
pub fn gc_content(sequence: &str) -> DnaResult<f64> {
    let mut total = 0usize;
    let mut gc = 0usize;
    for c in sequence.chars() {
        total += 1;
        if matches!(c, 'G' | 'C') {
            gc += 1;
        }
    }

    if total == 0 {
        return Err(DnaError::EmptySequence);
    }

    Ok(gc as f64 / total as f64 * 100.0)
}
