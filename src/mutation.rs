//! Mutation detection between a reference and an observed sequence.
//!
//! Two comparisons are offered, both requiring sequences of equal length:
//! - `detect_substitutions`: base-by-base differences
//! - `classify_mutations`: codon-by-codon differences, classified as
//!   silent, missense or nonsense
//!
//! Only substitutions are modeled. Insertions and deletions are not
//! detected; a shifted sequence simply shows up as a run of substitutions.

use std::fmt;

use serde::Serialize;

use crate::error::{DnaError, DnaResult};
use crate::genetic_code::{CodonTable, Residue};

/// A single differing base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionalSubstitution {
    /// 0-based index into both sequences
    pub position: usize,
    pub reference_base: char,
    #[serde(rename = "user_base")]
    pub observed_base: char,
    #[serde(rename = "mutation_type")]
    pub kind: SubstitutionKind,
}

/// Kind of positional change. Only substitutions exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionKind {
    Substitution,
}

impl fmt::Display for PositionalSubstitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}>{}\tsubstitution",
            self.position, self.reference_base, self.observed_base
        )
    }
}

/// Effect of a codon change on the encoded protein.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationClass {
    /// Different codon, same amino acid
    Silent,
    /// Different amino acid
    Missense,
    /// Observed codon is a stop
    Nonsense,
}

impl MutationClass {
    /// Classifies a codon change from the two encoded residues.
    ///
    /// A stop on the observed side wins; otherwise residues are compared
    /// as-is, with `Unknown` equal only to itself.
    pub fn from_residues(reference: Residue, observed: Residue) -> Self {
        if observed.is_stop() {
            MutationClass::Nonsense
        } else if reference != observed {
            MutationClass::Missense
        } else {
            MutationClass::Silent
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MutationClass::Silent => "silent",
            MutationClass::Missense => "missense",
            MutationClass::Nonsense => "nonsense",
        }
    }
}

impl fmt::Display for MutationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A differing codon pair and its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodonMutation {
    /// 0-based index of the first base of the codon
    pub position: usize,
    #[serde(rename = "ref_codon")]
    pub reference_codon: String,
    #[serde(rename = "user_codon")]
    pub observed_codon: String,
    #[serde(rename = "ref_aa")]
    pub reference_amino_acid: Residue,
    #[serde(rename = "user_aa")]
    pub observed_amino_acid: Residue,
    #[serde(rename = "type")]
    pub classification: MutationClass,
}

impl fmt::Display for CodonMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}>{}\t{}>{}\t{}",
            self.position,
            self.reference_codon,
            self.observed_codon,
            self.reference_amino_acid,
            self.observed_amino_acid,
            self.classification
        )
    }
}

fn check_lengths(reference: &[char], observed: &[char]) -> DnaResult<()> {
    if reference.len() != observed.len() {
        return Err(DnaError::LengthMismatch {
            reference: reference.len(),
            observed: observed.len(),
        });
    }
    Ok(())
}

/// Lists every position where `observed` differs from `reference`.
///
/// Records come out in ascending position order.
///
/// # Examples
///
/// ```
/// use dnakit::mutation::detect_substitutions;
///
/// let found = detect_substitutions("ATGC", "ATGG").unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].position, 3);
/// assert!(detect_substitutions("ATG", "AT").is_err());
/// ```
pub fn detect_substitutions(
    reference: &str,
    observed: &str,
) -> DnaResult<Vec<PositionalSubstitution>> {
    let reference: Vec<char> = reference.chars().collect();
    let observed: Vec<char> = observed.chars().collect();
    check_lengths(&reference, &observed)?;

    Ok(reference
        .iter()
        .zip(&observed)
        .enumerate()
        .filter(|(_, (r, o))| r != o)
        .map(|(position, (&reference_base, &observed_base))| PositionalSubstitution {
            position,
            reference_base,
            observed_base,
            kind: SubstitutionKind::Substitution,
        })
        .collect())
}

/// Classifies codon changes using the standard genetic code.
pub fn classify_mutations(reference: &str, observed: &str) -> DnaResult<Vec<CodonMutation>> {
    classify_mutations_with(CodonTable::standard(), reference, observed)
}

/// Classifies codon changes between two equal-length sequences.
///
/// Codons are compared from position 0 in steps of three. A trailing partial
/// codon is never compared, and identical codons produce no record.
pub fn classify_mutations_with(
    table: &CodonTable,
    reference: &str,
    observed: &str,
) -> DnaResult<Vec<CodonMutation>> {
    let reference: Vec<char> = reference.chars().collect();
    let observed: Vec<char> = observed.chars().collect();
    check_lengths(&reference, &observed)?;

    let mut mutations = Vec::new();
    for (index, (ref_codon, obs_codon)) in reference
        .chunks_exact(3)
        .zip(observed.chunks_exact(3))
        .enumerate()
    {
        if ref_codon == obs_codon {
            continue;
        }

        let reference_amino_acid = table.lookup_chars(ref_codon);
        let observed_amino_acid = table.lookup_chars(obs_codon);
        mutations.push(CodonMutation {
            position: index * 3,
            reference_codon: ref_codon.iter().collect(),
            observed_codon: obs_codon.iter().collect(),
            reference_amino_acid,
            observed_amino_acid,
            classification: MutationClass::from_residues(reference_amino_acid, observed_amino_acid),
        });
    }

    Ok(mutations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic_code::GeneticCodes;
    use rstest::rstest;

    #[test]
    fn test_detect_single_substitution() {
        let found = detect_substitutions("ATGC", "ATGG").unwrap();
        assert_eq!(
            found,
            vec![PositionalSubstitution {
                position: 3,
                reference_base: 'C',
                observed_base: 'G',
                kind: SubstitutionKind::Substitution,
            }]
        );
    }

    #[test]
    fn test_detect_ordering_and_identity() {
        let found = detect_substitutions("AAAAAA", "TAATAT").unwrap();
        let positions: Vec<usize> = found.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![0, 3, 5]);

        assert!(detect_substitutions("ACGT", "ACGT").unwrap().is_empty());
        assert!(detect_substitutions("", "").unwrap().is_empty());
    }

    #[test]
    fn test_detect_length_mismatch() {
        assert_eq!(
            detect_substitutions("ATG", "AT"),
            Err(DnaError::LengthMismatch { reference: 3, observed: 2 })
        );
    }

    #[test]
    fn test_detect_does_not_validate() {
        let found = detect_substitutions("ACGT", "ACNT").unwrap();
        assert_eq!(found[0].observed_base, 'N');
    }

    #[rstest]
    #[case("ATGAAA", "ATGAAG", 3, "AAA", "AAG", MutationClass::Silent)]
    #[case("ATGAAA", "ATGTAA", 3, "AAA", "TAA", MutationClass::Nonsense)]
    #[case("ATGAAA", "ATGGAA", 3, "AAA", "GAA", MutationClass::Missense)]
    #[case("TTTGGG", "TTCGGG", 0, "TTT", "TTC", MutationClass::Silent)]
    fn test_classify_single_codon(
        #[case] reference: &str,
        #[case] observed: &str,
        #[case] position: usize,
        #[case] ref_codon: &str,
        #[case] obs_codon: &str,
        #[case] class: MutationClass,
    ) {
        let found = classify_mutations(reference, observed).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].position, position);
        assert_eq!(found[0].reference_codon, ref_codon);
        assert_eq!(found[0].observed_codon, obs_codon);
        assert_eq!(found[0].classification, class);
    }

    #[test]
    fn test_classify_residues() {
        let found = classify_mutations("ATGAAA", "ATGTAA").unwrap();
        assert_eq!(found[0].reference_amino_acid, Residue::Amino('K'));
        assert_eq!(found[0].observed_amino_acid, Residue::Stop);
    }

    #[test]
    fn test_classify_drops_partial_codon() {
        // Trailing "GC" vs "GT" differs but is never compared
        assert!(classify_mutations("ATGGC", "ATGGT").unwrap().is_empty());
        assert!(classify_mutations("AT", "GC").unwrap().is_empty());
    }

    #[test]
    fn test_classify_stop_to_stop_is_nonsense() {
        let found = classify_mutations("TAA", "TAG").unwrap();
        assert_eq!(found[0].classification, MutationClass::Nonsense);
    }

    #[test]
    fn test_classify_unknown_codons() {
        // Unknown differs from a real amino acid
        let found = classify_mutations("AAA", "ANA").unwrap();
        assert_eq!(found[0].observed_amino_acid, Residue::Unknown);
        assert_eq!(found[0].classification, MutationClass::Missense);

        // Two different unknown codons compare equal
        let found = classify_mutations("NNA", "NNC").unwrap();
        assert_eq!(found[0].classification, MutationClass::Silent);
    }

    #[test]
    fn test_classify_length_mismatch() {
        assert_eq!(
            classify_mutations("ATGAAA", "ATGAA"),
            Err(DnaError::LengthMismatch { reference: 6, observed: 5 })
        );
    }

    #[test]
    fn test_classify_with_alternate_code() {
        let codes = GeneticCodes::new();
        let mito = codes.get(2).unwrap();
        // TGG (W) -> TGA: W in vertebrate mitochondria, stop in the standard code
        let found = classify_mutations_with(mito, "TGG", "TGA").unwrap();
        assert_eq!(found[0].classification, MutationClass::Silent);
        let found = classify_mutations("TGG", "TGA").unwrap();
        assert_eq!(found[0].classification, MutationClass::Nonsense);
    }

    #[test]
    fn test_mutation_json_keys() {
        let found = classify_mutations("ATGAAA", "ATGTAA").unwrap();
        let json = serde_json::to_value(&found[0]).unwrap();
        assert_eq!(json["position"], 3);
        assert_eq!(json["ref_codon"], "AAA");
        assert_eq!(json["user_aa"], "*");
        assert_eq!(json["type"], "nonsense");

        let found = detect_substitutions("A", "G").unwrap();
        let json = serde_json::to_value(&found[0]).unwrap();
        assert_eq!(json["user_base"], "G");
        assert_eq!(json["mutation_type"], "substitution");
    }
}
