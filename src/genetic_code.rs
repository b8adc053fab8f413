//! Genetic code definitions and translation logic.
//!
//! This module provides:
//! - Codon tables built from NCBI `ncbieaa` strings (tables 1-6 and 11)
//! - Codon to amino acid lookup
//! - Translation of whole sequences in frame 0
//!
//! The standard table is built once per process and only ever read.

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

/// NCBI `ncbieaa` string for the standard code, in TCAG codon order.
const STANDARD_NCBIEAA: &str = "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

static STANDARD: LazyLock<CodonTable> =
    LazyLock::new(|| CodonTable::new(1, "Standard", STANDARD_NCBIEAA));

/// What a codon encodes.
///
/// `Unknown` is data, not a failure: it is produced for anything that is not
/// three uppercase A/C/G/T symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "Option<char>")]
pub enum Residue {
    /// Single-letter amino acid code
    Amino(char),
    /// Stop codon, written `*`
    Stop,
    Unknown,
}

impl Residue {
    /// The one-letter symbol, `*` for stops, `None` for unknown codons.
    pub fn symbol(self) -> Option<char> {
        match self {
            Residue::Amino(aa) => Some(aa),
            Residue::Stop => Some('*'),
            Residue::Unknown => None,
        }
    }

    pub fn is_stop(self) -> bool {
        self == Residue::Stop
    }
}

impl From<Residue> for Option<char> {
    fn from(residue: Residue) -> Self {
        residue.symbol()
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol().unwrap_or('?'))
    }
}

/// Index of a base in NCBI TCAG order.
fn base_index(c: char) -> Option<usize> {
    match c {
        'T' => Some(0),
        'C' => Some(1),
        'A' => Some(2),
        'G' => Some(3),
        _ => None,
    }
}

/// A genetic code table for translating codons to amino acids.
#[derive(Debug, Clone)]
pub struct CodonTable {
    /// NCBI genetic code ID
    pub id: u8,
    /// Name of the genetic code
    pub name: &'static str,
    /// 64 entries indexed by `b1 * 16 + b2 * 4 + b3` in TCAG order
    residues: [Residue; 64],
}

impl CodonTable {
    /// Creates a new genetic code from an NCBI format string.
    ///
    /// # Arguments
    /// * `id` - NCBI genetic code ID
    /// * `name` - Name of the genetic code
    /// * `ncbieaa` - 64-character string of amino acids (NCBI format)
    fn new(id: u8, name: &'static str, ncbieaa: &str) -> Self {
        let mut residues = [Residue::Unknown; 64];
        for (slot, aa) in residues.iter_mut().zip(ncbieaa.chars()) {
            *slot = match aa {
                '*' => Residue::Stop,
                aa => Residue::Amino(aa),
            };
        }

        Self { id, name, residues }
    }

    /// The standard genetic code (NCBI table 1), shared process-wide.
    pub fn standard() -> &'static CodonTable {
        &STANDARD
    }

    /// Looks up a codon given as a string.
    ///
    /// Anything other than exactly three uppercase A/C/G/T symbols yields
    /// `Residue::Unknown`.
    pub fn lookup(&self, codon: &str) -> Residue {
        let chars: Vec<char> = codon.chars().collect();
        self.lookup_chars(&chars)
    }

    /// Looks up a codon given as a slice of symbols.
    pub fn lookup_chars(&self, codon: &[char]) -> Residue {
        match codon {
            [b1, b2, b3] => match (base_index(*b1), base_index(*b2), base_index(*b3)) {
                (Some(i1), Some(i2), Some(i3)) => self.residues[i1 * 16 + i2 * 4 + i3],
                _ => Residue::Unknown,
            },
            _ => Residue::Unknown,
        }
    }

    /// Translates an entire nucleotide sequence to amino acids.
    ///
    /// Codons are read from position 0 without overlap. A trailing fragment
    /// shorter than three symbols is dropped, and unknown codons contribute
    /// nothing, so the output holds at most `len / 3` residues.
    pub fn translate_sequence(&self, sequence: &str) -> String {
        let chars: Vec<char> = sequence.chars().collect();
        chars
            .chunks_exact(3)
            .filter_map(|codon| self.lookup_chars(codon).symbol())
            .collect()
    }
}

/// Translates a sequence with the standard genetic code.
///
/// # Examples
///
/// ```
/// use dnakit::genetic_code::translate;
///
/// assert_eq!(translate("ATGTTTTAA"), "MF*");
/// assert_eq!(translate("ATGTT"), "M");
/// ```
pub fn translate(sequence: &str) -> String {
    CodonTable::standard().translate_sequence(sequence)
}

/// All available genetic codes.
pub struct GeneticCodes {
    codes: Vec<CodonTable>,
}

impl GeneticCodes {
    /// Creates the set of supported NCBI genetic codes.
    pub fn new() -> Self {
        let codes = vec![
            CodonTable::standard().clone(),
            CodonTable::new(2, "Vertebrate Mitochondrial",
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG"),
            CodonTable::new(3, "Yeast Mitochondrial",
                "FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            CodonTable::new(4, "Mold/Protozoan/Coelenterate Mitochondrial",
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            CodonTable::new(5, "Invertebrate Mitochondrial",
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG"),
            CodonTable::new(6, "Ciliate/Dasycladacean/Hexamita Nuclear",
                "FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            CodonTable::new(11, "Bacterial/Archaeal/Plant Plastid",
                "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
        ];

        Self { codes }
    }

    /// Returns all genetic codes.
    pub fn all(&self) -> &[CodonTable] {
        &self.codes
    }

    /// Gets a genetic code by ID.
    pub fn get(&self, id: u8) -> Option<&CodonTable> {
        self.codes.iter().find(|c| c.id == id)
    }
}

impl Default for GeneticCodes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_standard_code_translation() {
        let standard = CodonTable::standard();

        assert_eq!(standard.lookup("ATG"), Residue::Amino('M')); // Start codon
        assert_eq!(standard.lookup("TAA"), Residue::Stop);
        assert_eq!(standard.lookup("TAG"), Residue::Stop);
        assert_eq!(standard.lookup("TGA"), Residue::Stop);
        assert_eq!(standard.lookup("TTT"), Residue::Amino('F'));
        assert_eq!(standard.lookup("GGG"), Residue::Amino('G'));
        assert_eq!(standard.lookup("AAA"), Residue::Amino('K'));
        assert_eq!(standard.lookup("AAG"), Residue::Amino('K'));
    }

    #[test]
    fn test_table_covers_all_triplets() {
        let standard = CodonTable::standard();
        let bases = ['A', 'C', 'G', 'T'];
        let mut stops = 0;
        for &b1 in &bases {
            for &b2 in &bases {
                for &b3 in &bases {
                    let residue = standard.lookup_chars(&[b1, b2, b3]);
                    assert_ne!(residue, Residue::Unknown);
                    if residue.is_stop() {
                        stops += 1;
                    }
                }
            }
        }
        assert_eq!(stops, 3);
    }

    #[rstest]
    #[case("ATN", "ambiguous base")]
    #[case("atg", "lowercase")]
    #[case("AUG", "RNA uracil")]
    #[case("AT", "too short")]
    #[case("ATGC", "too long")]
    #[case("", "empty")]
    fn test_unknown_codons(#[case] codon: &str, #[case] description: &str) {
        assert_eq!(
            CodonTable::standard().lookup(codon),
            Residue::Unknown,
            "{description}"
        );
    }

    #[rstest]
    #[case("ATGTTTTAA", "MF*")]
    #[case("ATGTT", "M")]
    #[case("", "")]
    #[case("AT", "")]
    #[case("ATGNNNTTT", "MF")]
    #[case("atgTTT", "F")]
    fn test_translate(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(translate(input), expected);
    }

    #[test]
    fn test_translate_output_length_bound() {
        let seq = "ATGXXXAAAGG";
        let protein = translate(seq);
        assert_eq!(protein, "MK");
        assert!(protein.len() <= seq.len() / 3);
    }

    #[test]
    fn test_residue_symbols() {
        assert_eq!(Residue::Amino('K').symbol(), Some('K'));
        assert_eq!(Residue::Stop.symbol(), Some('*'));
        assert_eq!(Residue::Unknown.symbol(), None);
        assert_eq!(serde_json::to_string(&Residue::Stop).unwrap(), r#""*""#);
        assert_eq!(serde_json::to_string(&Residue::Unknown).unwrap(), "null");
    }

    #[test]
    fn test_different_genetic_codes() {
        let codes = GeneticCodes::new();

        // In standard code, TGA is stop
        let standard = codes.get(1).unwrap();
        assert_eq!(standard.lookup("TGA"), Residue::Stop);

        // In vertebrate mitochondrial (code 2), TGA is Trp (W)
        let vert_mito = codes.get(2).unwrap();
        assert_eq!(vert_mito.lookup("TGA"), Residue::Amino('W'));
        assert_eq!(vert_mito.translate_sequence("ATGTGA"), "MW");

        assert!(codes.get(7).is_none());
        assert_eq!(codes.all().len(), 7);
    }
}
