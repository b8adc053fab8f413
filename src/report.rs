//! Analysis reports.
//!
//! A report runs every analysis on one sequence (and, optionally, compares
//! it against a reference) and renders the results either as wrapped text
//! or as JSON. Analyses that cannot run on the input are left out and
//! explained in the notes instead of failing the whole report.

use std::fmt::Write;

use serde::Serialize;

use crate::genetic_code::CodonTable;
use crate::mutation::{classify_mutations_with, detect_substitutions, CodonMutation, PositionalSubstitution};
use crate::transform::{gc_content, reverse_complement};
use crate::validate::validate;

/// Report title, first line of the text rendering.
pub const REPORT_TITLE: &str = "DNA Analysis Report";

/// Differences against a reference sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub mutations: Vec<PositionalSubstitution>,
    pub codon_mutations: Vec<CodonMutation>,
}

/// All analysis results for one sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub sequence: String,
    pub length: usize,
    pub valid: bool,
    pub genetic_code: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gc_content: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reverse_complement: Option<String>,
    pub protein_sequence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Report {
    /// Runs all analyses on `sequence`.
    ///
    /// When `reference` is given, `sequence` is treated as the observed
    /// sequence and compared base by base and codon by codon.
    pub fn analyze(sequence: &str, reference: Option<&str>, table: &CodonTable) -> Self {
        let mut notes = Vec::new();

        let gc_content = match gc_content(sequence) {
            Ok(gc) => Some(gc),
            Err(e) => {
                notes.push(format!("GC content not computed: {}", e));
                None
            }
        };

        let reverse_complement = match reverse_complement(sequence) {
            Ok(rc) => Some(rc),
            Err(e) => {
                notes.push(format!("Reverse complement not computed: {}", e));
                None
            }
        };

        let comparison = reference.and_then(|reference| {
            let compared = detect_substitutions(reference, sequence).and_then(|mutations| {
                let codon_mutations = classify_mutations_with(table, reference, sequence)?;
                Ok(Comparison {
                    mutations,
                    codon_mutations,
                })
            });
            match compared {
                Ok(comparison) => Some(comparison),
                Err(e) => {
                    notes.push(format!("Mutations not computed: {}", e));
                    None
                }
            }
        });

        Self {
            sequence: sequence.to_string(),
            length: sequence.chars().count(),
            valid: validate(sequence),
            genetic_code: table.id,
            gc_content,
            reverse_complement,
            protein_sequence: table.translate_sequence(sequence),
            comparison,
            notes,
        }
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the report as text, wrapping long values at `width` columns.
    ///
    /// Each field is a `Key:` line followed by its value lines indented by
    /// two spaces; list fields get one line per item.
    pub fn render_text(&self, width: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", REPORT_TITLE);

        push_wrapped(&mut out, "Sequence", &self.sequence, width);
        push_field(&mut out, "Length", &[self.length.to_string()]);
        push_field(&mut out, "Valid", &[if self.valid { "yes" } else { "no" }.to_string()]);
        if let Some(gc) = self.gc_content {
            push_field(&mut out, "GC content", &[format!("{:.2}%", gc)]);
        }
        if let Some(rc) = &self.reverse_complement {
            push_wrapped(&mut out, "Reverse complement", rc, width);
        }
        push_wrapped(
            &mut out,
            &format!("Protein sequence (genetic code {})", self.genetic_code),
            &self.protein_sequence,
            width,
        );

        if let Some(comparison) = &self.comparison {
            let lines: Vec<String> = comparison.mutations.iter().map(|m| m.to_string()).collect();
            push_field(&mut out, "Mutations", &lines);
            let lines: Vec<String> =
                comparison.codon_mutations.iter().map(|m| m.to_string()).collect();
            push_field(&mut out, "Codon mutations", &lines);
        }

        if !self.notes.is_empty() {
            push_field(&mut out, "Notes", &self.notes);
        }

        out
    }
}

fn push_field(out: &mut String, key: &str, lines: &[String]) {
    let _ = writeln!(out, "\n{}:", key);
    if lines.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for line in lines {
        let _ = writeln!(out, "  {}", line);
    }
}

fn push_wrapped(out: &mut String, key: &str, value: &str, width: usize) {
    if value.is_empty() {
        push_field(out, key, &[]);
        return;
    }
    let options = textwrap::Options::new(width.max(8))
        .initial_indent("  ")
        .subsequent_indent("  ");
    let _ = writeln!(out, "\n{}:", key);
    let _ = writeln!(out, "{}", textwrap::fill(value, options));
}
