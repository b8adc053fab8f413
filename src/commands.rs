//! Command-line front end.
//!
//! Each subcommand gathers its sequence input (inline or from a FASTA
//! file), rejects missing input, runs exactly one analysis and renders the
//! result as text or JSON. Analysis errors are passed through unchanged.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};

use crate::fasta::parse_fasta_file;
use crate::genetic_code::{CodonTable, GeneticCodes};
use crate::model::AnalysisResult;
use crate::mutation::{classify_mutations_with, detect_substitutions};
use crate::report::Report;
use crate::transform::{gc_content, reverse_complement};
use crate::validate::validate;

pub const MISSING_SEQUENCE: &str = "DNA sequence is required.";
pub const MISSING_PAIR: &str = "Both reference and user sequences are required.";
pub const VALID_SEQUENCE: &str = "DNA sequence is valid.";
pub const INVALID_SEQUENCE: &str = "Invalid DNA sequence: contains non-ACGT characters.";

/// dnakit - DNA sequence analysis from the command line
///
/// Sequences are read as given: only uppercase A, C, G and T are recognized.
#[derive(Parser, Debug)]
#[command(name = "dnakit", author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Output file. Use "-" for stdout.
    #[arg(short = 'o', long = "output", default_value = "-", global = true)]
    pub output: String,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON object keyed by result name
    Json,
}

/// A single sequence, inline or from a FASTA file.
#[derive(clap::Args, Debug, Clone)]
pub struct SequenceInput {
    /// DNA sequence (string of A, T, C, G)
    pub sequence: Option<String>,

    /// Read the sequence from the first record of a FASTA file
    #[arg(long = "fasta", conflicts_with = "sequence")]
    pub fasta: Option<PathBuf>,
}

impl SequenceInput {
    fn resolve(&self) -> Result<Option<String>> {
        resolve_one(self.sequence.as_deref(), self.fasta.as_deref())
    }

    /// Returns the sequence, rejecting missing or empty input.
    pub fn require(&self) -> Result<String> {
        match self.resolve()? {
            Some(seq) if !seq.is_empty() => Ok(seq),
            _ => bail!(MISSING_SEQUENCE),
        }
    }
}

/// A reference/user pair for mutation commands.
#[derive(clap::Args, Debug, Clone)]
pub struct PairInput {
    /// Reference DNA sequence
    #[arg(long = "reference")]
    pub reference: Option<String>,

    /// Read the reference from the first record of a FASTA file
    #[arg(long = "reference-fasta", conflicts_with = "reference")]
    pub reference_fasta: Option<PathBuf>,

    /// User-provided DNA sequence
    #[arg(long = "user")]
    pub user: Option<String>,

    /// Read the user sequence from the first record of a FASTA file
    #[arg(long = "user-fasta", conflicts_with = "user")]
    pub user_fasta: Option<PathBuf>,
}

impl PairInput {
    /// Returns `(reference, user)`, rejecting missing or empty input.
    pub fn require(&self) -> Result<(String, String)> {
        let reference = resolve_one(self.reference.as_deref(), self.reference_fasta.as_deref())?;
        let user = resolve_one(self.user.as_deref(), self.user_fasta.as_deref())?;
        match (reference, user) {
            (Some(r), Some(u)) if !r.is_empty() && !u.is_empty() => Ok((r, u)),
            _ => bail!(MISSING_PAIR),
        }
    }
}

fn resolve_one(inline: Option<&str>, fasta: Option<&Path>) -> Result<Option<String>> {
    if let Some(seq) = inline {
        debug!("Using inline sequence ({} symbols)", seq.len());
        return Ok(Some(seq.to_string()));
    }
    let Some(path) = fasta else {
        return Ok(None);
    };

    let records = parse_fasta_file(path)
        .with_context(|| format!("Failed to read FASTA file {}", path.display()))?;
    if records.len() > 1 {
        warn!(
            "{} holds {} records, using only the first",
            path.display(),
            records.len()
        );
    }
    let first = records.into_iter().next().map(|record| {
        debug!("Using record '{}' from {}", record.id, path.display());
        record.data
    });
    Ok(first)
}

fn lookup_code(codes: &GeneticCodes, id: u8) -> Result<CodonTable> {
    codes
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow!("Unknown genetic code: {}", id))
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Reverse complement of a DNA sequence
    Revcomp(SequenceInput),

    /// GC content of a DNA sequence, as a percentage
    Gc(SequenceInput),

    /// Translate a DNA sequence into protein (frame 1, partial codons dropped)
    Translate {
        #[command(flatten)]
        input: SequenceInput,

        /// Genetic code for translation (1-6 or 11, default: 1 = Standard)
        #[arg(short = 'g', long = "genetic-code", default_value = "1")]
        genetic_code: u8,
    },

    /// List base substitutions between a reference and a user sequence
    Detect(PairInput),

    /// Classify codon changes as silent, missense or nonsense
    Classify {
        #[command(flatten)]
        pair: PairInput,

        /// Genetic code for translation (1-6 or 11, default: 1 = Standard)
        #[arg(short = 'g', long = "genetic-code", default_value = "1")]
        genetic_code: u8,
    },

    /// Check that a sequence only holds A, T, C and G
    Validate(SequenceInput),

    /// Full analysis report, optionally against a reference
    Report {
        #[command(flatten)]
        input: SequenceInput,

        /// Reference sequence to compare against
        #[arg(long = "reference")]
        reference: Option<String>,

        /// Read the reference from the first record of a FASTA file
        #[arg(long = "reference-fasta", conflicts_with = "reference")]
        reference_fasta: Option<PathBuf>,

        /// Genetic code for translation (1-6 or 11, default: 1 = Standard)
        #[arg(short = 'g', long = "genetic-code", default_value = "1")]
        genetic_code: u8,

        /// Wrap width for long sequences in text output
        #[arg(short = 'w', long = "width", default_value = "80")]
        width: usize,
    },
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Analysis(AnalysisResult),
    Report { report: Report, width: usize },
}

impl CommandOutput {
    /// False when the command ran but its verdict is negative (invalid sequence).
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            CommandOutput::Analysis(AnalysisResult::Validation { valid: false, .. })
        )
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        let rendered = match (self, format) {
            (CommandOutput::Analysis(result), OutputFormat::Json) => serde_json::to_string(result)?,
            (CommandOutput::Analysis(result), OutputFormat::Text) => render_result_text(result),
            (CommandOutput::Report { report, .. }, OutputFormat::Json) => report.to_json()?,
            (CommandOutput::Report { report, width }, OutputFormat::Text) => {
                return Ok(report.render_text(*width));
            }
        };
        Ok(rendered + "\n")
    }
}

fn render_result_text(result: &AnalysisResult) -> String {
    match result {
        AnalysisResult::Mutations(records) if records.is_empty() => "No mutations detected".into(),
        AnalysisResult::CodonMutations(records) if records.is_empty() => {
            "No codon mutations detected".into()
        }
        AnalysisResult::Mutations(_) => format!("position\tchange\ttype\n{}", result),
        AnalysisResult::CodonMutations(_) => {
            format!("position\tcodons\tamino_acids\ttype\n{}", result)
        }
        _ => result.to_string(),
    }
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Revcomp(_) => "revcomp",
            Command::Gc(_) => "gc",
            Command::Translate { .. } => "translate",
            Command::Detect(_) => "detect",
            Command::Classify { .. } => "classify",
            Command::Validate(_) => "validate",
            Command::Report { .. } => "report",
        }
    }

    /// Runs the command and returns its result, unrendered.
    pub fn execute(&self) -> Result<CommandOutput> {
        let codes = GeneticCodes::new();
        let result = match self {
            Command::Revcomp(input) => {
                let seq = input.require()?;
                info!("Reverse complementing {} bases", seq.len());
                AnalysisResult::ReverseComplement(reverse_complement(&seq)?)
            }
            Command::Gc(input) => {
                let seq = input.require()?;
                info!("Computing GC content of {} bases", seq.len());
                AnalysisResult::GcContent(gc_content(&seq)?)
            }
            Command::Translate { input, genetic_code } => {
                let table = lookup_code(&codes, *genetic_code)?;
                let seq = input.require()?;
                info!("Translating {} bases with genetic code {} ({})", seq.len(), table.id, table.name);
                AnalysisResult::ProteinSequence(table.translate_sequence(&seq))
            }
            Command::Detect(pair) => {
                let (reference, user) = pair.require()?;
                info!("Detecting substitutions over {} bases", reference.len());
                AnalysisResult::Mutations(detect_substitutions(&reference, &user)?)
            }
            Command::Classify { pair, genetic_code } => {
                let table = lookup_code(&codes, *genetic_code)?;
                let (reference, user) = pair.require()?;
                info!("Classifying codon mutations over {} bases", reference.len());
                AnalysisResult::CodonMutations(classify_mutations_with(&table, &reference, &user)?)
            }
            Command::Validate(input) => {
                let seq = input.require()?;
                info!("Validating {} symbols", seq.len());
                let valid = validate(&seq);
                let message = if valid { VALID_SEQUENCE } else { INVALID_SEQUENCE };
                AnalysisResult::Validation {
                    valid,
                    message: message.to_string(),
                }
            }
            Command::Report {
                input,
                reference,
                reference_fasta,
                genetic_code,
                width,
            } => {
                let table = lookup_code(&codes, *genetic_code)?;
                let seq = input.require()?;
                let reference = resolve_one(reference.as_deref(), reference_fasta.as_deref())?;
                info!(
                    "Building report for {} bases{}",
                    seq.len(),
                    if reference.is_some() { " against a reference" } else { "" }
                );
                let report = Report::analyze(&seq, reference.as_deref(), &table);
                return Ok(CommandOutput::Report {
                    report,
                    width: *width,
                });
            }
        };
        Ok(CommandOutput::Analysis(result))
    }
}

/// Writes `content` to a file, or to stdout when `output` is "-".
pub fn write_output(output: &str, content: &str) -> Result<()> {
    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(content.as_bytes())?;
    } else {
        let mut file = File::create(output)
            .with_context(|| format!("Failed to create output file {}", output))?;
        file.write_all(content.as_bytes())?;
        info!("Wrote {} output to {}", content.len(), output);
    }
    Ok(())
}

/// Runs a parsed command line end to end.
pub fn run(args: &Args) -> Result<()> {
    info!("Running dnakit {}", args.command.name());
    let output = args.command.execute()?;
    write_output(&args.output, &output.render(args.format)?)?;

    if !output.is_success() {
        bail!(INVALID_SEQUENCE);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("dnakit").chain(args.iter().copied())).unwrap()
    }

    fn execute(args: &[&str]) -> Result<CommandOutput> {
        parse(args).command.execute()
    }

    #[test]
    fn test_revcomp() {
        let output = execute(&["revcomp", "ATCG"]).unwrap();
        assert_eq!(
            output,
            CommandOutput::Analysis(AnalysisResult::ReverseComplement("CGAT".into()))
        );
        assert_eq!(output.render(OutputFormat::Text).unwrap(), "CGAT\n");
        assert_eq!(
            output.render(OutputFormat::Json).unwrap(),
            "{\"reverse_complement\":\"CGAT\"}\n"
        );
    }

    #[test]
    fn test_missing_sequence() {
        let err = execute(&["gc"]).unwrap_err();
        assert_eq!(err.to_string(), MISSING_SEQUENCE);

        let err = execute(&["revcomp", ""]).unwrap_err();
        assert_eq!(err.to_string(), MISSING_SEQUENCE);

        let err = execute(&["detect", "--reference", "ACGT"]).unwrap_err();
        assert_eq!(err.to_string(), MISSING_PAIR);
    }

    #[test]
    fn test_core_errors_pass_through() {
        let err = execute(&["revcomp", "ACXT"]).unwrap_err();
        assert!(err.to_string().contains("'X' at position 2"));

        let err = execute(&["detect", "--reference", "ATG", "--user", "AT"]).unwrap_err();
        assert!(err.to_string().contains("same length"));
    }

    #[test]
    fn test_translate_with_genetic_code() {
        let output = execute(&["translate", "ATGTGA"]).unwrap();
        assert_eq!(output.render(OutputFormat::Text).unwrap(), "M*\n");

        let output = execute(&["translate", "-g", "2", "ATGTGA"]).unwrap();
        assert_eq!(output.render(OutputFormat::Text).unwrap(), "MW\n");

        let err = execute(&["translate", "-g", "9", "ATG"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown genetic code: 9");
    }

    #[test]
    fn test_classify_text() {
        let output = execute(&["classify", "--reference", "ATGAAA", "--user", "ATGAAG"]).unwrap();
        assert_eq!(
            output.render(OutputFormat::Text).unwrap(),
            "position\tcodons\tamino_acids\ttype\n3\tAAA>AAG\tK>K\tsilent\n"
        );

        let output = execute(&["classify", "--reference", "ATG", "--user", "ATG"]).unwrap();
        assert_eq!(
            output.render(OutputFormat::Text).unwrap(),
            "No codon mutations detected\n"
        );
    }

    #[test]
    fn test_validate_verdicts() {
        let output = execute(&["validate", "ATCG"]).unwrap();
        assert!(output.is_success());
        assert_eq!(output.render(OutputFormat::Text).unwrap(), format!("{}\n", VALID_SEQUENCE));

        let output = execute(&["validate", "ATCGX"]).unwrap();
        assert!(!output.is_success());
        assert_eq!(output.render(OutputFormat::Text).unwrap(), format!("{}\n", INVALID_SEQUENCE));
    }

    #[test]
    fn test_global_options() {
        let args = parse(&["gc", "ATGC", "--format", "json", "-o", "out.json"]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.output, "out.json");
        assert_eq!(args.command.name(), "gc");
    }

    #[test]
    fn test_inline_and_fasta_conflict() {
        let result = Args::try_parse_from(["dnakit", "gc", "ACGT", "--fasta", "seq.fa"]);
        assert!(result.is_err());
    }
}
