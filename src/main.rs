//! dnakit - DNA sequence analysis
//!
//! ## Usage
//!
//! ```bash
//! dnakit revcomp ATCG
//! dnakit gc --fasta sample.fa
//! dnakit translate -g 2 ATGTGA
//! dnakit classify --reference ATGAAA --user ATGTAA --format json
//! dnakit report --fasta sample.fa --reference-fasta ref.fa -o report.txt
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG=debug` for input details.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use dnakit::commands::{run, Args};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(&args)
}
