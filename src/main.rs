//! CLI entry point for overlapping wave function collapse texture synthesis

use clap::Parser;
use overlapwfc::io::cli::{Cli, FileProcessor};

fn main() -> overlapwfc::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
