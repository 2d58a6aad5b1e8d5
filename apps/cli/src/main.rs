//! toponymy CLI: mine scanned toponymy dictionaries for keyword entries.
//!
//! Splits extracted dictionary text into entries by their headings and
//! reports the paragraphs that mention any of the configured keywords.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
