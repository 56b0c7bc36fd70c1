//! Main entry point for the G.729A file converter
//!
//! Encodes 16-bit 8 kHz PCM (raw or WAV) into a headerless G.729A bitstream,
//! and decodes such a bitstream back into WAV or raw PCM.

mod cli;
mod logging;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    if let Err(e) = cli.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
