//! Command-line definition and dispatch

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use g729a_stream::{
    decode_file, encode_file, ConversionConfig, ConversionReport, G729aLibrary, PartialFrame,
    PcmInput, PcmOutput,
};
use std::path::PathBuf;
use tracing::debug;

/// G.729A encoder/decoder for files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the native G.729A shared library
    #[arg(long, global = true, env = "G729A_LIBRARY")]
    pub library: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress 16-bit 8 kHz mono PCM into 10-byte G.729A frames
    Encode {
        /// PCM or WAV input
        input: PathBuf,
        /// Bitstream output
        output: PathBuf,
        /// How the input is framed
        #[arg(long, value_enum, default_value_t = InputFormat::Auto)]
        input_format: InputFormat,
        /// Drop a partial final frame instead of padding it with silence
        #[arg(long)]
        drop_partial: bool,
    },
    /// Expand 10-byte G.729A frames into 16-bit 8 kHz mono PCM
    Decode {
        /// Bitstream input
        input: PathBuf,
        /// WAV (or raw PCM with --raw) output
        output: PathBuf,
        /// Write headerless PCM instead of WAV
        #[arg(long)]
        raw: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// Detect a RIFF/WAVE header
    Auto,
    /// Headerless little-endian samples
    Raw,
    /// WAV container
    Wav,
}

impl From<InputFormat> for PcmInput {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Auto => PcmInput::Auto,
            InputFormat::Raw => PcmInput::Raw,
            InputFormat::Wav => PcmInput::Wav,
        }
    }
}

impl Cli {
    /// Map the parsed arguments onto a conversion configuration
    pub fn config(&self) -> ConversionConfig {
        match &self.command {
            Command::Encode {
                input_format,
                drop_partial,
                ..
            } => ConversionConfig::new()
                .with_pcm_input((*input_format).into())
                .with_partial_frame(if *drop_partial {
                    PartialFrame::Discard
                } else {
                    PartialFrame::ZeroPad
                }),
            Command::Decode { raw, .. } => ConversionConfig::new().with_pcm_output(if *raw {
                PcmOutput::Raw
            } else {
                PcmOutput::Wav
            }),
        }
    }

    /// Run the selected conversion
    pub fn execute(&self) -> Result<()> {
        let path = self.library.clone().unwrap_or_else(G729aLibrary::default_path);
        let library = G729aLibrary::load(&path)
            .with_context(|| format!("loading codec library {}", path.display()))?;
        let config = self.config();
        debug!(?config, "Conversion settings");

        let report = match &self.command {
            Command::Encode { input, output, .. } => encode_file(&library, input, output, &config)
                .with_context(|| format!("encoding {}", input.display()))?,
            Command::Decode { input, output, .. } => decode_file(&library, input, output, &config)
                .with_context(|| format!("decoding {}", input.display()))?,
        };

        print_summary(&report);
        Ok(())
    }
}

fn print_summary(report: &ConversionReport) {
    let direction = report
        .direction
        .map(|d| d.to_string())
        .unwrap_or_default();
    println!(
        "{direction}: {} frames, {} bytes in, {} bytes out",
        report.frames, report.bytes_read, report.bytes_written
    );
    if report.padded_bytes > 0 {
        println!("Padded final frame with {} zero bytes", report.padded_bytes);
    }
    if report.discarded_bytes > 0 {
        println!("Discarded {} trailing bytes", report.discarded_bytes);
    }
    println!("Done.");
}
