//! Whole-file conversions
//!
//! The coder is built before any file is touched, so an initialization
//! failure never leaves an output file behind. Files are closed on every
//! exit path by scope.

use crate::coder::Coder;
use crate::config::{ConversionConfig, PcmOutput};
use crate::container::{PcmSource, WavPcmWriter};
use crate::error::Result;
use crate::native::NativeCodec;
use crate::pipeline::{decode_stream, encode_stream};
use crate::types::ConversionReport;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Encode the PCM (or WAV) file at `input` into a compressed file at `output`
///
/// # Errors
///
/// Returns the first initialization, container, codec or I/O error.
pub fn encode_file<B: NativeCodec>(
    codec: B,
    input: &Path,
    output: &Path,
    config: &ConversionConfig,
) -> Result<ConversionReport> {
    let mut coder = Coder::encoder(codec)?;

    let reader = BufReader::new(File::open(input)?);
    let source = PcmSource::open(reader, config.pcm_input)?;
    let writer = BufWriter::new(File::create(output)?);

    let report = encode_stream(&mut coder, source, writer, config.partial_frame)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        frames = report.frames,
        padded_bytes = report.padded_bytes,
        "Encoded"
    );
    Ok(report)
}

/// Decode the compressed file at `input` into a WAV (or raw PCM) file at `output`
///
/// # Errors
///
/// Returns the first initialization, container, codec or I/O error.
pub fn decode_file<B: NativeCodec>(
    codec: B,
    input: &Path,
    output: &Path,
    config: &ConversionConfig,
) -> Result<ConversionReport> {
    let mut coder = Coder::decoder(codec)?;

    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);

    let report = match config.pcm_output {
        PcmOutput::Wav => {
            let mut wav = WavPcmWriter::new(writer)?;
            let report = decode_stream(&mut coder, reader, &mut wav)?;
            wav.finish()?;
            report
        }
        PcmOutput::Raw => decode_stream(&mut coder, reader, writer)?,
    };
    info!(
        input = %input.display(),
        output = %output.display(),
        frames = report.frames,
        discarded_bytes = report.discarded_bytes,
        "Decoded"
    );
    Ok(report)
}
