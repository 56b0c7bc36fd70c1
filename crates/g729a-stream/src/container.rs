//! WAV container adaptation
//!
//! Decoded PCM goes out through [`WavPcmWriter`], which lets the pipeline
//! write plain bytes while `hound` keeps the header's data length in step.
//! The header always declares [`OUTPUT_WAV_SPEC`]; it is not configurable
//! because the decoder only ever produces that layout.
//! On the encode side, [`PcmSource`] strips a WAV header so the pipeline only
//! ever sees raw samples.

use crate::config::PcmInput;
use crate::error::{Result, StreamError};
use crate::types::SAMPLE_RATE_HZ;
use std::io::{self, BufRead, Read, Seek, Write};
use tracing::debug;

/// Length of the header `hound` writes for plain 16-bit PCM
pub const WAV_HEADER_BYTES: usize = 44;

/// Layout of decoded audio: mono 16-bit integer PCM at 8000 Hz
pub const OUTPUT_WAV_SPEC: hound::WavSpec = hound::WavSpec {
    channels: 1,
    sample_rate: SAMPLE_RATE_HZ,
    bits_per_sample: 16,
    sample_format: hound::SampleFormat::Int,
};

/// Whether `header` starts with a RIFF/WAVE signature
pub fn is_wav(header: &[u8]) -> bool {
    header.len() >= 12 && &header[0..4] == b"RIFF" && &header[8..12] == b"WAVE"
}

/// `Write` adapter that turns little-endian PCM bytes into WAV samples
///
/// `hound` failures are carried inside the returned `io::Error` and come back
/// out as [`StreamError::Wav`] when converted.
pub struct WavPcmWriter<W: Write + Seek> {
    writer: hound::WavWriter<W>,
    pending: Option<u8>,
}

impl<W: Write + Seek> WavPcmWriter<W> {
    /// Write an [`OUTPUT_WAV_SPEC`] header and start the data chunk
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Wav`] if the header cannot be written.
    pub fn new(inner: W) -> Result<Self> {
        let writer = hound::WavWriter::new(inner, OUTPUT_WAV_SPEC)?;
        Ok(Self {
            writer,
            pending: None,
        })
    }

    /// Number of samples written so far
    pub fn samples_written(&self) -> u32 {
        self.writer.len()
    }

    /// Patch the header lengths and flush
    ///
    /// A trailing odd byte, which cannot form a sample, is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Wav`] if the header update fails.
    pub fn finish(self) -> Result<()> {
        if self.pending.is_some() {
            debug!("Dropping odd trailing PCM byte");
        }
        self.writer.finalize()?;
        Ok(())
    }

    fn write_sample(&mut self, low: u8, high: u8) -> io::Result<()> {
        self.writer
            .write_sample(i16::from_le_bytes([low, high]))
            .map_err(io::Error::other)
    }
}

impl<W: Write + Seek> Write for WavPcmWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = buf;
        if let Some(low) = self.pending {
            let Some((&high, rest)) = bytes.split_first() else {
                return Ok(0);
            };
            self.write_sample(low, high)?;
            self.pending = None;
            bytes = rest;
        }

        let mut pairs = bytes.chunks_exact(2);
        for pair in &mut pairs {
            self.write_sample(pair[0], pair[1])?;
        }
        if let [odd] = pairs.remainder() {
            self.pending = Some(*odd);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer
            .flush()
            .map_err(io::Error::other)
    }
}

/// Raw PCM byte stream, with any WAV header already consumed
pub enum PcmSource<R: Read> {
    /// Bytes are samples from the first byte on
    Raw(R),
    /// Reads are limited to the WAV data chunk
    Wav(io::Take<R>),
}

impl<R: BufRead> PcmSource<R> {
    /// Prepare `reader` for encoding according to `input`
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Wav`] for a malformed header and
    /// [`StreamError::UnsupportedWav`] when the audio is not mono 16-bit
    /// integer PCM at 8000 Hz.
    pub fn open(mut reader: R, input: PcmInput) -> Result<Self> {
        let wav = match input {
            PcmInput::Raw => false,
            PcmInput::Wav => true,
            PcmInput::Auto => is_wav(reader.fill_buf()?),
        };
        if wav {
            Self::wav(reader)
        } else {
            Ok(Self::Raw(reader))
        }
    }
}

impl<R: Read> PcmSource<R> {
    /// Parse a WAV header and position the source on its sample data
    ///
    /// # Errors
    ///
    /// See [`PcmSource::open`].
    pub fn wav(reader: R) -> Result<Self> {
        let wav = hound::WavReader::new(reader)?;
        let spec = wav.spec();
        if spec.channels != 1
            || spec.bits_per_sample != 16
            || spec.sample_format != hound::SampleFormat::Int
            || spec.sample_rate != SAMPLE_RATE_HZ
        {
            return Err(StreamError::unsupported_wav(format!(
                "{} channel(s), {}-bit {:?} at {} Hz (need mono 16-bit Int at {} Hz)",
                spec.channels, spec.bits_per_sample, spec.sample_format, spec.sample_rate, SAMPLE_RATE_HZ
            )));
        }

        let data_bytes = u64::from(wav.len()) * 2;
        debug!(data_bytes, "Stripped WAV header from PCM input");
        Ok(Self::Wav(wav.into_inner().take(data_bytes)))
    }
}

impl<R: Read> Read for PcmSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Raw(reader) => reader.read(buf),
            Self::Wav(reader) => reader.read(buf),
        }
    }
}
