//! # G729A-Stream: Frame-Oriented G.729A File Conversion
//!
//! This library adapts the fixed-frame G.729 Annex A speech codec to
//! sequential file I/O. The codec itself is a native library reached through
//! the [`NativeCodec`] binding; this crate owns everything around it:
//!
//! - **Coder adapter**: one owned state arena per [`Coder`], initialized once,
//!   carried across frames, freed on drop
//! - **Frame contract**: 80 samples (160 bytes) of 16-bit PCM in, 10 bytes out
//!   on encode, and the reverse on decode
//! - **Streaming pipeline**: frame-by-frame conversion with zero-padding of a
//!   partial final PCM frame and truncation of a partial compressed frame
//! - **Containers**: WAV output at 8000 Hz mono 16-bit, optional WAV input
//!
//! ## Usage
//!
//! ```no_run
//! use g729a_stream::{encode_file, decode_file, ConversionConfig, G729aLibrary};
//! use std::path::Path;
//!
//! let library = G729aLibrary::load(G729aLibrary::default_path())?;
//! let config = ConversionConfig::new();
//!
//! encode_file(&library, Path::new("speech.pcm"), Path::new("speech.g729"), &config)?;
//! decode_file(&library, Path::new("speech.g729"), Path::new("speech.wav"), &config)?;
//! # Ok::<(), g729a_stream::StreamError>(())
//! ```
//!
//! The compressed format is a bare concatenation of 10-byte frames with no
//! header; frame boundaries come from the fixed frame size alone.

#![warn(missing_docs)]

pub mod coder;
pub mod config;
pub mod container;
pub mod convert;
pub mod error;
pub mod native;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used types and functions
pub use coder::Coder;
pub use config::{ConversionConfig, PartialFrame, PcmInput, PcmOutput};
pub use container::OUTPUT_WAV_SPEC;
pub use convert::{decode_file, encode_file};
pub use error::{ErrorCategory, Result, StreamError};
pub use native::{G729aLibrary, NativeCodec};
pub use pipeline::{decode_stream, encode_stream};
pub use types::{
    ConversionReport, Direction, COMPRESSED_FRAME_BYTES, PCM_FRAME_BYTES, SAMPLES_PER_FRAME,
    SAMPLE_RATE_HZ,
};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
