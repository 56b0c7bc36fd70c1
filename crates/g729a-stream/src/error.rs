//! Error handling for the coder adapter and conversion pipeline
//!
//! Every variant here aborts the current conversion. Short or empty reads at
//! the end of a stream are not errors and never surface through this type.

#![allow(missing_docs)]

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for adapter and pipeline operations
pub type Result<T> = std::result::Result<T, StreamError>;

/// Error type for coder and stream operations
#[derive(Error, Debug)]
pub enum StreamError {
    /// Native initialization reported a non-zero status
    #[error("Codec initialization failed: {operation} returned {status}")]
    CodecInit { operation: &'static str, status: i32 },

    /// Caller handed `process` a frame of the wrong length
    #[error("Invalid frame size: expected {expected}, got {actual}")]
    FrameSize { expected: usize, actual: usize },

    /// Native per-frame transform reported a non-zero status
    #[error("Codec processing failed: {operation} returned {status} on frame {frame}")]
    CodecProcess {
        operation: &'static str,
        status: i32,
        frame: u64,
    },

    /// The shared library or one of its entry points could not be resolved
    #[error("Failed to load native codec from {}: {reason}", .path.display())]
    LibraryLoad { path: PathBuf, reason: String },

    /// Input container does not carry the PCM layout the codec accepts
    #[error("Unsupported WAV input: {details}")]
    UnsupportedWav { details: String },

    /// WAV container read or write failed
    #[error("WAV container error: {0}")]
    Wav(#[from] hound::Error),

    /// I/O operation failed
    #[error("I/O operation failed: {0}")]
    Io(std::io::Error),
}

/// WAV writes travel through `io::Write`, so a `hound::Error` may arrive
/// wrapped in an `io::Error`. Unwrap it back into [`StreamError::Wav`].
impl From<io::Error> for StreamError {
    fn from(err: io::Error) -> Self {
        if !err.get_ref().is_some_and(|inner| inner.is::<hound::Error>()) {
            return Self::Io(err);
        }

        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<hound::Error>()) {
            Some(Ok(wav)) => Self::Wav(*wav),
            Some(Err(inner)) => Self::Io(io::Error::new(kind, inner)),
            None => Self::Io(kind.into()),
        }
    }
}

impl StreamError {
    /// Create a new initialization error for the named native operation
    pub fn codec_init(operation: &'static str, status: i32) -> Self {
        Self::CodecInit { operation, status }
    }

    /// Create a new library load error
    pub fn library_load(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::LibraryLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new unsupported WAV error
    pub fn unsupported_wav(details: impl Into<String>) -> Self {
        Self::UnsupportedWav {
            details: details.into(),
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CodecInit { .. } | Self::LibraryLoad { .. } => ErrorCategory::Initialization,
            Self::FrameSize { .. } => ErrorCategory::Contract,
            Self::CodecProcess { .. } => ErrorCategory::Processing,
            Self::UnsupportedWav { .. } | Self::Wav(_) => ErrorCategory::Container,
            Self::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Library loading and codec state setup
    Initialization,
    /// Caller broke the fixed frame contract
    Contract,
    /// Native per-frame failure
    Processing,
    /// Container format errors
    Container,
    /// I/O related errors
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialization => write!(f, "Initialization"),
            Self::Contract => write!(f, "Contract"),
            Self::Processing => write!(f, "Processing"),
            Self::Container => write!(f, "Container"),
            Self::Io => write!(f, "I/O"),
        }
    }
}
