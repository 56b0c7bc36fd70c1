//! Frame layout constants and the coder direction

use std::fmt;

/// Samples in one G.729A frame (10 ms at 8 kHz)
pub const SAMPLES_PER_FRAME: usize = 80;

/// Bytes in one PCM frame (16-bit little-endian samples)
pub const PCM_FRAME_BYTES: usize = SAMPLES_PER_FRAME * 2;

/// Bytes in one compressed frame
pub const COMPRESSED_FRAME_BYTES: usize = 10;

/// Sample rate the codec operates at
pub const SAMPLE_RATE_HZ: u32 = 8000;

/// Coder direction
///
/// Each direction binds a fixed triple of native operations and fixes the
/// frame sizes on both sides of the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// PCM to compressed
    Encode,
    /// Compressed to PCM
    Decode,
}

impl Direction {
    /// Bytes consumed by one transform call
    pub const fn input_frame_size(self) -> usize {
        match self {
            Self::Encode => PCM_FRAME_BYTES,
            Self::Decode => COMPRESSED_FRAME_BYTES,
        }
    }

    /// Bytes produced by one transform call
    pub const fn output_frame_size(self) -> usize {
        match self {
            Self::Encode => COMPRESSED_FRAME_BYTES,
            Self::Decode => PCM_FRAME_BYTES,
        }
    }

    /// Native symbol of the state size query
    pub const fn state_size_symbol(self) -> &'static str {
        match self {
            Self::Encode => "G729A_Encoder_Get_Size",
            Self::Decode => "G729A_Decoder_Get_Size",
        }
    }

    /// Native symbol of the state initializer
    pub const fn init_symbol(self) -> &'static str {
        match self {
            Self::Encode => "G729A_Encoder_Init",
            Self::Decode => "G729A_Decoder_Init",
        }
    }

    /// Native symbol of the per-frame transform
    pub const fn process_symbol(self) -> &'static str {
        match self {
            Self::Encode => "G729A_Encoder_Process",
            Self::Decode => "G729A_Decoder_Process",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => write!(f, "encode"),
            Self::Decode => write!(f, "decode"),
        }
    }
}

/// Counters gathered over one conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Direction the run used
    pub direction: Option<Direction>,
    /// Frames handed to the coder
    pub frames: u64,
    /// Payload bytes read from the input stream
    pub bytes_read: u64,
    /// Payload bytes written, excluding any container header
    pub bytes_written: u64,
    /// Zero bytes appended to a partial final PCM frame
    pub padded_bytes: usize,
    /// Trailing input bytes dropped because they did not fill a frame
    pub discarded_bytes: usize,
}

impl ConversionReport {
    pub(crate) fn new(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::default()
        }
    }
}
