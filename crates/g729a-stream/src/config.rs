//! Conversion configuration

/// How PCM input is framed on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PcmInput {
    /// Headerless 16-bit little-endian samples
    #[default]
    Raw,
    /// WAV container, header stripped before encoding
    Wav,
    /// WAV if the file starts with a RIFF/WAVE header, raw otherwise
    Auto,
}

/// How decoded PCM is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PcmOutput {
    /// WAV container at 8000 Hz, mono, 16-bit
    #[default]
    Wav,
    /// Headerless concatenation of decoded frames
    Raw,
}

/// What to do with a PCM tail shorter than one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialFrame {
    /// Right-pad with silence and encode it
    #[default]
    ZeroPad,
    /// Drop the tail
    Discard,
}

/// Settings for one file conversion
///
/// Defaults: raw PCM in, WAV out, zero-padded final frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Encode input framing
    pub pcm_input: PcmInput,
    /// Decode output framing
    pub pcm_output: PcmOutput,
    /// Encode policy for a short final read
    pub partial_frame: PartialFrame,
}

impl ConversionConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set encode input framing
    pub fn with_pcm_input(mut self, pcm_input: PcmInput) -> Self {
        self.pcm_input = pcm_input;
        self
    }

    /// Set decode output framing
    pub fn with_pcm_output(mut self, pcm_output: PcmOutput) -> Self {
        self.pcm_output = pcm_output;
        self
    }

    /// Set the partial final frame policy
    pub fn with_partial_frame(mut self, partial_frame: PartialFrame) -> Self {
        self.partial_frame = partial_frame;
        self
    }
}
