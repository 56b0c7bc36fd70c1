//! Frame-oriented coder adapter
//!
//! A [`Coder`] owns one native state arena and drives one direction of a
//! [`NativeCodec`] behind a fixed-size `process` contract.

use crate::error::{Result, StreamError};
use crate::native::NativeCodec;
use crate::state::CodecState;
use crate::types::Direction;
use tracing::{debug, error, trace};

/// One encoder or decoder instance
///
/// The state is created and initialized on construction, mutated in place by
/// every [`process`](Coder::process) call to carry inter-frame history, and
/// released on drop. `process` takes `&mut self`, so a coder cannot be driven
/// from two threads at once.
///
/// # Example
/// ```no_run
/// use g729a_stream::{Coder, G729aLibrary};
///
/// let library = G729aLibrary::load(G729aLibrary::default_path())?;
/// let mut encoder = Coder::encoder(&library)?;
/// let compressed = encoder.process(&[0u8; 160])?;
/// assert_eq!(compressed.len(), 10);
/// # Ok::<(), g729a_stream::StreamError>(())
/// ```
#[derive(Debug)]
pub struct Coder<B: NativeCodec> {
    direction: Direction,
    codec: B,
    state: CodecState,
    frames: u64,
}

impl<B: NativeCodec> Coder<B> {
    /// Create an encoder (160-byte PCM in, 10-byte frame out)
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::CodecInit`] if the native initializer fails.
    pub fn encoder(codec: B) -> Result<Self> {
        Self::new(Direction::Encode, codec)
    }

    /// Create a decoder (10-byte frame in, 160-byte PCM out)
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::CodecInit`] if the native initializer fails.
    pub fn decoder(codec: B) -> Result<Self> {
        Self::new(Direction::Decode, codec)
    }

    /// Create a coder for the given direction
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::CodecInit`] if the native initializer fails
    /// or the codec reports an empty state.
    pub fn new(direction: Direction, codec: B) -> Result<Self> {
        let size = match direction {
            Direction::Encode => codec.encoder_state_size(),
            Direction::Decode => codec.decoder_state_size(),
        };
        if size == 0 {
            error!(%direction, "Native codec reported an empty state");
            return Err(StreamError::codec_init(direction.state_size_symbol(), 0));
        }

        let mut state = CodecState::zeroed(size);
        let status = match direction {
            Direction::Encode => codec.encoder_init(state.as_bytes_mut()),
            Direction::Decode => codec.decoder_init(state.as_bytes_mut()),
        };
        if status != 0 {
            error!(%direction, status, "Native codec initialization failed");
            return Err(StreamError::codec_init(direction.init_symbol(), status));
        }

        debug!(%direction, state_size = size, "Coder initialized");
        Ok(Self {
            direction,
            codec,
            state,
            frames: 0,
        })
    }

    /// Transform one frame
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::FrameSize`] when `input` is not exactly
    /// [`input_frame_size`](Self::input_frame_size) bytes, without calling the
    /// native codec, and [`StreamError::CodecProcess`] when the native
    /// transform reports failure.
    pub fn process(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let expected = self.input_frame_size();
        if input.len() != expected {
            return Err(StreamError::FrameSize {
                expected,
                actual: input.len(),
            });
        }

        let mut output = vec![0u8; self.output_frame_size()];
        let state = self.state.as_bytes_mut();
        let status = match self.direction {
            Direction::Encode => self.codec.encoder_process(state, input, &mut output),
            Direction::Decode => self.codec.decoder_process(state, input, &mut output),
        };
        if status != 0 {
            error!(direction = %self.direction, status, frame = self.frames, "Native transform failed");
            return Err(StreamError::CodecProcess {
                operation: self.direction.process_symbol(),
                status,
                frame: self.frames,
            });
        }

        trace!(direction = %self.direction, frame = self.frames, "Frame processed");
        self.frames += 1;
        Ok(output)
    }

    /// Direction this coder was built for
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Bytes `process` expects
    pub fn input_frame_size(&self) -> usize {
        self.direction.input_frame_size()
    }

    /// Bytes `process` returns
    pub fn output_frame_size(&self) -> usize {
        self.direction.output_frame_size()
    }

    /// Frames successfully processed so far
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    /// Size of the native state in bytes
    pub fn state_size(&self) -> usize {
        self.state.len()
    }
}
