//! Binding to the native G.729A frame transform
//!
//! The codec itself lives outside this crate. It is reached through six entry
//! points, three per direction, which [`NativeCodec`] mirrors one-to-one.
//! Status values follow the native convention: `0` is success and any other
//! value is an opaque failure code that is passed through untouched.

mod library;

pub use library::{G729aLibrary, BINDING_REJECTED};

use std::sync::Arc;

/// Native entry points for both coder directions
///
/// Implementations must accept any slice lengths without undefined
/// behavior. The adapter always passes exactly the declared frame sizes and a
/// state slice of the reported size, but a binding reached directly may not.
pub trait NativeCodec {
    /// Bytes of state the encoder needs
    fn encoder_state_size(&self) -> usize;

    /// Initialize a zero-filled encoder state
    fn encoder_init(&self, state: &mut [u8]) -> i32;

    /// Encode one 160-byte PCM frame into one 10-byte compressed frame
    fn encoder_process(&self, state: &mut [u8], pcm: &[u8], bitstream: &mut [u8]) -> i32;

    /// Bytes of state the decoder needs
    fn decoder_state_size(&self) -> usize;

    /// Initialize a zero-filled decoder state
    fn decoder_init(&self, state: &mut [u8]) -> i32;

    /// Decode one 10-byte compressed frame into one 160-byte PCM frame
    fn decoder_process(&self, state: &mut [u8], bitstream: &[u8], pcm: &mut [u8]) -> i32;
}

impl<T: NativeCodec + ?Sized> NativeCodec for &T {
    fn encoder_state_size(&self) -> usize {
        (**self).encoder_state_size()
    }

    fn encoder_init(&self, state: &mut [u8]) -> i32 {
        (**self).encoder_init(state)
    }

    fn encoder_process(&self, state: &mut [u8], pcm: &[u8], bitstream: &mut [u8]) -> i32 {
        (**self).encoder_process(state, pcm, bitstream)
    }

    fn decoder_state_size(&self) -> usize {
        (**self).decoder_state_size()
    }

    fn decoder_init(&self, state: &mut [u8]) -> i32 {
        (**self).decoder_init(state)
    }

    fn decoder_process(&self, state: &mut [u8], bitstream: &[u8], pcm: &mut [u8]) -> i32 {
        (**self).decoder_process(state, bitstream, pcm)
    }
}

impl<T: NativeCodec + ?Sized> NativeCodec for Arc<T> {
    fn encoder_state_size(&self) -> usize {
        (**self).encoder_state_size()
    }

    fn encoder_init(&self, state: &mut [u8]) -> i32 {
        (**self).encoder_init(state)
    }

    fn encoder_process(&self, state: &mut [u8], pcm: &[u8], bitstream: &mut [u8]) -> i32 {
        (**self).encoder_process(state, pcm, bitstream)
    }

    fn decoder_state_size(&self) -> usize {
        (**self).decoder_state_size()
    }

    fn decoder_init(&self, state: &mut [u8]) -> i32 {
        (**self).decoder_init(state)
    }

    fn decoder_process(&self, state: &mut [u8], bitstream: &[u8], pcm: &mut [u8]) -> i32 {
        (**self).decoder_process(state, bitstream, pcm)
    }
}
