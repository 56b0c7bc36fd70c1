//! Scripted stand-in for the native G.729A library
//!
//! The encoder folds each 16-byte slice of PCM into one output byte mixed with
//! the frame counter kept in its state, so outputs depend on inter-frame
//! history. Every process call checks the marker written by init.

#![allow(dead_code)]

use g729a_stream::NativeCodec;
use std::sync::atomic::{AtomicUsize, Ordering};

const STATE_BYTES: usize = 16;
const INIT_MARKER: u8 = 0xA5;
/// Status returned when a process call sees an uninitialized state
pub const NOT_INITIALIZED: i32 = 99;

#[derive(Debug, Default)]
pub struct ScriptedCodec {
    pub encoder_inits: AtomicUsize,
    pub decoder_inits: AtomicUsize,
    pub encoder_calls: AtomicUsize,
    pub decoder_calls: AtomicUsize,
    /// Status the encoder init reports instead of success
    pub encoder_init_status: i32,
    /// Status the decoder init reports instead of success
    pub decoder_init_status: i32,
    /// Zero-based encoder call that fails with status 7
    pub fail_encode_at: Option<usize>,
    /// Zero-based decoder call that fails with status 8
    pub fail_decode_at: Option<usize>,
}

impl ScriptedCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn next_frame(state: &mut [u8]) -> Option<u8> {
    if state[8] != INIT_MARKER {
        return None;
    }
    let counter = u64::from_le_bytes(state[..8].try_into().ok()?);
    state[..8].copy_from_slice(&(counter + 1).to_le_bytes());
    Some(counter as u8)
}

impl NativeCodec for ScriptedCodec {
    fn encoder_state_size(&self) -> usize {
        STATE_BYTES
    }

    fn encoder_init(&self, state: &mut [u8]) -> i32 {
        self.encoder_inits.fetch_add(1, Ordering::SeqCst);
        state[8] = INIT_MARKER;
        self.encoder_init_status
    }

    fn encoder_process(&self, state: &mut [u8], pcm: &[u8], bitstream: &mut [u8]) -> i32 {
        let call = self.encoder_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_encode_at == Some(call) {
            return 7;
        }
        let Some(counter) = next_frame(state) else {
            return NOT_INITIALIZED;
        };
        for (out, chunk) in bitstream.iter_mut().zip(pcm.chunks_exact(16)) {
            *out = chunk.iter().fold(counter, |acc, &b| acc ^ b);
        }
        0
    }

    fn decoder_state_size(&self) -> usize {
        STATE_BYTES
    }

    fn decoder_init(&self, state: &mut [u8]) -> i32 {
        self.decoder_inits.fetch_add(1, Ordering::SeqCst);
        state[8] = INIT_MARKER;
        self.decoder_init_status
    }

    fn decoder_process(&self, state: &mut [u8], bitstream: &[u8], pcm: &mut [u8]) -> i32 {
        let call = self.decoder_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_decode_at == Some(call) {
            return 8;
        }
        if next_frame(state).is_none() {
            return NOT_INITIALIZED;
        }
        for (i, out) in pcm.iter_mut().enumerate() {
            *out = bitstream[i / 16];
        }
        0
    }
}

/// Deterministic non-silent PCM of `len` bytes
pub fn pcm_ramp(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 % 251) as u8).collect()
}
