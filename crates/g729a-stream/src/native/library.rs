//! Runtime-loaded G.729A shared library

use super::NativeCodec;
use crate::error::{Result, StreamError};
use crate::types::{Direction, COMPRESSED_FRAME_BYTES, PCM_FRAME_BYTES, SAMPLES_PER_FRAME};
use libloading::Library;
use std::ffi::OsStr;
use std::os::raw::{c_int, c_void};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Status returned when a call is refused before reaching native code
pub const BINDING_REJECTED: i32 = i32::MIN;

type GetSizeFn = unsafe extern "C" fn() -> c_int;
type InitFn = unsafe extern "C" fn(state: *mut c_void) -> c_int;
type EncodeFn = unsafe extern "C" fn(state: *mut c_void, pcm: *const i16, bitstream: *mut u8) -> c_int;
type DecodeFn = unsafe extern "C" fn(state: *mut c_void, bitstream: *const u8, pcm: *mut i16) -> c_int;

/// G.729A codec resolved from a shared library at runtime
///
/// State sizes are queried once while loading. Every call checks slice
/// lengths before crossing into native code and answers
/// [`BINDING_REJECTED`] when they do not fit.
pub struct G729aLibrary {
    path: PathBuf,
    encoder_state_size: usize,
    decoder_state_size: usize,
    encoder_init: InitFn,
    encoder_process: EncodeFn,
    decoder_init: InitFn,
    decoder_process: DecodeFn,
    // Keeps the entry points above mapped.
    _library: Library,
}

impl G729aLibrary {
    /// Platform file name of the codec library (`libg729a.so`, `g729a.dll`, ...)
    pub fn default_path() -> PathBuf {
        PathBuf::from(libloading::library_filename("g729a"))
    }

    /// Load the library at `path` and resolve all six entry points
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::LibraryLoad`] if the library cannot be opened,
    /// a symbol is missing, or a state size query reports a negative size.
    pub fn load(path: impl AsRef<OsStr>) -> Result<Self> {
        let path = PathBuf::from(path.as_ref());

        // SAFETY: loading runs the library's initializers; the codec library
        // is a plain C object with no load-time side effects.
        let library = unsafe { Library::new(&path) }
            .map_err(|e| StreamError::library_load(&path, e))?;

        let encoder_get_size: GetSizeFn =
            resolve(&library, &path, Direction::Encode.state_size_symbol())?;
        let decoder_get_size: GetSizeFn =
            resolve(&library, &path, Direction::Decode.state_size_symbol())?;
        let encoder_init = resolve(&library, &path, Direction::Encode.init_symbol())?;
        let encoder_process = resolve(&library, &path, Direction::Encode.process_symbol())?;
        let decoder_init = resolve(&library, &path, Direction::Decode.init_symbol())?;
        let decoder_process = resolve(&library, &path, Direction::Decode.process_symbol())?;

        // SAFETY: size queries take no arguments and touch no caller memory.
        let encoder_state_size = state_size(&path, Direction::Encode, unsafe { encoder_get_size() })?;
        let decoder_state_size = state_size(&path, Direction::Decode, unsafe { decoder_get_size() })?;

        debug!(
            path = %path.display(),
            encoder_state_size,
            decoder_state_size,
            "Loaded G.729A library"
        );

        Ok(Self {
            path,
            encoder_state_size,
            decoder_state_size,
            encoder_init,
            encoder_process,
            decoder_init,
            decoder_process,
            _library: library,
        })
    }

    /// Path the library was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for G729aLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("G729aLibrary")
            .field("path", &self.path)
            .field("encoder_state_size", &self.encoder_state_size)
            .field("decoder_state_size", &self.decoder_state_size)
            .finish_non_exhaustive()
    }
}

fn resolve<T: Copy>(library: &Library, path: &Path, name: &'static str) -> Result<T> {
    // SAFETY: every `T` requested is the C signature of the named export.
    unsafe { library.get::<T>(name.as_bytes()) }
        .map(|symbol| *symbol)
        .map_err(|e| StreamError::library_load(path, format!("{name}: {e}")))
}

fn state_size(path: &Path, direction: Direction, raw: c_int) -> Result<usize> {
    usize::try_from(raw).map_err(|_| {
        StreamError::library_load(
            path,
            format!("{} reported size {raw}", direction.state_size_symbol()),
        )
    })
}

fn pcm_to_samples(pcm: &[u8]) -> [i16; SAMPLES_PER_FRAME] {
    let mut samples = [0i16; SAMPLES_PER_FRAME];
    for (sample, bytes) in samples.iter_mut().zip(pcm.chunks_exact(2)) {
        *sample = i16::from_le_bytes([bytes[0], bytes[1]]);
    }
    samples
}

fn samples_to_pcm(samples: &[i16; SAMPLES_PER_FRAME], pcm: &mut [u8]) {
    for (bytes, sample) in pcm.chunks_exact_mut(2).zip(samples) {
        bytes.copy_from_slice(&sample.to_le_bytes());
    }
}

impl NativeCodec for G729aLibrary {
    fn encoder_state_size(&self) -> usize {
        self.encoder_state_size
    }

    fn encoder_init(&self, state: &mut [u8]) -> i32 {
        if state.len() < self.encoder_state_size {
            return BINDING_REJECTED;
        }
        // SAFETY: state spans at least the size the library asked for.
        unsafe { (self.encoder_init)(state.as_mut_ptr().cast()) }
    }

    fn encoder_process(&self, state: &mut [u8], pcm: &[u8], bitstream: &mut [u8]) -> i32 {
        if state.len() < self.encoder_state_size
            || pcm.len() != PCM_FRAME_BYTES
            || bitstream.len() != COMPRESSED_FRAME_BYTES
        {
            return BINDING_REJECTED;
        }
        let samples = pcm_to_samples(pcm);
        // SAFETY: lengths checked above; samples is an aligned [i16; 80].
        unsafe {
            (self.encoder_process)(
                state.as_mut_ptr().cast(),
                samples.as_ptr(),
                bitstream.as_mut_ptr(),
            )
        }
    }

    fn decoder_state_size(&self) -> usize {
        self.decoder_state_size
    }

    fn decoder_init(&self, state: &mut [u8]) -> i32 {
        if state.len() < self.decoder_state_size {
            return BINDING_REJECTED;
        }
        // SAFETY: state spans at least the size the library asked for.
        unsafe { (self.decoder_init)(state.as_mut_ptr().cast()) }
    }

    fn decoder_process(&self, state: &mut [u8], bitstream: &[u8], pcm: &mut [u8]) -> i32 {
        if state.len() < self.decoder_state_size
            || bitstream.len() != COMPRESSED_FRAME_BYTES
            || pcm.len() != PCM_FRAME_BYTES
        {
            return BINDING_REJECTED;
        }
        let mut samples = [0i16; SAMPLES_PER_FRAME];
        // SAFETY: lengths checked above; samples is an aligned [i16; 80].
        let status = unsafe {
            (self.decoder_process)(
                state.as_mut_ptr().cast(),
                bitstream.as_ptr(),
                samples.as_mut_ptr(),
            )
        };
        samples_to_pcm(&samples, pcm);
        status
    }
}
