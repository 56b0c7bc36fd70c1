//! Owned storage for one native coder state

/// Opaque, fixed-capacity state arena
///
/// Backed by `u64` words so the native side sees 8-byte alignment, and lent
/// out only as `&mut [u8]`. The layout is private to the native codec, so the
/// type is deliberately not `Clone`.
#[derive(Debug)]
pub struct CodecState {
    words: Box<[u64]>,
    len: usize,
}

impl CodecState {
    /// Allocate a zero-filled state of `len` bytes
    pub fn zeroed(len: usize) -> Self {
        let word_count = len.div_ceil(std::mem::size_of::<u64>());
        Self {
            words: vec![0u64; word_count].into_boxed_slice(),
            len,
        }
    }

    /// Size in bytes as reported by the native size query
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the arena holds no bytes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read-only view of the state bytes
    pub fn as_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice(&self.words)[..self.len]
    }

    /// Exclusive view handed to native calls
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut bytemuck::cast_slice_mut(&mut self.words)[..self.len]
    }
}
