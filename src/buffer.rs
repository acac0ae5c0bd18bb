//! Byte buffers a formula reads from, and the command an integer result is merged into.

use arrayvec::ArrayVec;
use snafu::ensure;

use crate::error::{Error, MergeOutOfRangeSnafu};

/// Number of bytes addressable by `BYTE0..BYTE9` and `PBYTE0..PBYTE9`.
pub const WINDOW_LEN: usize = 10;

/// Fixed window of protocol bytes, as seen by a formula.
///
/// Built by copying from a caller supplied slice; missing bytes read as zero
/// and bytes past [`WINDOW_LEN`] are ignored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ByteWindow([u8; WINDOW_LEN]);

impl ByteWindow {
    /// Copy up to `WINDOW_LEN` bytes from `bytes`.
    pub fn new(bytes: &[u8]) -> Self {
        let mut window = [0; WINDOW_LEN];
        for (dst, src) in window.iter_mut().zip(bytes) {
            *dst = *src;
        }
        Self(window)
    }

    /// The byte at `index`, or None if it is outside of the window.
    pub fn get(&self, index: u8) -> Option<u8> {
        self.0.get(usize::from(index)).copied()
    }

    pub const fn as_bytes(&self) -> &[u8; WINDOW_LEN] {
        &self.0
    }
}

impl From<[u8; WINDOW_LEN]> for ByteWindow {
    fn from(bytes: [u8; WINDOW_LEN]) -> Self {
        Self(bytes)
    }
}

type CommandStore = ArrayVec<u8, WINDOW_LEN>;

/// Bytes of a command being composed for transmission.
///
/// A write formula reads the current contents through `PBYTEn`, and the
/// caller merges the formula result back with [`merge()`](Self::merge()).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandBuffer {
    data: CommandStore,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a command from existing bytes, truncated to `WINDOW_LEN`.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut data = CommandStore::new();
        data.extend(bytes.iter().copied().take(WINDOW_LEN));
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// The command as seen by a formula's `PBYTEn` references.
    pub fn window(&self) -> ByteWindow {
        ByteWindow::new(&self.data)
    }

    /// Write the low `len` bytes of `value`, least significant first, starting
    /// at `position`. The command grows with zero bytes if needed.
    /// # Errors
    /// Returns [`Error::MergeOutOfRange`] if `len` isn't in `1..=4` or the
    /// bytes would end past the command capacity. The command is unchanged then.
    pub fn merge(&mut self, value: i32, position: usize, len: usize) -> Result<(), Error> {
        let end = position.checked_add(len);
        ensure!(
            (1..=4).contains(&len) && end.map_or(false, |end| end <= WINDOW_LEN),
            MergeOutOfRangeSnafu { position, len }
        );
        let end = position + len;
        while self.data.len() < end {
            self.data.push(0);
        }
        let le = value.to_le_bytes();
        self.data[position..end].copy_from_slice(&le[..len]);
        log::trace!("merged {:#x} into command: {:02x?}", value, self.data);
        Ok(())
    }
}
