#![expect(clippy::inline_always)]

use alloc::{boxed::Box, vec};
use core::fmt;

use bstr::BStr;
use log::trace;

use crate::source::ByteSource;

/// Fixed-capacity byte window refilled from a [`ByteSource`].
///
/// Bytes in `[start, end)` are unread. The window is only refilled once it is
/// fully drained, so no byte is ever moved or read twice.
pub(crate) struct ByteBuffer {
    bytes: Box<[u8]>,
    start: usize,
    end: usize,
    /// Bytes consumed from the source before the current window.
    consumed: u64,
}

impl ByteBuffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0; capacity.max(1)].into_boxed_slice(),
            start: 0,
            end: 0,
            consumed: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline(always)]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.unread().first().copied()
    }

    #[inline(always)]
    pub(crate) fn advance(&mut self) {
        debug_assert!(self.start < self.end);
        self.start += 1;
    }

    #[inline(always)]
    pub(crate) fn pop(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.start += 1;
        Some(b)
    }

    #[inline(always)]
    pub(crate) fn unread(&self) -> &[u8] {
        &self.bytes[self.start..self.end]
    }

    /// Absolute offset of the next unread byte.
    pub(crate) fn position(&self) -> u64 {
        self.consumed + self.start as u64
    }

    /// Replaces the drained window with one blocking read from `source`.
    ///
    /// Returns the number of bytes obtained; `0` means the source is
    /// exhausted and leaves the buffer empty.
    pub(crate) fn fill<S>(&mut self, source: &mut S) -> Result<usize, S::Error>
    where
        S: ByteSource + ?Sized,
    {
        debug_assert!(self.is_empty(), "refill with unread bytes");
        self.consumed += self.end as u64;
        self.start = 0;
        self.end = 0;

        let n = source.fill(&mut self.bytes)?;
        debug_assert!(n <= self.bytes.len(), "source overfilled the buffer");
        self.end = n.min(self.bytes.len());
        trace!(
            "refilled {} of {} bytes at offset {}",
            self.end,
            self.bytes.len(),
            self.consumed
        );
        Ok(self.end)
    }

    /// Empties the window and forgets the stream offset, keeping the storage.
    pub(crate) fn reset(&mut self) {
        self.start = 0;
        self.end = 0;
        self.consumed = 0;
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("capacity", &self.capacity())
            .field("position", &self.position())
            .field("unread", &BStr::new(self.unread()))
            .finish()
    }
}
