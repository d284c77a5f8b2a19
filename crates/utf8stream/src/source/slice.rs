use core::convert::Infallible;

use super::ByteSource;

/// A source over an in-memory byte slice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
}

impl<'a> SliceSource<'a> {
    /// Creates a source that yields `bytes` and then ends.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Bytes not yet handed out.
    #[must_use]
    pub const fn remaining(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for SliceSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> From<&'a str> for SliceSource<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl ByteSource for SliceSource<'_> {
    type Error = Infallible;

    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = buf.len().min(self.bytes.len());
        let (head, tail) = self.bytes.split_at(n);
        buf[..n].copy_from_slice(head);
        self.bytes = tail;
        Ok(n)
    }

    fn available(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.bytes.is_empty())
    }
}
