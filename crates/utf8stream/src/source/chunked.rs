use core::convert::Infallible;

use super::ByteSource;

/// A source that replays a sequence of byte chunks.
///
/// A single [`fill`](ByteSource::fill) never returns bytes from two different
/// chunks, so the chunk boundaries chosen by the caller are exactly the points
/// at which the reader has to refill. Empty chunks are skipped.
///
/// ```rust
/// use utf8stream::{ChunkedSource, Utf8Reader};
///
/// // U+20AC split after its lead byte.
/// let chunks: [&[u8]; 2] = [&[0xE2], &[0x82, 0xAC]];
/// let mut reader = Utf8Reader::new();
/// reader.bind(ChunkedSource::new(chunks));
/// assert_eq!(reader.read_code_point().unwrap(), Some(0x20AC));
/// ```
#[derive(Debug)]
pub struct ChunkedSource<I: Iterator> {
    chunks: I,
    current: Option<I::Item>,
    offset: usize,
}

impl<I> ChunkedSource<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    /// Creates a source over `chunks`.
    pub fn new<C>(chunks: C) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        Self {
            chunks: chunks.into_iter(),
            current: None,
            offset: 0,
        }
    }

    fn pending(&self) -> &[u8] {
        match &self.current {
            Some(chunk) => &chunk.as_ref()[self.offset..],
            None => &[],
        }
    }
}

impl<I> ByteSource for ChunkedSource<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    type Error = Infallible;

    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pending().is_empty() {
            let Some(next) = self.chunks.next() else {
                self.current = None;
                return Ok(0);
            };
            self.current = Some(next);
            self.offset = 0;
        }

        let pending = self.pending();
        let n = buf.len().min(pending.len());
        buf[..n].copy_from_slice(&pending[..n]);
        self.offset += n;
        Ok(n)
    }

    fn available(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pending().is_empty())
    }
}
