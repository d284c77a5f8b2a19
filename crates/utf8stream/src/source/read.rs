use std::io::{self, ErrorKind, Read};

use super::ByteSource;

/// Adapts any [`std::io::Read`] into a [`ByteSource`].
///
/// Reads interrupted by a signal are retried. `available` always reports
/// `false` since `Read` offers no non-blocking probe; closing drops nothing and
/// leaves the inner reader to be recovered with [`into_inner`](Self::into_inner).
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
}

impl<R: Read> ReadSource<R> {
    /// Wraps `inner`.
    pub const fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Returns a reference to the wrapped reader.
    pub const fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwraps the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    type Error = io::Error;

    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                res => return res,
            }
        }
    }
}
