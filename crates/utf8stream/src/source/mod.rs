mod chunked;
#[cfg(feature = "std")]
mod read;
mod slice;

use core::{
    error::Error,
    fmt::{Debug, Display},
};

pub use chunked::ChunkedSource;
#[cfg(feature = "std")]
pub use read::ReadSource;
pub use slice::SliceSource;

/// A blocking producer of raw bytes.
///
/// This is the only capability a [`Utf8Reader`](crate::Utf8Reader) needs from
/// its input: fill a caller buffer, optionally report whether more data can be
/// had without blocking, and release the underlying resource.
pub trait ByteSource {
    /// Error reported by the underlying resource.
    type Error: Error + Debug + Display;

    /// Reads some bytes into `buf`, blocking until at least one byte is
    /// available or the source is exhausted.
    ///
    /// Returns the number of bytes written to the front of `buf`; `0` signals
    /// end of source.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying resource.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Whether the next [`fill`](Self::fill) is guaranteed not to block.
    ///
    /// The default reports `false`.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying resource.
    fn available(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    /// Releases the underlying resource.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying resource.
    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    #[inline]
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).fill(buf)
    }

    #[inline]
    fn available(&mut self) -> Result<bool, Self::Error> {
        (**self).available()
    }

    #[inline]
    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}
