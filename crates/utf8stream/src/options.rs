/// Buffer size used by [`Utf8Reader::new`](crate::Utf8Reader::new).
pub const DEFAULT_BUFFER_SIZE: usize = 2048;

/// Configuration options for a [`Utf8Reader`](crate::Utf8Reader).
///
/// # Examples
///
/// ```rust
/// use utf8stream::{ReaderOptions, SliceSource, Utf8Reader};
///
/// let reader: Utf8Reader<SliceSource<'_>> = Utf8Reader::with_options(ReaderOptions {
///     buffer_size: 64,
/// });
/// assert_eq!(reader.capacity(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderOptions {
    /// Number of bytes requested from the source per refill.
    ///
    /// A size of zero is treated as one byte.
    ///
    /// # Default
    ///
    /// `2048`
    pub buffer_size: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}
