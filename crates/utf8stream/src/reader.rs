//! The buffered UTF-8 reader.
//!
//! Overview
//! - [`Utf8Reader`] owns a fixed byte buffer and a [`DecodeState`], and
//!   borrows bytes from at most one bound [`ByteSource`] at a time.
//! - The buffer is refilled only when drained. A refill is the only point at
//!   which a read may block.
//! - The decode state is passed explicitly into [`decode_next`]; a sequence
//!   interrupted by a drained buffer continues on the first byte of the next
//!   refill. No byte is reprocessed and none is dropped.
//!
//! Read paths
//! - [`Utf8Reader::read_code_point`] yields one raw value (up to 31 bits).
//!   ASCII bytes skip the state machine.
//! - [`Utf8Reader::read_utf16`] projects values onto UTF-16 units. It works on
//!   the current buffer window only: once the window drains the call returns,
//!   except that a sequence split by the window edge is always completed
//!   first. A non-ASCII character is only started when two output slots are
//!   free, so a surrogate pair is never split across calls.
//!
//! Lifecycle
//! - `bind` -> reads -> `close` -> `bind` ... Closing resets the buffer
//!   cursors and the decode state but keeps the allocation.

use core::iter::FusedIterator;

use log::{debug, warn};

use crate::{
    buffer::ByteBuffer,
    decode_state::{DecodeState, InvalidByte, Step},
    error::DecodeError,
    options::ReaderOptions,
    source::ByteSource,
};

type ReadResult<T, S> = Result<T, DecodeError<<S as ByteSource>::Error>>;

/// A resumable UTF-8 decoder over a blocking [`ByteSource`].
///
/// The reader is not synchronized; share it across threads only behind
/// external locking.
///
/// # Examples
///
/// ```rust
/// use utf8stream::{SliceSource, Utf8Reader};
///
/// let mut reader = Utf8Reader::with_capacity(16);
/// reader.bind(SliceSource::from("a\u{e9}"));
/// assert_eq!(reader.read_code_point().unwrap(), Some(0x61));
/// assert_eq!(reader.read_code_point().unwrap(), Some(0xE9));
/// assert_eq!(reader.read_code_point().unwrap(), None);
///
/// // Reuse the same buffer for another input.
/// reader.close().unwrap();
/// reader.bind(SliceSource::from("z"));
/// assert_eq!(reader.read_code_point().unwrap(), Some(0x7A));
/// ```
#[derive(Debug)]
pub struct Utf8Reader<S> {
    source: Option<S>,
    buffer: ByteBuffer,
    state: DecodeState,
}

impl<S: ByteSource> Default for Utf8Reader<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ByteSource> Utf8Reader<S> {
    /// Creates an unbound reader with the default 2048-byte buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ReaderOptions::default())
    }

    /// Creates an unbound reader whose buffer holds `buffer_size` bytes.
    #[must_use]
    pub fn with_capacity(buffer_size: usize) -> Self {
        Self::with_options(ReaderOptions { buffer_size })
    }

    /// Creates an unbound reader configured by `options`.
    #[must_use]
    pub fn with_options(options: ReaderOptions) -> Self {
        Self {
            source: None,
            buffer: ByteBuffer::with_capacity(options.buffer_size),
            state: DecodeState::new(),
        }
    }

    /// Size of the internal byte buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns `true` while a source is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    /// Number of bytes of the bound source consumed so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.buffer.position()
    }

    /// Binds `source` for reading until [`close`](Self::close).
    ///
    /// The buffer and decode state start out empty. A source that is still
    /// bound is dropped without being closed.
    pub fn bind(&mut self, source: S) -> &mut Self {
        if self.source.replace(source).is_some() {
            warn!("binding over an open source; the previous source is dropped unclosed");
        }
        self.buffer.reset();
        self.state.reset();
        debug!("bound source with a {}-byte buffer", self.buffer.capacity());
        self
    }

    /// Whether the next read is guaranteed not to block.
    ///
    /// True if unread bytes are buffered or the source reports available data.
    ///
    /// # Errors
    ///
    /// [`DecodeError::StreamClosed`] if no source is bound, or
    /// [`DecodeError::Source`] if the availability probe fails.
    pub fn ready(&mut self) -> ReadResult<bool, S> {
        let Some(source) = self.source.as_mut() else {
            return Err(DecodeError::StreamClosed);
        };
        if !self.buffer.is_empty() {
            return Ok(true);
        }
        source.available().map_err(DecodeError::Source)
    }

    /// Reads one code point, blocking if necessary.
    ///
    /// Returns the decoded value (up to 31 bits, as the historical 6-byte form
    /// allows) or `None` at end of stream.
    ///
    /// # Errors
    ///
    /// [`DecodeError::StreamClosed`], [`DecodeError::InvalidEncoding`],
    /// [`DecodeError::UnexpectedEndOfStream`] or [`DecodeError::Source`].
    #[inline]
    pub fn read_code_point(&mut self) -> ReadResult<Option<u32>, S> {
        let Some(source) = self.source.as_mut() else {
            return Err(DecodeError::StreamClosed);
        };
        if let Some(byte) = self.buffer.peek() {
            if byte.is_ascii() && self.state.is_idle() {
                self.buffer.advance();
                return Ok(Some(u32::from(byte)));
            }
        }
        decode_next(source, &mut self.buffer, &mut self.state)
    }

    /// Reads UTF-16 code units into `out`.
    ///
    /// Code points at or above U+10000 are written as surrogate pairs. To read
    /// into a window of a larger array, pass `&mut units[offset..offset + len]`.
    ///
    /// Returns the number of units written, or `None` if the source is
    /// exhausted and nothing was written. `Some(0)` is returned for an empty
    /// `out`, and when only one slot is free but the next character is not
    /// ASCII; call again with more room.
    ///
    /// # Errors
    ///
    /// Those of [`read_code_point`](Self::read_code_point), plus
    /// [`DecodeError::CodePointOutOfRange`] for a value above U+10FFFF.
    pub fn read_utf16(&mut self, out: &mut [u16]) -> ReadResult<Option<usize>, S> {
        let Some(source) = self.source.as_mut() else {
            return Err(DecodeError::StreamClosed);
        };
        if out.is_empty() {
            return Ok(Some(0));
        }
        let drained = self.buffer.is_empty();
        if drained && self.buffer.fill(source).map_err(DecodeError::Source)? == 0 {
            return if self.state.is_idle() {
                Ok(None)
            } else {
                Err(DecodeError::UnexpectedEndOfStream)
            };
        }

        let mut written = 0;
        while written < out.len() {
            let Some(byte) = self.buffer.peek() else {
                break;
            };
            if byte.is_ascii() && self.state.is_idle() {
                self.buffer.advance();
                out[written] = u16::from(byte);
                written += 1;
                continue;
            }
            if out.len() - written < 2 {
                break;
            }
            match decode_next(source, &mut self.buffer, &mut self.state)? {
                Some(value) => written += write_utf16::<S::Error>(value, &mut out[written..])?,
                None => break,
            }
        }
        Ok(Some(written))
    }

    /// Iterates over the remaining code points.
    ///
    /// The iterator ends after end of stream or after yielding the first error.
    pub fn code_points(&mut self) -> CodePoints<'_, S> {
        CodePoints {
            reader: self,
            done: false,
        }
    }

    /// Closes the bound source and resets the reader for reuse.
    ///
    /// Closing an unbound reader does nothing.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Source`] if the source fails to close. The reader is
    /// unbound and reset either way.
    pub fn close(&mut self) -> ReadResult<(), S> {
        let Some(mut source) = self.source.take() else {
            return Ok(());
        };
        debug!("closing source after {} bytes", self.buffer.position());
        self.buffer.reset();
        self.state.reset();
        source.close().map_err(DecodeError::Source)
    }

    /// Closes the bound source and hands the buffer to a reader for another
    /// source type, without reallocating it.
    ///
    /// # Errors
    ///
    /// Those of [`close`](Self::close).
    pub fn recycle<T: ByteSource>(mut self) -> ReadResult<Utf8Reader<T>, S> {
        self.close()?;
        debug!("recycling a {}-byte buffer", self.buffer.capacity());
        Ok(Utf8Reader {
            source: None,
            buffer: self.buffer,
            state: DecodeState::new(),
        })
    }
}

/// Runs the state machine until one value completes, refilling as needed.
fn decode_next<S: ByteSource>(
    source: &mut S,
    buffer: &mut ByteBuffer,
    state: &mut DecodeState,
) -> ReadResult<Option<u32>, S> {
    loop {
        while let Some(byte) = buffer.pop() {
            match state.step(byte) {
                Ok(Step::Done(value)) => return Ok(Some(value)),
                Ok(Step::NeedMore) => {}
                Err(InvalidByte(byte)) => {
                    return Err(DecodeError::InvalidEncoding {
                        byte,
                        offset: buffer.position() - 1,
                    });
                }
            }
        }

        if buffer.fill(source).map_err(DecodeError::Source)? == 0 {
            return if state.is_idle() {
                Ok(None)
            } else {
                Err(DecodeError::UnexpectedEndOfStream)
            };
        }
    }
}

/// Writes `value` as one unit or a surrogate pair; `out` must hold two slots.
#[expect(clippy::cast_possible_truncation)]
fn write_utf16<E>(value: u32, out: &mut [u16]) -> Result<usize, DecodeError<E>> {
    match value {
        0..=0xFFFF => {
            out[0] = value as u16;
            Ok(1)
        }
        0x1_0000..=0x10_FFFF => {
            let v = value - 0x1_0000;
            out[0] = (v >> 10) as u16 + 0xD800;
            out[1] = (v & 0x3FF) as u16 + 0xDC00;
            Ok(2)
        }
        _ => Err(DecodeError::CodePointOutOfRange(value)),
    }
}

/// Iterator over the code points of a [`Utf8Reader`].
///
/// Created by [`Utf8Reader::code_points`].
#[derive(Debug)]
pub struct CodePoints<'r, S> {
    reader: &'r mut Utf8Reader<S>,
    done: bool,
}

impl<S: ByteSource> Iterator for CodePoints<'_, S> {
    type Item = ReadResult<u32, S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.reader.read_code_point().transpose();
        self.done = !matches!(item, Some(Ok(_)));
        item
    }
}

impl<S: ByteSource> FusedIterator for CodePoints<'_, S> {}
