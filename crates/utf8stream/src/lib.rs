//! A resumable, buffering UTF-8 decoder over blocking byte sources.
//!
//! [`Utf8Reader`] pulls bytes from a [`ByteSource`] into a fixed buffer and
//! decodes them either one code point at a time ([`Utf8Reader::read_code_point`],
//! full 31-bit values of the historical 1–6 byte form) or in bulk into UTF-16
//! code units ([`Utf8Reader::read_utf16`]). A multi-byte sequence may straddle
//! any number of source chunks; the in-flight [`DecodeState`] survives every
//! refill. Reads never allocate, and a reader can be closed and rebound to a new
//! source without reallocating its buffer.
//!
//! ```rust
//! use utf8stream::{SliceSource, Utf8Reader};
//!
//! let mut reader = Utf8Reader::new();
//! reader.bind(SliceSource::new("h€😀".as_bytes()));
//!
//! let mut units = [0u16; 8];
//! let n = reader.read_utf16(&mut units).unwrap().unwrap();
//! assert_eq!(&units[..n], &[0x68, 0x20AC, 0xD83D, 0xDE00]);
//! assert_eq!(reader.read_utf16(&mut units).unwrap(), None);
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
mod decode_state;
mod error;
mod options;
mod reader;
mod source;

#[cfg(test)]
mod tests;

pub use decode_state::{DecodeState, InvalidByte, Step};
pub use error::DecodeError;
pub use options::{DEFAULT_BUFFER_SIZE, ReaderOptions};
pub use reader::{CodePoints, Utf8Reader};
#[cfg(feature = "std")]
pub use source::ReadSource;
pub use source::{ByteSource, ChunkedSource, SliceSource};
