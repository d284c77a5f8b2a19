use thiserror::Error;

/// Failure of a [`Utf8Reader`](crate::Utf8Reader) operation.
///
/// `E` is the error type of the bound [`ByteSource`](crate::ByteSource).
/// After [`InvalidEncoding`](Self::InvalidEncoding) or
/// [`UnexpectedEndOfStream`](Self::UnexpectedEndOfStream) the reader may hold a
/// half-decoded sequence and must be closed and rebound before further use.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError<E> {
    /// No byte source is bound.
    #[error("stream closed")]
    StreamClosed,
    /// A byte that is neither a valid lead byte nor the continuation byte the
    /// current sequence expects.
    #[error("invalid UTF-8 encoding: unexpected byte 0x{byte:02X} at offset {offset}")]
    InvalidEncoding {
        /// The offending byte.
        byte: u8,
        /// Absolute offset of `byte` in the bound source.
        offset: u64,
    },
    /// The source ended in the middle of a multi-byte sequence.
    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,
    /// A decoded value above U+10FFFF cannot be projected to UTF-16.
    #[error("cannot convert U+{0:X} to UTF-16 (code point greater than U+10FFFF)")]
    CodePointOutOfRange(u32),
    /// The byte source itself failed.
    #[error("source error: {0}")]
    Source(E),
}
