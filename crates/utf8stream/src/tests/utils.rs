use alloc::vec::Vec;
use core::{cell::Cell, convert::Infallible};

use crate::{ByteSource, ChunkedSource, DecodeError, Utf8Reader};

/// Encodes `value` (at most 31 bits) in the shortest historical 1–6 byte form.
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn encode_historic(value: u32, out: &mut Vec<u8>) {
    const LEADS: [u8; 7] = [0, 0, 0xC0, 0xE0, 0xF0, 0xF8, 0xFC];
    debug_assert!(value <= 0x7FFF_FFFF);

    let len = match value {
        0..0x80 => {
            out.push(value as u8);
            return;
        }
        0x80..0x800 => 2,
        0x800..0x1_0000 => 3,
        0x1_0000..0x20_0000 => 4,
        0x20_0000..0x400_0000 => 5,
        _ => 6,
    };
    let mut bytes = [0u8; 6];
    let mut rest = value;
    for byte in bytes[1..len].iter_mut().rev() {
        *byte = 0x80 | (rest & 0x3F) as u8;
        rest >>= 6;
    }
    bytes[0] = LEADS[len] | rest as u8;
    out.extend_from_slice(&bytes[..len]);
}

pub(crate) fn encode_all(values: &[u32]) -> Vec<u8> {
    let mut out = Vec::new();
    for &value in values {
        encode_historic(value, &mut out);
    }
    out
}

/// Splits `bytes` into chunks whose sizes are derived from `splits`.
pub(crate) fn split_chunks<'a>(bytes: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = bytes;
    for &s in splits {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(1 + s % rest.len());
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

pub(crate) fn read_all_code_points<S: ByteSource>(
    reader: &mut Utf8Reader<S>,
) -> Result<Vec<u32>, DecodeError<S::Error>> {
    reader.code_points().collect()
}

pub(crate) fn read_all_utf16<S: ByteSource>(
    reader: &mut Utf8Reader<S>,
    window: usize,
) -> Result<Vec<u16>, DecodeError<S::Error>> {
    let mut units = Vec::new();
    let mut out = alloc::vec![0u16; window];
    while let Some(n) = reader.read_utf16(&mut out)? {
        units.extend_from_slice(&out[..n]);
    }
    Ok(units)
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub(crate) fills: Cell<usize>,
    pub(crate) probes: Cell<usize>,
    pub(crate) closes: Cell<usize>,
}

/// A chunked source that counts calls into it.
pub(crate) struct CountingSource<'a, 'c> {
    inner: ChunkedSource<alloc::vec::IntoIter<&'a [u8]>>,
    counters: &'c Counters,
}

impl<'a, 'c> CountingSource<'a, 'c> {
    pub(crate) fn new(chunks: Vec<&'a [u8]>, counters: &'c Counters) -> Self {
        Self {
            inner: ChunkedSource::new(chunks),
            counters,
        }
    }
}

fn bump(cell: &Cell<usize>) {
    cell.set(cell.get() + 1);
}

impl ByteSource for CountingSource<'_, '_> {
    type Error = Infallible;

    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        bump(&self.counters.fills);
        self.inner.fill(buf)
    }

    fn available(&mut self) -> Result<bool, Self::Error> {
        bump(&self.counters.probes);
        self.inner.available()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        bump(&self.counters.closes);
        Ok(())
    }
}

#[test]
fn encode_historic_matches_core_for_scalars() {
    let text = "a\u{e9}\u{20ac}\u{1f600}";
    let values: Vec<u32> = text.chars().map(u32::from).collect();
    assert_eq!(encode_all(&values), text.as_bytes());
}

#[test]
fn encode_historic_long_forms() {
    assert_eq!(encode_all(&[0x20_0000]), [0xF8, 0x88, 0x80, 0x80, 0x80]);
    assert_eq!(encode_all(&[0x400_0000]), [0xFC, 0x84, 0x80, 0x80, 0x80, 0x80]);
    assert_eq!(encode_all(&[0x7FFF_FFFF]), [0xFD, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF]);
}
