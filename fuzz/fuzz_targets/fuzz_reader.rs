#![no_main]
use libfuzzer_sys::fuzz_target;
use utf8stream::{ChunkedSource, DecodeError, Utf8Reader};

const HEADER: usize = 5; // 1 buffer-size byte + 4-byte split seed

/// Split `data` into chunks using a deterministic seed. Unlike text splitting,
/// chunk edges may fall anywhere, including inside a multi-byte sequence.
fn split_into_chunks(data: &[u8], split_seed: u64) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    let mut seed = split_seed;
    while !rest.is_empty() {
        let size = (seed as usize % rest.len()) + 1;
        let (head, tail) = rest.split_at(size);
        chunks.push(head);
        rest = tail;
        seed = seed.rotate_left(7) ^ 0x9E37_79B9;
    }
    chunks
}

fn reader(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let buffer_size = 1 + usize::from(data[0] % 32);
    let split_seed = u32::from_le_bytes(data[1..5].try_into().unwrap()) as u64;
    let data = &data[HEADER..];
    let chunks = split_into_chunks(data, split_seed);

    // Raw code points through one buffer size...
    let mut raw = Utf8Reader::with_capacity(buffer_size);
    raw.bind(ChunkedSource::new(chunks.iter().copied()));
    let code_points: Result<Vec<u32>, _> = raw.code_points().collect();

    // ...and UTF-16 through a single whole-input chunk.
    let mut bulk = Utf8Reader::new();
    bulk.bind(ChunkedSource::new([data]));
    let mut units = Vec::new();
    let mut window = [0u16; 7];
    let bulk_result = loop {
        match bulk.read_utf16(&mut window) {
            Ok(Some(n)) => units.extend_from_slice(&window[..n]),
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    match code_points {
        Ok(values) if values.iter().all(|&v| v <= 0x10_FFFF) => {
            assert!(bulk_result.is_ok(), "bulk failed on decodable input");
            let mut expected = Vec::new();
            for v in values {
                if v < 0x1_0000 {
                    expected.push(v as u16);
                } else {
                    let v = v - 0x1_0000;
                    expected.push((v >> 10) as u16 + 0xD800);
                    expected.push((v & 0x3FF) as u16 + 0xDC00);
                }
            }
            assert_eq!(units, expected);
        }
        Ok(_) => assert!(matches!(bulk_result, Err(DecodeError::CodePointOutOfRange(_)))),
        // A value the bulk path cannot project may come before the bad byte.
        Err(e) => assert!(
            bulk_result == Err(e)
                || matches!(bulk_result, Err(DecodeError::CodePointOutOfRange(_)))
        ),
    }
}

fuzz_target!(|data: &[u8]| reader(data));
