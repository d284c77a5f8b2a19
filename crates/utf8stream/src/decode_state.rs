//! The byte-at-a-time UTF-8 state machine.
//!
//! [`DecodeState`] accumulates the payload bits of one multi-byte sequence and
//! counts the continuation bytes still expected. It holds no reference to any
//! buffer, so a sequence can be fed across as many refills as the source
//! needs: whatever bytes arrive next simply continue the sequence.
//!
//! Lead bytes of the historical 1–6 byte form are accepted, so a sequence may
//! decode to any 31-bit value. Over-long encodings are not rejected.

/// What happened after feeding one more byte into the state machine?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Byte accepted, but the sequence is not finished yet.
    NeedMore,
    /// Byte accepted *and* it completed a sequence with this value.
    Done(u32),
}

/// A byte that cannot appear at the current position of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidByte(pub u8);

/// In-flight state of a UTF-8 sequence.
///
/// `remaining == 0` means the machine is idle and expects a lead byte; the
/// pending value is meaningless in that state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeState {
    pending: u32,
    remaining: u8,
}

impl DecodeState {
    /// Creates an idle state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: 0,
            remaining: 0,
        }
    }

    /// Returns `true` if no multi-byte sequence is in flight.
    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.remaining == 0
    }

    /// Number of continuation bytes the current sequence still expects.
    #[inline]
    #[must_use]
    pub const fn continuations_remaining(&self) -> u8 {
        self.remaining
    }

    /// Drops any in-flight sequence.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feeds one byte.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidByte`] for a lead byte outside `0x00–0x7F` /
    /// `0xC0–0xFD`, or for a non-continuation byte while a sequence is in
    /// flight. The state is left untouched in both cases.
    #[inline]
    pub fn step(&mut self, byte: u8) -> Result<Step, InvalidByte> {
        if self.remaining == 0 {
            let (bits, more) = match byte {
                0x00..=0x7F => return Ok(Step::Done(u32::from(byte))),
                0xC0..=0xDF => (byte & 0x1F, 1),
                0xE0..=0xEF => (byte & 0x0F, 2),
                0xF0..=0xF7 => (byte & 0x07, 3),
                0xF8..=0xFB => (byte & 0x03, 4),
                0xFC..=0xFD => (byte & 0x01, 5),
                _ => return Err(InvalidByte(byte)),
            };
            self.pending = u32::from(bits);
            self.remaining = more;
            return Ok(Step::NeedMore);
        }

        // 10xxxxxx
        if byte & 0xC0 != 0x80 {
            return Err(InvalidByte(byte));
        }
        self.pending = (self.pending << 6) | u32::from(byte & 0x3F);
        self.remaining -= 1;
        if self.remaining == 0 {
            Ok(Step::Done(self.pending))
        } else {
            Ok(Step::NeedMore)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    use super::{DecodeState, InvalidByte, Step};

    fn feed_all(state: &mut DecodeState, bytes: &[u8]) -> Result<Option<u32>, InvalidByte> {
        for &b in bytes {
            if let Step::Done(cp) = state.step(b)? {
                return Ok(Some(cp));
            }
        }
        Ok(None)
    }

    #[rstest]
    #[case(0xC3, 1)]
    #[case(0xE2, 2)]
    #[case(0xF0, 3)]
    #[case(0xF8, 4)]
    #[case(0xFC, 5)]
    #[case(0xFD, 5)]
    fn lead_byte_sets_continuation_count(#[case] lead: u8, #[case] expected: u8) {
        let mut state = DecodeState::new();
        assert_eq!(state.step(lead), Ok(Step::NeedMore));
        assert!(!state.is_idle());
        assert_eq!(state.continuations_remaining(), expected);
    }

    #[rstest]
    #[case(0x80)]
    #[case(0xBF)]
    #[case(0xFE)]
    #[case(0xFF)]
    fn rejects_invalid_lead(#[case] byte: u8) {
        let mut state = DecodeState::new();
        assert_eq!(state.step(byte), Err(InvalidByte(byte)));
        assert!(state.is_idle());
    }

    #[test]
    fn ascii_is_emitted_directly() {
        let mut state = DecodeState::new();
        assert_eq!(state.step(b'A'), Ok(Step::Done(0x41)));
        assert_eq!(state.step(0x00), Ok(Step::Done(0)));
        assert!(state.is_idle());
    }

    #[test]
    fn rejects_non_continuation_mid_sequence() {
        let mut state = DecodeState::new();
        assert_eq!(state.step(0xE2), Ok(Step::NeedMore));
        assert_eq!(state.step(b'a'), Err(InvalidByte(b'a')));
        assert_eq!(state.step(0xC3), Err(InvalidByte(0xC3)));
        assert_eq!(state.continuations_remaining(), 2);
    }

    #[test]
    fn sequence_resumes_after_pause() {
        let mut state = DecodeState::new();
        assert_eq!(feed_all(&mut state, &[0xF0, 0x9F]), Ok(None));
        let paused = state;
        assert_eq!(feed_all(&mut state, &[0x98, 0x80]), Ok(Some(0x1F600)));

        let mut resumed = paused;
        assert_eq!(feed_all(&mut resumed, &[0x98]), Ok(None));
        assert_eq!(feed_all(&mut resumed, &[0x80]), Ok(Some(0x1F600)));
    }

    #[test]
    fn six_byte_form_reaches_31_bits() {
        let mut state = DecodeState::new();
        assert_eq!(
            feed_all(&mut state, &[0xFD, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF]),
            Ok(Some(0x7FFF_FFFF))
        );
    }

    #[test]
    fn over_long_forms_are_accepted() {
        let mut state = DecodeState::new();
        assert_eq!(feed_all(&mut state, &[0xC0, 0x80]), Ok(Some(0)));
        assert_eq!(feed_all(&mut state, &[0xE0, 0x81, 0x81]), Ok(Some(0x41)));
    }

    #[test]
    fn reset_drops_pending_sequence() {
        let mut state = DecodeState::new();
        let _ = state.step(0xE2);
        state.reset();
        assert_eq!(state, DecodeState::new());
        assert_eq!(state.step(b'x'), Ok(Step::Done(u32::from(b'x'))));
    }

    #[quickcheck]
    #[allow(clippy::needless_pass_by_value)]
    fn arbitrary_bytes_stay_within_31_bits(bytes: Vec<u8>) -> bool {
        let mut state = DecodeState::new();
        bytes.iter().all(|&b| match state.step(b) {
            Ok(Step::Done(value)) => value <= 0x7FFF_FFFF && state.is_idle(),
            Ok(Step::NeedMore) => !state.is_idle() && state.continuations_remaining() <= 5,
            Err(_) => {
                state.reset();
                true
            }
        })
    }
}
