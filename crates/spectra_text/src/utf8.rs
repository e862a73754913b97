//! UTF-8 → code points.
//!
//! Lenient: a byte that cannot start a well-formed sequence (stray
//! continuation byte, truncated tail, bad continuation, surrogate) yields
//! U+FFFD and decoding resumes at the next byte.

/// Substituted for every malformed sequence.
pub const REPLACEMENT: char = '\u{FFFD}';

/// Iterator over the code points of a byte slice.
#[derive(Debug, Clone)]
pub struct Utf8Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Utf8Decoder<'a> {
    /// Decoder positioned at the first byte.
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Continuation payload at `pos + offset`, if that byte is `10xxxxxx`.
    fn continuation(&self, offset: usize) -> Option<u32> {
        let byte = *self.bytes.get(self.pos + offset)?;
        (byte & 0xC0 == 0x80).then_some(u32::from(byte & 0x3F))
    }

    fn sequence(&self, lead: u8) -> Option<(u32, usize)> {
        match lead {
            0x00..=0x7F => Some((u32::from(lead), 1)),
            0xC0..=0xDF => {
                let cp = (u32::from(lead & 0x1F) << 6) | self.continuation(1)?;
                Some((cp, 2))
            }
            0xE0..=0xEF => {
                let cp = (u32::from(lead & 0x0F) << 12)
                    | (self.continuation(1)? << 6)
                    | self.continuation(2)?;
                Some((cp, 3))
            }
            0xF0..=0xF7 => {
                let cp = (u32::from(lead & 0x07) << 18)
                    | (self.continuation(1)? << 12)
                    | (self.continuation(2)? << 6)
                    | self.continuation(3)?;
                Some((cp, 4))
            }
            _ => None,
        }
    }
}

impl Iterator for Utf8Decoder<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let lead = *self.bytes.get(self.pos)?;
        match self.sequence(lead) {
            Some((cp, len)) => {
                self.pos += len;
                Some(char::from_u32(cp).unwrap_or(REPLACEMENT))
            }
            None => {
                self.pos += 1;
                Some(REPLACEMENT)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() - self.pos;
        (remaining.div_ceil(4), Some(remaining))
    }
}

/// Decodes `bytes` into code points.
#[must_use]
pub fn decode(bytes: &[u8]) -> Vec<char> {
    Utf8Decoder::new(bytes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_and_cjk() {
        assert_eq!(decode("Hi 帧率".as_bytes()), vec!['H', 'i', ' ', '帧', '率']);
    }

    #[test]
    fn test_four_byte_form() {
        assert_eq!(decode("🎨".as_bytes()), vec!['🎨']);
    }

    #[test]
    fn test_stray_continuation_is_replaced() {
        assert_eq!(decode(&[b'a', 0x80, b'b']), vec!['a', REPLACEMENT, 'b']);
    }

    #[test]
    fn test_truncated_tail_is_replaced() {
        // first two bytes of "帧"
        let bytes = &"帧".as_bytes()[..2];
        assert_eq!(decode(bytes), vec![REPLACEMENT, REPLACEMENT]);
    }

    #[test]
    fn test_invalid_lead_byte() {
        assert_eq!(decode(&[0xFF, b'x']), vec![REPLACEMENT, 'x']);
    }

    #[test]
    fn test_empty() {
        assert!(decode(b"").is_empty());
    }
}
