//! Incremental UTF-8 decoding for streamed response bodies.
//!
//! The gateway relays raw bytes, and chunk boundaries fall wherever the
//! network puts them, including inside a multi-byte sequence. The decoder
//! holds the trailing incomplete sequence (at most three bytes) and
//! prepends it to the next chunk, so callers only ever see valid text.

/// Stateful decoder that carries split UTF-8 sequences across chunks.
#[derive(Debug, Default)]
pub struct Utf8Carry {
    carry: Vec<u8>,
}

impl Utf8Carry {
    pub fn new() -> Self {
        Self { carry: Vec::new() }
    }

    /// Decode a chunk, returning the text it completes.
    ///
    /// Invalid sequences become U+FFFD. An incomplete trailing sequence
    /// is held back until the next call.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        let mut buf = std::mem::take(&mut self.carry);
        buf.extend_from_slice(bytes);

        let mut out = String::with_capacity(buf.len());
        let mut input = buf.as_slice();
        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let (valid, after) = input.split_at(err.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        out.push_str(text);
                    }
                    match err.error_len() {
                        Some(len) => {
                            out.push('\u{FFFD}');
                            input = &after[len..];
                        }
                        None => {
                            // Sequence continues in the next chunk.
                            self.carry = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush at end of stream.
    ///
    /// A non-empty carry means the stream ended mid-sequence; it decodes
    /// to a single replacement character.
    pub fn finish(&mut self) -> Option<char> {
        if self.carry.is_empty() {
            None
        } else {
            self.carry.clear();
            Some('\u{FFFD}')
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        let mut decoder = Utf8Carry::new();
        assert_eq!(decoder.push(b"hello"), "hello");
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_split_three_byte_sequence() {
        // U+1E6D (ṭ, common in romanized Lai) encodes as E1 B9 AD.
        let mut decoder = Utf8Carry::new();
        assert_eq!(decoder.push(&[0x74, 0xE1, 0xB9]), "t");
        assert_eq!(decoder.push(&[0xAD, 0x69]), "\u{1E6D}i");
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_split_four_byte_sequence_byte_by_byte() {
        let emoji = "🙏".as_bytes();
        let mut decoder = Utf8Carry::new();
        let mut out = String::new();
        for byte in emoji {
            out.push_str(&decoder.push(&[*byte]));
        }
        assert_eq!(out, "🙏");
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_invalid_byte_becomes_replacement() {
        let mut decoder = Utf8Carry::new();
        assert_eq!(decoder.push(&[0x61, 0xFF, 0x62]), "a\u{FFFD}b");
    }

    #[test]
    fn test_invalid_continuation_resumes_after_error() {
        // E1 expects two continuation bytes; 0x41 cuts it short.
        let mut decoder = Utf8Carry::new();
        assert_eq!(decoder.push(&[0xE1, 0x41]), "\u{FFFD}A");
    }

    #[test]
    fn test_truncated_stream_flushes_replacement() {
        let mut decoder = Utf8Carry::new();
        assert_eq!(decoder.push(&[0xE1, 0xB9]), "");
        assert_eq!(decoder.finish(), Some('\u{FFFD}'));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn test_empty_chunks_are_harmless() {
        let mut decoder = Utf8Carry::new();
        assert_eq!(decoder.push(&[]), "");
        assert_eq!(decoder.push(&[0xE1, 0xB9]), "");
        assert_eq!(decoder.push(&[]), "");
        assert_eq!(decoder.push(&[0xAD]), "\u{1E6D}");
    }
}
