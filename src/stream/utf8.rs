//! Incremental UTF-8 decoding of response body chunks.
//!
//! Transports cut the body wherever they like, including in the middle of a
//! multi-byte character. The line splitter only accepts whole characters, so
//! an incomplete trailing sequence is held back until the next chunk.

const REPLACEMENT: char = '\u{FFFD}';

/// Stateful byte-to-text decoder for one response body.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Leading bytes of a character cut off at the end of the last chunk
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning every complete character.
    ///
    /// Invalid sequences become U+FFFD. An incomplete sequence at the end
    /// of the chunk is kept for the next call.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let owned;
        let mut rest: &[u8] = if self.pending.is_empty() {
            bytes
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(bytes);
            owned = joined;
            &owned
        };

        let mut out = String::with_capacity(rest.len());
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    if let Ok(text) = std::str::from_utf8(&rest[..valid]) {
                        out.push_str(text);
                    }
                    match err.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT);
                            rest = &rest[valid + len..];
                        }
                        None => {
                            self.pending = rest[valid..].to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush at end of body. A dangling partial character becomes U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            REPLACEMENT.to_string()
        }
    }

    /// Whether bytes of an unfinished character are being held.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
