//! Newline framing of decoded body text.
//!
//! Chunk boundaries carry no meaning: a frame may arrive split over any
//! number of chunks, and one chunk may hold many frames. [`LineSplitter`]
//! keeps the unterminated tail (the carry) between chunks and hands out only
//! complete lines.

/// Splits arbitrarily chunked text into complete, non-blank lines.
#[derive(Debug, Default)]
pub struct LineSplitter {
    /// Text after the last newline seen so far
    carry: String,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return the lines it completed, in order.
    ///
    /// Blank and whitespace-only lines are skipped. A trailing `\r` is
    /// stripped from each line.
    pub fn push(&mut self, chunk: &str) -> Lines {
        self.carry.push_str(chunk);
        match self.carry.rfind('\n') {
            Some(idx) => {
                let rest = self.carry.split_off(idx + 1);
                Lines::new(std::mem::replace(&mut self.carry, rest))
            }
            None => Lines::default(),
        }
    }

    /// Take the unterminated final line at end of stream, if it is not blank.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.carry);
        let line = rest.trim_end_matches('\r');
        if line.trim().is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }

    /// The partial line currently held back.
    pub fn carry(&self) -> &str {
        &self.carry
    }
}

/// Lazy iterator over the complete lines produced by one [`LineSplitter::push`].
#[derive(Debug, Default)]
pub struct Lines {
    buf: String,
    pos: usize,
}

impl Lines {
    fn new(buf: String) -> Self {
        Self { buf, pos: 0 }
    }
}

impl Iterator for Lines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.pos < self.buf.len() {
            let rest = &self.buf[self.pos..];
            let end = rest.find('\n').unwrap_or(rest.len());
            let line = rest[..end].trim_end_matches('\r');
            self.pos += end + 1;
            if !line.trim().is_empty() {
                return Some(line.to_string());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_all(chunks: &[&str]) -> (Vec<String>, Option<String>) {
        let mut splitter = LineSplitter::new();
        let mut lines = Vec::new();
        for chunk in chunks {
            lines.extend(splitter.push(chunk));
        }
        (lines, splitter.finish())
    }

    #[test]
    fn test_whole_lines_in_one_chunk() {
        let (lines, tail) = split_all(&["a\nb\n"]);
        assert_eq!(lines, vec!["a", "b"]);
        assert_eq!(tail, None);
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut splitter = LineSplitter::new();
        assert_eq!(splitter.push("{\"con").count(), 0);
        assert_eq!(splitter.carry(), "{\"con");
        let lines: Vec<String> = splitter.push("tent\":\"x\"}\n{\"do").collect();
        assert_eq!(lines, vec!["{\"content\":\"x\"}"]);
        assert_eq!(splitter.carry(), "{\"do");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let (lines, _) = split_all(&["a\n\n   \n\t\nb\n"]);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_crlf_stripped() {
        let (lines, tail) = split_all(&["a\r\n", "b\r", "\nc\r"]);
        assert_eq!(lines, vec!["a", "b"]);
        assert_eq!(tail, Some("c".to_string()));
    }

    #[test]
    fn test_final_line_without_newline() {
        let (lines, tail) = split_all(&["a\n", "{\"done\":true}"]);
        assert_eq!(lines, vec!["a"]);
        assert_eq!(tail, Some("{\"done\":true}".to_string()));
    }

    #[test]
    fn test_blank_final_carry_is_dropped() {
        let (_, tail) = split_all(&["a\n", "  "]);
        assert_eq!(tail, None);
    }

    #[test]
    fn test_finish_empties_carry() {
        let mut splitter = LineSplitter::new();
        splitter.push("partial");
        assert_eq!(splitter.finish(), Some("partial".to_string()));
        assert_eq!(splitter.finish(), None);
    }

    #[test]
    fn test_incremental_matches_single_split() {
        let body = "one\ntwo\n\nthree\nfour";
        let (whole, whole_tail) = split_all(&[body]);

        for size in 1..body.len() {
            let chunks: Vec<&str> = body
                .as_bytes()
                .chunks(size)
                .map(|c| std::str::from_utf8(c).unwrap())
                .collect();
            let (lines, tail) = split_all(&chunks);
            assert_eq!(lines, whole, "chunk size {}", size);
            assert_eq!(tail, whole_tail, "chunk size {}", size);
        }
    }
}
