//! Line source for datasheet text.
//!
//! Datasheets arrive as ASCII/Latin-1 with whatever line endings the
//! exporting system used. Bytes are decoded as Latin-1, so no byte sequence
//! is ever rejected, and `\r\n`, `\n` and a lone `\r` all end a line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Streams decoded lines out of an async buffered reader
#[derive(Debug)]
pub struct DatasheetLines<R> {
    reader: R,
    pending: Vec<u8>,
    // A `\r` ended the previous buffer; swallow a leading `\n` in the next one
    skip_lf: bool,
}

impl<R: AsyncBufRead + Unpin> DatasheetLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
            skip_lf: false,
        }
    }

    /// Next line without its terminator, or `None` at end of input
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        loop {
            let buf = self.reader.fill_buf().await?;

            if buf.is_empty() {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(self.take_pending()));
            }

            let mut start = 0;
            if self.skip_lf {
                self.skip_lf = false;
                if buf[0] == b'\n' {
                    start = 1;
                }
            }

            match buf[start..].iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(offset) => {
                    let end = start + offset;
                    self.pending.extend_from_slice(&buf[start..end]);

                    let mut used = end + 1;
                    if buf[end] == b'\r' {
                        if used < buf.len() {
                            if buf[used] == b'\n' {
                                used += 1;
                            }
                        } else {
                            self.skip_lf = true;
                        }
                    }

                    self.reader.consume(used);
                    return Ok(Some(self.take_pending()));
                }
                None => {
                    self.pending.extend_from_slice(&buf[start..]);
                    let used = buf.len();
                    self.reader.consume(used);
                }
            }
        }
    }

    fn take_pending(&mut self) -> String {
        let line = decode_latin1(&self.pending);
        self.pending.clear();
        line
    }
}

/// Every byte maps to the code point of the same value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Split in-memory text on CRLF, LF or CR
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(['\r', '\n']))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    async fn collect(bytes: &[u8], capacity: usize) -> Vec<String> {
        let reader = BufReader::with_capacity(capacity, bytes);
        let mut lines = DatasheetLines::new(reader);
        let mut out = Vec::new();
        while let Some(line) = lines.next_line().await.unwrap() {
            out.push(line);
        }
        out
    }

    #[tokio::test]
    async fn test_mixed_line_endings() {
        let lines = collect(b"one\ntwo\r\nthree\rfour", 64).await;
        assert_eq!(lines, vec!["one", "two", "three", "four"]);
    }

    #[tokio::test]
    async fn test_crlf_split_across_buffers() {
        // Capacity 4 puts the \r at the end of the first fill
        let lines = collect(b"abc\r\ndef\r\n", 4).await;
        assert_eq!(lines, vec!["abc", "def"]);
    }

    #[tokio::test]
    async fn test_long_line_spans_buffers() {
        let text = format!("{}\nshort\n", "x".repeat(100));
        let lines = collect(text.as_bytes(), 8).await;
        assert_eq!(lines, vec!["x".repeat(100), "short".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_lines_preserved() {
        let lines = collect(b"a\n\n\r\rb\n", 64).await;
        assert_eq!(lines, vec!["a", "", "", "", "b"]);
    }

    #[tokio::test]
    async fn test_empty_input() {
        assert!(collect(b"", 64).await.is_empty());
    }

    #[tokio::test]
    async fn test_latin1_bytes_decode() {
        let lines = collect(b"CA\xd1ON\n", 64).await;
        assert_eq!(lines, vec!["CA\u{d1}ON"]);
    }

    #[test]
    fn test_split_lines_mixed_endings() {
        let lines: Vec<_> = split_lines("a\r\nb\rc\nd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }
}
