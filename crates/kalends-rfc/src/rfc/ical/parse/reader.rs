//! Streaming content line reader (RFC 5545 §3.1).
//!
//! Unfolds a physical byte stream into logical lines one at a time.

use std::io::{self, BufRead};

/// One unfolded content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Physical line number (1-based) where this logical line starts.
    pub number: usize,
    /// Line content without terminator or folding markers.
    pub text: String,
}

/// Reads logical lines from a buffered stream.
///
/// A physical line ends at LF, with an optional preceding CR. When the next
/// physical line starts with a single SPACE or HTAB, that one byte is dropped
/// and the rest of the line is appended. Unfolding happens on bytes, so a fold
/// that splits a UTF-8 sequence is reassembled before decoding.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    physical_line: usize,
}

impl<R: BufRead> LineReader<R> {
    /// Wraps a buffered reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            physical_line: 0,
        }
    }

    /// Reads the next logical line.
    ///
    /// Blank physical lines between logical lines are skipped. Returns
    /// `Ok(None)` at end of stream. A final line without a terminator is
    /// returned once before end of stream is reported.
    ///
    /// ## Errors
    /// Returns an error if the underlying stream fails or the unfolded line
    /// is not valid UTF-8.
    pub fn read_line(&mut self) -> io::Result<Option<LogicalLine>> {
        let mut buf: Vec<u8> = Vec::new();
        let mut number = 0;

        loop {
            let mut physical = Vec::new();
            if self.inner.read_until(b'\n', &mut physical)? == 0 {
                if buf.is_empty() {
                    return Ok(None);
                }
                break;
            }
            self.physical_line += 1;
            strip_terminator(&mut physical);

            if buf.is_empty() && physical.is_empty() {
                continue;
            }
            if buf.is_empty() {
                number = self.physical_line;
            }
            buf.extend_from_slice(&physical);

            match self.inner.fill_buf()?.first() {
                Some(b' ' | b'\t') => self.inner.consume(1),
                _ => break,
            }
        }

        let text = String::from_utf8(buf).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {number} is not valid UTF-8: {e}"),
            )
        })?;

        tracing::trace!(line = number, len = text.len(), "Read logical line");

        Ok(Some(LogicalLine { number, text }))
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

/// Removes a trailing LF or CRLF.
fn strip_terminator(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}
