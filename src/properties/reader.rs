//! Line-oriented reader for the property text format
//!
//! [`PropertiesReader`] turns physical lines into logical `key=value`
//! lines. It skips blank and comment lines and joins continued lines; it
//! does not interpret the key or the value.

use std::io::BufRead;

use log::debug;

use super::tokenizer::{ends_with_continuation, find_separator, trim_key, unescape_key};

/// Comment markers recognized at the start of a line.
const COMMENT_MARKERS: [char; 2] = ['#', '!'];

/// Parser state between physical lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    /// Looking for the first line of the next property.
    ReadingKey,
    /// Holding a line that may or may not continue.
    ReadingValue,
    /// The held line ended with an escaping backslash.
    Continuation,
}

/// Reads logical property lines from a buffered source.
pub struct PropertiesReader<R> {
    inner: R,
    line_number: usize,
}

impl<R: BufRead> PropertiesReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line_number: 0,
        }
    }

    /// Number of physical lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        Ok(Some(line.trim().to_string()))
    }

    /// Returns the next logical line, or `None` at end of input.
    ///
    /// A continuation still pending at end of input is returned as-is
    /// rather than dropped.
    pub fn read_property(&mut self) -> std::io::Result<Option<String>> {
        let mut state = ReadState::ReadingKey;
        let mut buffer = String::new();

        loop {
            state = match state {
                ReadState::ReadingKey => match self.read_line()? {
                    None => return Ok(None),
                    Some(line) if line.is_empty() || line.starts_with(COMMENT_MARKERS) => {
                        ReadState::ReadingKey
                    }
                    Some(line) => {
                        buffer = line;
                        ReadState::ReadingValue
                    }
                },
                ReadState::ReadingValue => {
                    if !ends_with_continuation(&buffer) {
                        return Ok(Some(buffer));
                    }
                    buffer.pop();
                    ReadState::Continuation
                }
                ReadState::Continuation => match self.read_line()? {
                    None => {
                        debug!(
                            "Continuation pending at end of input after line {}; flushing",
                            self.line_number
                        );
                        return Ok(Some(buffer));
                    }
                    Some(line) => {
                        buffer.push_str(&line);
                        ReadState::ReadingValue
                    }
                },
            };
        }
    }
}

/// Splits a logical line at its first unescaped `=`.
///
/// Returns `None` for lines without a separator or with an empty key.
pub fn split_key_value(line: &str) -> Option<(String, String)> {
    let separator = find_separator(line)?;
    let key = unescape_key(trim_key(&line[..separator]));
    if key.is_empty() {
        return None;
    }
    let value = line[separator + 1..].trim().to_string();
    Some((key, value))
}
