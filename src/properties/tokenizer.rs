//! Escaping and list splitting for property values
//!
//! Two characters are special inside a value: `,` separates list elements
//! and `\` escapes. `\,` is a literal comma and `\\` is a literal backslash.
//! A backslash in front of any other character is kept as-is, so
//! `C:\temp` needs no escaping.

/// List element delimiter.
pub const DELIMITER: char = ',';

const ESCAPE: char = '\\';

/// Splits a raw value into its list elements.
///
/// A value with no comma is unescaped and returned as the only element.
/// Otherwise it is split at every unescaped comma; each element is
/// unescaped and trimmed, and empty elements are dropped.
pub fn split_values(raw: &str) -> Vec<String> {
    if !raw.contains(DELIMITER) {
        return vec![unescape(raw)];
    }

    let mut values = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => match chars.peek() {
                Some(&next) if next == ESCAPE || next == DELIMITER => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push(ESCAPE),
            },
            DELIMITER => {
                push_trimmed(&mut values, &current);
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    push_trimmed(&mut values, &current);

    values
}

fn push_trimmed(values: &mut Vec<String>, token: &str) {
    let token = token.trim();
    if !token.is_empty() {
        values.push(token.to_string());
    }
}

/// Collapses `\\` to `\` and `\,` to `,`.
pub fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            if let Some(&next) = chars.peek() {
                if next == ESCAPE || next == DELIMITER {
                    result.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        result.push(ch);
    }

    result
}

/// Escapes a value so that [`split_values`] returns it unchanged as a
/// single element.
pub fn escape_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch == ESCAPE || ch == DELIMITER {
            result.push(ESCAPE);
        }
        result.push(ch);
    }
    result
}

/// Comment markers that would hide a key written at the start of a line.
const COMMENT_MARKERS: [char; 2] = ['#', '!'];

fn is_key_escapable(ch: char) -> bool {
    ch == ESCAPE || ch == '=' || ch.is_whitespace() || COMMENT_MARKERS.contains(&ch)
}

/// Escapes a key so that it survives being written as the start of a line.
///
/// Backslashes, `=` and whitespace are escaped everywhere; `#` and `!` are
/// escaped where they would otherwise start a comment line.
pub fn escape_key(key: &str) -> String {
    let mut result = String::with_capacity(key.len());
    for (index, ch) in key.chars().enumerate() {
        let leading_marker = index == 0 && COMMENT_MARKERS.contains(&ch);
        if ch == ESCAPE || ch == '=' || ch.is_whitespace() || leading_marker {
            result.push(ESCAPE);
        }
        result.push(ch);
    }
    result
}

/// Reverses [`escape_key`].
///
/// A backslash in front of any character `escape_key` never escapes is kept.
pub fn unescape_key(key: &str) -> String {
    let mut result = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            if let Some(&next) = chars.peek() {
                if is_key_escapable(next) {
                    result.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        result.push(ch);
    }

    result
}

/// Trims unescaped whitespace from both ends of a raw key.
///
/// Whitespace preceded by an escaping backslash is part of the key.
pub fn trim_key(raw: &str) -> &str {
    let raw = raw.trim_start();
    let trimmed = raw.trim_end();
    if trimmed.len() < raw.len() && ends_with_continuation(trimmed) {
        let escaped = raw[trimmed.len()..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        &raw[..trimmed.len() + escaped]
    } else {
        trimmed
    }
}

/// Returns `true` if the line ends with an odd number of backslashes,
/// meaning the last one escapes the line break.
pub fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == ESCAPE).count() % 2 == 1
}

/// Byte offset of the first `=` that is not escaped by a backslash.
pub fn find_separator(line: &str) -> Option<usize> {
    let mut backslashes = 0;
    for (index, ch) in line.char_indices() {
        match ch {
            ESCAPE => backslashes += 1,
            '=' if backslashes % 2 == 0 => return Some(index),
            _ => backslashes = 0,
        }
    }
    None
}
