//! Reader and writer for the line-oriented `key=value` mapping file.
//!
//! The format is the classic properties-file layout: `#`/`!` comments,
//! backslash line continuations, `=`, `:` or whitespace separators, and
//! backslash escapes with `\uXXXX` for anything that is not printable ASCII.

mod escape;

use chrono::Utc;
use std::collections::HashMap;
use std::io::{self, Write};

use crate::errors::ScriptMapError;

pub use self::escape::{escape, unescape};

const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S UTC %Y";

/// Parses the raw bytes of a mapping file.
///
/// Bytes are taken as ISO-8859-1, one byte per char; everything `store` writes
/// is ASCII, so this only matters for hand-edited files.
pub fn load(bytes: &[u8]) -> Result<HashMap<String, String>, ScriptMapError> {
    let text: String = bytes.iter().map(|&b| b as char).collect();
    let mut entries = HashMap::new();

    for line in logical_lines(&text) {
        let (key, value) = split_entry(&line)?;
        entries.insert(key, value);
    }

    Ok(entries)
}

/// Writes `entries` sorted by key, preceded by `comment` and a timestamp comment.
pub fn store<W: Write>(
    writer: &mut W,
    entries: &HashMap<String, String>,
    comment: &str,
) -> io::Result<()> {
    writeln!(writer, "# {}", comment)?;
    writeln!(writer, "# {}", Utc::now().format(TIMESTAMP_FORMAT))?;

    let mut keys: Vec<&String> = entries.keys().collect();
    keys.sort();
    for key in keys {
        writeln!(writer, "{}={}", escape(key, true), escape(&entries[key], false))?;
    }

    writer.flush()
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Splits on `\n`, `\r` and `\r\n`.
fn natural_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(['\n', '\r']) {
            Some(end) => {
                lines.push(&rest[..end]);
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + terminator..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Joins continued lines and drops blanks and comments. Escapes are left in place.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for raw in natural_lines(text) {
        let line = raw.trim_start_matches(is_blank);
        if !continuing && (line.is_empty() || line.starts_with(['#', '!'])) {
            continue;
        }

        // Only this natural line's backslashes count; a joined line starts fresh.
        let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            current.push_str(&line[..line.len() - 1]);
            continuing = true;
        } else {
            current.push_str(line);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }

    if continuing && !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_entry(line: &str) -> Result<(String, String), ScriptMapError> {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();

    let mut key_len = 0;
    let mut value_start = len;
    let mut has_separator = false;
    let mut preceding_backslash = false;

    while key_len < len {
        let c = chars[key_len];
        if !preceding_backslash && (c == '=' || c == ':') {
            value_start = key_len + 1;
            has_separator = true;
            break;
        }
        if !preceding_backslash && is_blank(c) {
            value_start = key_len + 1;
            break;
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
        key_len += 1;
    }

    while value_start < len {
        let c = chars[value_start];
        if !is_blank(c) {
            if !has_separator && (c == '=' || c == ':') {
                has_separator = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    Ok((
        unescape(&chars[..key_len])?,
        unescape(&chars[value_start..])?,
    ))
}
