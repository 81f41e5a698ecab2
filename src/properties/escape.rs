use crate::errors::ScriptMapError;

/// Escapes a key (`escape_space = true`) or a value (`false`) for one `key=value` line.
///
/// Values only get their leading space escaped. Anything outside printable ASCII
/// is written as `\uXXXX` UTF-16 code units so the file stays plain ASCII.
pub fn escape(text: &str, escape_space: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            ' ' if i == 0 || escape_space => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    out.push_str(&format!("\\u{:04X}", unit));
                }
            }
        }
    }
    out
}

/// Reverses `escape`, and also accepts the looser forms a hand-edited file may
/// contain: any `\c` other than the known escapes stands for `c` itself.
pub fn unescape(raw: &[char]) -> Result<String, ScriptMapError> {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut chars = raw.iter().copied();

    while let Some(c) = chars.next() {
        if c != '\\' {
            push_char(&mut units, c);
            continue;
        }
        match chars.next() {
            Some('u') => {
                let mut unit: u16 = 0;
                for _ in 0..4 {
                    let digit = chars
                        .next()
                        .and_then(|d| d.to_digit(16))
                        .ok_or_else(|| malformed("malformed \\uxxxx encoding", raw))?;
                    unit = (unit << 4) | digit as u16;
                }
                units.push(unit);
            }
            Some('t') => units.push('\t' as u16),
            Some('n') => units.push('\n' as u16),
            Some('r') => units.push('\r' as u16),
            Some('f') => units.push(0x0c),
            Some(other) => push_char(&mut units, other),
            None => {}
        }
    }

    String::from_utf16(&units).map_err(|_| malformed("unpaired surrogate", raw))
}

fn push_char(units: &mut Vec<u16>, c: char) {
    let mut buf = [0u16; 2];
    units.extend_from_slice(c.encode_utf16(&mut buf));
}

fn malformed(what: &str, raw: &[char]) -> ScriptMapError {
    ScriptMapError::MalformedEntry(format!("{} in '{}'", what, raw.iter().collect::<String>()))
}
