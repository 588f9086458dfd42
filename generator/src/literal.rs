//! Identifier mangling and string-literal escaping for emitted script text.

use std::fmt::Write as _;

const ESCAPE: char = '$';

/// Turn a symbol name into an identifier suffix.
///
/// ASCII letters, digits and `_` are kept, `$` is doubled, and every other
/// character becomes `$<hex code point>$`. Distinct names always produce
/// distinct suffixes.
pub fn mangle_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else if c == ESCAPE {
            out.push(ESCAPE);
            out.push(ESCAPE);
        } else {
            let _ = write!(out, "{}{:x}{}", ESCAPE, c as u32, ESCAPE);
        }
    }
    out
}

/// Render `value` as a double-quoted script string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }
    out.push('"');
    out
}
