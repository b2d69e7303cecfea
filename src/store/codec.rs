//! Properties-file syntax: logical line assembly, key/value splitting and escaping.
//!
//! The accepted syntax is the conventional `.properties` one:
//! - `#` and `!` start comment lines
//! - a trailing odd run of backslashes joins the next physical line
//! - the key ends at the first unescaped `=`, `:` or blank; a line with no
//!   separator is a key with an empty value
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes; any other escaped char is itself
//!
//! Rendering escapes whatever the parser would otherwise reinterpret, so
//! `parse(render(entries)) == entries` for any entries.

use crate::error::{Result, StampError};

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Parses properties text into `(key, value)` pairs in file order.
///
/// Duplicate keys are returned as-is; collapsing them is the caller's job.
pub fn parse_entries(text: &str) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();
    let mut lines = text.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let line_no = idx + 1;
        let trimmed = raw.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while has_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        entries.push(split_entry(&logical, line_no)?);
    }

    Ok(entries)
}

fn split_entry(logical: &str, line_no: usize) -> Result<(String, String)> {
    let chars: Vec<char> = logical.chars().collect();

    let mut key_end = None;
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            key_end = Some(i);
            break;
        }
    }

    let Some(key_end) = key_end else {
        return Ok((unescape(logical, line_no)?, String::new()));
    };

    let mut pos = key_end;
    while pos < chars.len() && is_blank(chars[pos]) {
        pos += 1;
    }
    if pos < chars.len() && (chars[pos] == '=' || chars[pos] == ':') {
        pos += 1;
    }
    while pos < chars.len() && is_blank(chars[pos]) {
        pos += 1;
    }

    let raw_key: String = chars[..key_end].iter().collect();
    let raw_value: String = chars[pos..].iter().collect();

    Ok((
        unescape(&raw_key, line_no)?,
        unescape(&raw_value, line_no)?,
    ))
}

fn read_hex4(chars: &mut std::str::Chars<'_>, line_no: usize) -> Result<u32> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.chars().count() != 4 {
        return Err(StampError::parse(format!(
            "line {}: truncated \\u escape '\\u{}'",
            line_no, hex
        )));
    }
    u32::from_str_radix(&hex, 16).map_err(|_| {
        StampError::parse(format!(
            "line {}: malformed \\u escape '\\u{}'",
            line_no, hex
        ))
    })
}

fn unescape(raw: &str, line_no: usize) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let mut code = read_hex4(&mut chars, line_no)?;
                // UTF-16 surrogate pair written as two escapes
                if (0xD800..0xDC00).contains(&code) {
                    let marker: String = chars.by_ref().take(2).collect();
                    let low = if marker == "\\u" {
                        read_hex4(&mut chars, line_no)?
                    } else {
                        0
                    };
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(StampError::parse(format!(
                            "line {}: unpaired surrogate \\u{:04X}",
                            line_no, code
                        )));
                    }
                    code = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                }
                let decoded = char::from_u32(code).ok_or_else(|| {
                    StampError::parse(format!(
                        "line {}: invalid code point \\u{:04X}",
                        line_no, code
                    ))
                })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            // dangling backslash from a continuation at end of input
            None => {}
        }
    }

    Ok(out)
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Renders a header comment and entries as properties text.
///
/// Every header line is emitted as its own `#` comment.
pub fn render_entries<'a, I>(header: &str, entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for line in header.lines() {
        out.push('#');
        out.push_str(line);
        out.push('\n');
    }
    for (key, value) in entries {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}
