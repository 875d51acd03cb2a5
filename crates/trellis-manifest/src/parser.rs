// SPDX-FileCopyrightText: 2026 Trellis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parser for properties-style factory manifests.
//!
//! ```text
//! # comment
//! svc.Greeter=pkg.EnglishGreeter,\
//!             pkg.FrenchGreeter
//! svc.Clock : pkg.SystemClock
//! ```
//!
//! Comment lines start with `#` or `!`. A trailing backslash continues the
//! entry on the next line. The key ends at the first unescaped `=`, `:` or
//! whitespace. Within one resource a repeated key replaces the earlier value.

use thiserror::Error;

/// Errors raised while parsing one manifest resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `\u` escape was not four hex digits, or left a surrogate unpaired.
    #[error("malformed \\uxxxx escape on line {line}")]
    MalformedEscape { line: usize },
}

/// Parse manifest text into `(key, values)` entries in first-declaration order.
pub fn parse_manifest(input: &str) -> Result<Vec<(String, Vec<String>)>, ParseError> {
    let mut entries: Vec<(String, Vec<String>)> = Vec::new();
    let mut lines = input.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line_no = index + 1;
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_entry(&logical);
        let key = unescape(raw_key, line_no)?;
        let values = split_values(&unescape(raw_value, line_no)?);

        match entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = values,
            None => entries.push((key, values)),
        }
    }

    Ok(entries)
}

/// Split a comma-delimited list, trimming segments and dropping empty ones.
pub fn split_values(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// A line continues when it ends in an odd number of backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into raw key and raw value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || c.is_whitespace() {
            key_end = i;
            break;
        }
    }

    let rest = line[key_end..].trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (&line[..key_end], rest.trim_start())
}

fn unescape(raw: &str, line: usize) -> Result<String, ParseError> {
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
            Some('f') => out.push('\u{000c}'),
            Some('u') => out.push(decode_unicode(&mut chars, line)?),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Decode the code point after `\u`, joining a surrogate pair written as
/// two consecutive escapes.
fn decode_unicode(chars: &mut std::str::Chars<'_>, line: usize) -> Result<char, ParseError> {
    let malformed = ParseError::MalformedEscape { line };
    let unit = hex4(chars).ok_or(malformed.clone())?;
    let code = match unit {
        0xD800..=0xDBFF => {
            let mut ahead = chars.clone();
            let low = match (ahead.next(), ahead.next()) {
                (Some('\\'), Some('u')) => hex4(&mut ahead),
                _ => None,
            }
            .filter(|low| (0xDC00..=0xDFFF).contains(low))
            .ok_or(malformed.clone())?;
            *chars = ahead;
            0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
        }
        _ => unit,
    };
    char::from_u32(code).ok_or(malformed)
}

/// Exactly four hex digits.
fn hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    (0..4).try_fold(0u32, |acc, _| {
        chars.next()?.to_digit(16).map(|digit| acc * 16 + digit)
    })
}
