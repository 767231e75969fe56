//! Expression splitting: `sSEPpatternSEPreplacementSEPflags` and the `y`/`tr` equivalent.

use super::substitute::Substitution;
use super::transliterate::Transliteration;
use super::{Operation, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Substitute,
    Transliterate,
}

/// The three raw parts of a specifier. Escapes are left in place for the
/// operation-specific parsers to interpret.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Specifier<'a> {
    pub delimiter: char,
    pub left: &'a str,
    pub right: &'a str,
    pub flags: &'a str,
}

/// Parse every operation in `text`.
pub(crate) fn parse_operations(text: &str) -> Result<Vec<Operation>, ParseError> {
    let mut ops = Vec::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start_matches([' ', '\t', ';']);
        if rest.is_empty() {
            return Ok(ops);
        }

        let (kind, keyword_len) = if rest.starts_with('s') {
            (Kind::Substitute, 1)
        } else if rest.starts_with('y') {
            (Kind::Transliterate, 1)
        } else if rest.starts_with("tr") {
            (Kind::Transliterate, 2)
        } else {
            return Err(ParseError::UnrecognizedOperation(rest.to_string()));
        };

        let body = &rest[keyword_len..];
        let (spec, consumed) = split_specifier(body, rest)?;

        let op = match kind {
            Kind::Substitute => {
                Substitution::from_specifier(&spec)?.map(Operation::Substitute)
            }
            Kind::Transliterate => {
                Transliteration::from_specifier(&spec)?.map(Operation::Transliterate)
            }
        };
        ops.extend(op);
        rest = &body[consumed..];
    }
}

/// Split `body` (text right after the keyword) into a specifier.
/// Returns the specifier and the number of bytes of `body` it used.
pub(crate) fn split_specifier<'a>(
    body: &'a str,
    expr: &str,
) -> Result<(Specifier<'a>, usize), ParseError> {
    let Some(delimiter) = body.chars().next() else {
        return Err(ParseError::Unterminated(expr.to_string()));
    };
    if delimiter.is_ascii_alphanumeric() {
        return Err(ParseError::InvalidDelimiter(expr.to_string()));
    }

    let start = delimiter.len_utf8();
    let left_end = find_delimiter(body, start, delimiter)
        .ok_or_else(|| ParseError::Unterminated(expr.to_string()))?;
    let right_start = left_end + delimiter.len_utf8();
    let right_end = find_delimiter(body, right_start, delimiter)
        .ok_or_else(|| ParseError::Unterminated(expr.to_string()))?;
    let flags_start = right_end + delimiter.len_utf8();
    let flags_len = body[flags_start..]
        .find(|c: char| c.is_whitespace() || c == ';')
        .unwrap_or(body.len() - flags_start);

    let spec = Specifier {
        delimiter,
        left: &body[start..left_end],
        right: &body[right_start..right_end],
        flags: &body[flags_start..flags_start + flags_len],
    };
    Ok((spec, flags_start + flags_len))
}

/// Byte offset of the next unescaped `delimiter` at or after `from`.
fn find_delimiter(s: &str, from: usize, delimiter: char) -> Option<usize> {
    if delimiter == '\\' {
        return s[from..].find('\\').map(|i| from + i);
    }
    let mut iter = s[from..].char_indices();
    while let Some((i, c)) = iter.next() {
        if c == '\\' {
            // A backslash always escapes the next character, the delimiter included.
            iter.next()?;
        } else if c == delimiter {
            return Some(from + i);
        }
    }
    None
}

/// Replace `\<delimiter>` with the bare delimiter, leaving other escapes alone.
pub(crate) fn unescape_delimiter(raw: &str, delimiter: char) -> String {
    if delimiter == '\\' {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(n) if n == delimiter => out.push(n),
            Some(n) => {
                out.push('\\');
                out.push(n);
            }
            None => out.push('\\'),
        }
    }
    out
}
