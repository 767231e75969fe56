//! Escape-sequence decoding for transliteration lists.

use super::ParseError;

/// A decoded character. `escaped` chars never act as range operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub ch: char,
    pub escaped: bool,
}

impl Token {
    fn plain(ch: char) -> Self {
        Self { ch, escaped: false }
    }

    fn escaped(ch: char) -> Self {
        Self { ch, escaped: true }
    }
}

/// Decode `\n`, `\t`, `\xNN`, `\uNNNN`, `\UNNNNNNNN`, octal `\NNN` and friends.
/// Any other escaped character stands for itself.
pub(crate) fn decode(raw: &str) -> Result<Vec<Token>, ParseError> {
    let mut out = Vec::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(Token::plain(c));
            continue;
        }
        let Some(e) = chars.next() else {
            return Err(ParseError::BadEscape(format!("trailing backslash in '{raw}'")));
        };
        let decoded = match e {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'f' => '\x0C',
            'v' => '\x0B',
            'a' => '\x07',
            'b' => '\x08',
            'x' => hex_escape(&mut chars, 2, raw)?,
            'u' => hex_escape(&mut chars, 4, raw)?,
            'U' => hex_escape(&mut chars, 8, raw)?,
            '0'..='7' => {
                let mut value = e.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                char::from_u32(value).ok_or_else(|| {
                    ParseError::BadEscape(format!("octal escape out of range in '{raw}'"))
                })?
            }
            other => other,
        };
        out.push(Token::escaped(decoded));
    }
    Ok(out)
}

fn hex_escape<I>(chars: &mut std::iter::Peekable<I>, digits: usize, raw: &str) -> Result<char, ParseError>
where
    I: Iterator<Item = char>,
{
    let mut value: u32 = 0;
    for _ in 0..digits {
        let d = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| ParseError::BadEscape(format!("truncated \\x, \\u or \\U escape in '{raw}'")))?;
        value = value * 16 + d;
    }
    char::from_u32(value)
        .ok_or_else(|| ParseError::BadEscape(format!("invalid code point {value:#x} in '{raw}'")))
}
