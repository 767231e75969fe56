//! Character-range expansion for transliteration lists.

use super::escape::Token;
use super::ParseError;
use std::collections::HashSet;

/// Expand `X-Y` ranges into every code point from X to Y inclusive.
///
/// A `-` only acts as a range operator when it is unescaped and has a character on
/// both sides; otherwise it is literal. Surrogate code points are skipped.
pub(crate) fn expand_tokens(tokens: &[Token]) -> Result<Vec<char>, ParseError> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let is_range = i + 2 < tokens.len() && tokens[i + 1].ch == '-' && !tokens[i + 1].escaped;
        if !is_range {
            out.push(tokens[i].ch);
            i += 1;
            continue;
        }
        let (start, end) = (tokens[i].ch, tokens[i + 2].ch);
        if start > end {
            return Err(ParseError::InvalidRange(format!("{start}-{end}")));
        }
        out.extend((start as u32..=end as u32).filter_map(char::from_u32));
        i += 3;
    }
    Ok(out)
}

/// Expand ranges in an already-decoded list. Every character is treated as unescaped.
pub fn expand_ranges(list: &str) -> Result<Vec<char>, ParseError> {
    let tokens: Vec<Token> = list
        .chars()
        .map(|ch| Token { ch, escaped: false })
        .collect();
    expand_tokens(&tokens)
}

/// The first `len` code points, in ascending order, that are not in `members`.
pub fn complement(members: &[char], len: usize) -> Vec<char> {
    let members: HashSet<char> = members.iter().copied().collect();
    (0..=char::MAX as u32)
        .filter_map(char::from_u32)
        .filter(|c| !members.contains(c))
        .take(len)
        .collect()
}
