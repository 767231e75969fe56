//! `y///` (alias `tr///`) transliteration with Perl's `c`, `d` and `s` flags.

use std::collections::{HashMap, HashSet};

use super::escape::decode;
use super::ordinal::{complement, expand_tokens};
use super::parse::{unescape_delimiter, Specifier};
use super::ParseError;

/// What happens to a matched character that has no explicit mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fallback {
    Keep,
    Delete,
    Replace(char),
}

/// One compiled transliteration.
///
/// Characters are matched as maximal runs drawn from the search set (or its complement);
/// each run is mapped character by character and, with `s`, repeated output characters
/// within the run collapse to one.
#[derive(Debug, Clone)]
pub struct Transliteration {
    search: HashSet<char>,
    complemented: bool,
    /// `None` marks a deletion.
    table: HashMap<char, Option<char>>,
    fallback: Fallback,
    squash: bool,
}

impl Transliteration {
    /// Build from a split specifier. Returns `None` for an empty, uncomplemented search list.
    pub(crate) fn from_specifier(spec: &Specifier<'_>) -> Result<Option<Self>, ParseError> {
        let (mut complemented, mut delete, mut squash) = (false, false, false);
        for flag in spec.flags.chars() {
            match flag {
                'c' => complemented = true,
                'd' => delete = true,
                's' => squash = true,
                other => {
                    return Err(ParseError::InvalidFlag {
                        kind: "transliteration",
                        flag: other,
                    });
                }
            }
        }

        let search = expand_tokens(&decode(&unescape_delimiter(spec.left, spec.delimiter))?)?;
        let replacement = expand_tokens(&decode(&unescape_delimiter(spec.right, spec.delimiter))?)?;

        if search.is_empty() && !complemented {
            return Ok(None);
        }
        Ok(Some(Self::build(&search, &replacement, complemented, delete, squash)))
    }

    /// Build from expanded lists.
    pub fn build(
        search: &[char],
        replacement: &[char],
        complemented: bool,
        delete: bool,
        squash: bool,
    ) -> Self {
        let domain = if complemented {
            complement(search, replacement.len())
        } else {
            search.to_vec()
        };

        let fallback = match (delete, replacement.last()) {
            (true, _) => Fallback::Delete,
            (false, Some(&last)) => Fallback::Replace(last),
            (false, None) => Fallback::Keep,
        };

        let mut table = HashMap::with_capacity(domain.len());
        for (i, &c) in domain.iter().enumerate() {
            let mapped = match replacement.get(i) {
                Some(&r) => Some(r),
                None => match fallback {
                    Fallback::Keep => Some(c),
                    Fallback::Delete => None,
                    Fallback::Replace(r) => Some(r),
                },
            };
            // The first mapping of a repeated search character wins.
            table.entry(c).or_insert(mapped);
        }

        Self {
            search: search.iter().copied().collect(),
            complemented,
            table,
            fallback,
            squash,
        }
    }

    fn matches(&self, c: char) -> bool {
        self.search.contains(&c) != self.complemented
    }

    fn map(&self, c: char) -> Option<char> {
        match self.table.get(&c) {
            Some(mapped) => *mapped,
            None => match self.fallback {
                Fallback::Keep => Some(c),
                Fallback::Delete => None,
                Fallback::Replace(r) => Some(r),
            },
        }
    }

    pub fn apply(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        // Last character emitted by the current run, for squashing.
        let mut last: Option<char> = None;
        for c in input.chars() {
            if !self.matches(c) {
                out.push(c);
                last = None;
                continue;
            }
            if let Some(m) = self.map(c) {
                if self.squash && last == Some(m) {
                    continue;
                }
                out.push(m);
                last = Some(m);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::parse::split_specifier;

    fn tr(expr: &str) -> Transliteration {
        let body = &expr[1..];
        let (spec, _) = split_specifier(body, expr).unwrap();
        Transliteration::from_specifier(&spec).unwrap().unwrap()
    }

    #[test]
    fn maps_one_to_one() {
        assert_eq!(tr("y/a-z/A-Z/").apply("Hello, world"), "HELLO, WORLD");
    }

    #[test]
    fn short_replacement_repeats_last() {
        assert_eq!(tr("y/abc/x/").apply("aabbcc-d"), "xxxxxx-d");
    }

    #[test]
    fn delete_drops_unmapped() {
        assert_eq!(tr("y/abc/x/d").apply("aabbcc-d"), "xx-d");
    }

    #[test]
    fn complement_delete_keeps_only_search_set() {
        assert_eq!(tr("y/a-z//cd").apply("ab1c "), "abc");
    }

    #[test]
    fn complement_maps_to_last_replacement() {
        assert_eq!(tr("y/a-z/_/c").apply("my file (1)"), "my_file____");
    }

    #[test]
    fn squash_collapses_runs() {
        assert_eq!(tr("y/a-z//s").apply("aabbc  dd"), "abc  d");
        assert_eq!(tr("y/ _/-/s").apply("a  b__c"), "a-b-c");
        assert_eq!(tr("y/a-z//cs").apply("a  ..b"), "a .b");
    }

    #[test]
    fn squash_after_delete() {
        assert_eq!(tr("y/a-/a/ds").apply("a-a-a"), "a");
    }

    #[test]
    fn first_mapping_wins() {
        assert_eq!(tr("y/aa/xy/").apply("a"), "x");
    }

    #[test]
    fn empty_search_is_noop() {
        let (spec, _) = split_specifier("//x/", "y//x/").unwrap();
        assert!(Transliteration::from_specifier(&spec).unwrap().is_none());
    }

    #[test]
    fn escapes_in_lists() {
        assert_eq!(tr(r"y/\t\-/ _/").apply("a\tb-c"), "a b_c");
        assert_eq!(tr(r"y/\//_/").apply("a/b"), "a_b");
    }

    #[test]
    fn invalid_flag_and_range() {
        let (spec, _) = split_specifier("/a/b/x", "y/a/b/x").unwrap();
        assert!(matches!(
            Transliteration::from_specifier(&spec),
            Err(ParseError::InvalidFlag { flag: 'x', .. })
        ));
        let (spec, _) = split_specifier("/z-a/b/", "y/z-a/b/").unwrap();
        assert!(matches!(
            Transliteration::from_specifier(&spec),
            Err(ParseError::InvalidRange(_))
        ));
    }
}
