//! `s///` substitution.
//!
//! Flags: `a` ASCII-only `\w \d \s \b` classes, `i` case-insensitive, `g` replace every match,
//! or a number N bounding the count (default 1, `0` means unbounded). `g` overrides N.
//!
//! The replacement uses sed-style references: `\1`..`\99`, `\g<name>`, `\g<1>`, plus
//! `\n`, `\t`, `\\`. A `$` is literal.

use regex::{Captures, Regex, RegexBuilder};

use super::parse::{unescape_delimiter, Specifier};
use super::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Group(usize),
    Named(String),
}

/// Compiled replacement template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Template {
    parts: Vec<Part>,
}

impl Template {
    fn parse(raw: &str, delimiter: char) -> Result<Self, ParseError> {
        let mut parts = Vec::new();
        let mut lit = String::new();
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '\\' || delimiter == '\\' {
                lit.push(c);
                continue;
            }
            let Some(e) = chars.next() else {
                return Err(ParseError::BadEscape(format!("trailing backslash in replacement '{raw}'")));
            };
            match e {
                '1'..='9' => {
                    let mut n = e.to_digit(10).unwrap_or(0) as usize;
                    if let Some(d) = chars.peek().and_then(|d| d.to_digit(10)) {
                        n = n * 10 + d as usize;
                        chars.next();
                    }
                    flush(&mut lit, &mut parts);
                    parts.push(Part::Group(n));
                }
                'g' => {
                    if chars.next() != Some('<') {
                        return Err(ParseError::BadEscape(format!("missing '<' after \\g in '{raw}'")));
                    }
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('>') => break,
                            Some(ch) => name.push(ch),
                            None => {
                                return Err(ParseError::BadEscape(format!("missing '>' after \\g<{name} in '{raw}'")));
                            }
                        }
                    }
                    flush(&mut lit, &mut parts);
                    match name.parse::<usize>() {
                        Ok(n) => parts.push(Part::Group(n)),
                        Err(_) if !name.is_empty() => parts.push(Part::Named(name)),
                        Err(_) => return Err(ParseError::InvalidGroupReference("\\g<>".into())),
                    }
                }
                'n' => lit.push('\n'),
                't' => lit.push('\t'),
                'r' => lit.push('\r'),
                'f' => lit.push('\x0C'),
                'v' => lit.push('\x0B'),
                'a' => lit.push('\x07'),
                'b' => lit.push('\x08'),
                '0' => lit.push('\0'),
                other if other.is_ascii_alphabetic() => {
                    return Err(ParseError::BadEscape(format!("\\{other} in replacement '{raw}'")));
                }
                other => lit.push(other),
            }
        }
        flush(&mut lit, &mut parts);
        Ok(Self { parts })
    }

    /// Reject references to groups the pattern does not define.
    fn check_against(&self, regex: &Regex) -> Result<(), ParseError> {
        for part in &self.parts {
            match part {
                Part::Group(n) if *n >= regex.captures_len() => {
                    return Err(ParseError::InvalidGroupReference(format!("\\{n}")));
                }
                Part::Named(name) if !regex.capture_names().flatten().any(|n| n == name) => {
                    return Err(ParseError::InvalidGroupReference(format!("\\g<{name}>")));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn expand(&self, caps: &Captures<'_>) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(s) => out.push_str(s),
                Part::Group(n) => out.push_str(caps.get(*n).map_or("", |m| m.as_str())),
                Part::Named(name) => out.push_str(caps.name(name).map_or("", |m| m.as_str())),
            }
        }
        out
    }

    fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

fn flush(lit: &mut String, parts: &mut Vec<Part>) {
    if !lit.is_empty() {
        parts.push(Part::Literal(std::mem::take(lit)));
    }
}

/// One compiled `s///` operation.
#[derive(Debug, Clone)]
pub struct Substitution {
    regex: Regex,
    template: Template,
    limit: usize,
}

impl Substitution {
    /// Build from a split specifier. Returns `None` when both pattern and
    /// replacement are empty, which is a no-op.
    pub(crate) fn from_specifier(spec: &Specifier<'_>) -> Result<Option<Self>, ParseError> {
        let mut ascii = false;
        let mut case_insensitive = false;
        let mut global = false;
        let mut count: Option<usize> = None;
        let mut digits = String::new();
        let mut digits_done = false;

        for flag in spec.flags.chars() {
            if flag.is_ascii_digit() {
                if !digits_done {
                    digits.push(flag);
                }
                continue;
            }
            if !digits.is_empty() {
                digits_done = true;
            }
            match flag {
                'a' => ascii = true,
                'i' => case_insensitive = true,
                'g' => global = true,
                other => {
                    return Err(ParseError::InvalidFlag {
                        kind: "regular expression",
                        flag: other,
                    });
                }
            }
        }
        if !digits.is_empty() {
            // Saturate absurdly large counts instead of rejecting them.
            count = Some(digits.parse().unwrap_or(usize::MAX));
        }

        if spec.left.is_empty() && spec.right.is_empty() {
            return Ok(None);
        }

        let limit = if global { 0 } else { count.unwrap_or(1) };
        let pattern = prepare_pattern(spec.left, spec.delimiter, ascii);
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(case_insensitive)
            .build()?;
        let template = Template::parse(&unescape_delimiter(spec.right, spec.delimiter), spec.delimiter)?;
        template.check_against(&regex)?;

        Ok(Some(Self { regex, template, limit }))
    }

    /// Maximum number of replacements; 0 is unbounded.
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn apply(&self, input: &str) -> String {
        if self.template.is_empty() {
            return self.regex.replacen(input, self.limit, "").into_owned();
        }
        self.regex
            .replacen(input, self.limit, |caps: &Captures<'_>| self.template.expand(caps))
            .into_owned()
    }
}

const REGEX_META: &str = r"\.+*?()|[]{}^$#&-~";

/// Normalize a pattern for the regex engine: drop escapes on a non-meta delimiter,
/// map `\Z` to `\z`, and, in ASCII mode, pin the Perl classes to ASCII.
fn prepare_pattern(raw: &str, delimiter: char, ascii: bool) -> String {
    let raw = if REGEX_META.contains(delimiter) {
        raw.to_string()
    } else {
        unescape_delimiter(raw, delimiter)
    };

    let mut out = String::with_capacity(raw.len() + 8);
    let mut in_class = false;
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('Z') => out.push_str(r"\z"),
                Some(e @ ('w' | 'W' | 'd' | 'D' | 's' | 'S')) if ascii => {
                    out.push_str(&ascii_class(e, in_class))
                }
                Some(e @ ('b' | 'B')) if ascii && !in_class => {
                    out.push_str("(?-u:\\");
                    out.push(e);
                    out.push(')');
                }
                Some(e) => {
                    out.push('\\');
                    out.push(e);
                }
                None => out.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                out.push('[');
                if chars.peek() == Some(&'^') {
                    out.push('^');
                    chars.next();
                }
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            other => out.push(other),
        }
    }
    out
}

fn ascii_class(class: char, in_class: bool) -> String {
    let (set, negated) = match class {
        'w' => ("0-9A-Za-z_", false),
        'W' => ("0-9A-Za-z_", true),
        'd' => ("0-9", false),
        'D' => ("0-9", true),
        's' => (r"\t\n\x0B\x0C\r ", false),
        _ => (r"\t\n\x0B\x0C\r ", true),
    };
    match (negated, in_class) {
        (false, true) => set.to_string(),
        (false, false) => format!("[{set}]"),
        (true, _) => format!("[^{set}]"),
    }
}
