//! Format strings for new names: `{}` is the (transformed) old name, `{N}` the number.
//!
//! A placeholder preceded by an odd number of backslashes is literal text.
//! Backslashes themselves are never removed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Name,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Text(String),
    Slot(Placeholder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pieces: Vec<Piece>,
}

impl Format {
    pub fn parse(text: &str) -> Self {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut backslashes = 0usize;
        let mut rest = text;

        while let Some(ch) = rest.chars().next() {
            if backslashes % 2 == 0 {
                let slot = if rest.starts_with("{}") {
                    Some((Placeholder::Name, 2))
                } else if rest.starts_with("{N}") {
                    Some((Placeholder::Number, 3))
                } else {
                    None
                };
                if let Some((placeholder, len)) = slot {
                    if !literal.is_empty() {
                        pieces.push(Piece::Text(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Slot(placeholder));
                    rest = &rest[len..];
                    backslashes = 0;
                    continue;
                }
            }
            backslashes = if ch == '\\' { backslashes + 1 } else { 0 };
            literal.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
        if !literal.is_empty() {
            pieces.push(Piece::Text(literal));
        }
        Self { pieces }
    }

    pub fn uses_name(&self) -> bool {
        self.pieces.contains(&Piece::Slot(Placeholder::Name))
    }

    pub fn uses_number(&self) -> bool {
        self.pieces.contains(&Piece::Slot(Placeholder::Number))
    }

    /// Fill in the placeholders. Inserted text is not scanned again.
    pub fn render(&self, name: &str, number: &str) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Slot(Placeholder::Name) => out.push_str(name),
                Piece::Slot(Placeholder::Number) => out.push_str(number),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_placeholders() {
        let f = Format::parse("{N}-{}");
        assert!(f.uses_name() && f.uses_number());
        assert_eq!(f.render("beach", "07"), "07-beach");
    }

    #[test]
    fn every_occurrence_is_replaced() {
        assert_eq!(Format::parse("{}{}").render("ab", ""), "abab");
    }

    #[test]
    fn odd_backslashes_escape() {
        let f = Format::parse(r"\{}x");
        assert!(!f.uses_name());
        assert_eq!(f.render("n", "1"), r"\{}x");

        let f = Format::parse(r"\\{}");
        assert!(f.uses_name());
        assert_eq!(f.render("n", "1"), r"\\n");
    }

    #[test]
    fn inserted_name_is_not_rescanned() {
        assert_eq!(Format::parse("{}").render("{N}", "5"), "{N}");
    }

    #[test]
    fn no_placeholders() {
        let f = Format::parse("fixed");
        assert!(!f.uses_name() && !f.uses_number());
        assert_eq!(f.render("x", "1"), "fixed");
    }
}
