//! Canonical SQL rendering of a parse tree.
//!
//! Tokens are emitted in order with single spaces between them, except
//! around punctuation that reads naturally without one. Rendering is lossy
//! with respect to whitespace and comments; use spans for exact source text.

use std::fmt;

use crate::{ParseNode, Token, TokenKind};

fn no_space_after(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::CharsetIntroducer
            | TokenKind::LeftParen
            | TokenKind::LeftBracket
            | TokenKind::Dot
    )
}

fn no_space_before(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::RightParen
            | TokenKind::RightBracket
            | TokenKind::Comma
            | TokenKind::Dot
            | TokenKind::Semicolon
    )
}

fn needs_space(prev: &Token, next: &Token) -> bool {
    if no_space_after(prev.kind) || no_space_before(next.kind) {
        return false;
    }
    // Function-call shape: `count(`, `varchar(`.
    !(next.kind == TokenKind::LeftParen
        && matches!(
            prev.kind,
            TokenKind::Ident | TokenKind::QuotedIdent | TokenKind::Keyword(_)
        ))
}

impl fmt::Display for ParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut prev: Option<&Token> = None;
        for tok in self.tokens() {
            if let Some(p) = prev {
                if needs_space(p, tok) {
                    f.write_str(" ")?;
                }
            }
            f.write_str(&tok.text)?;
            prev = Some(tok);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use obparse_types::{DialectMode, Span};

    use super::*;
    use crate::{Keyword, ParseChild, RuleKind};

    fn toks(items: &[(TokenKind, &str)]) -> ParseNode {
        let mut at = 0;
        let children = items
            .iter()
            .map(|(kind, text)| {
                let span = Span::new(at, at + text.len() as u32);
                at += text.len() as u32 + 1;
                ParseChild::Token(Token {
                    kind: *kind,
                    text: (*text).to_owned(),
                    span,
                    line: 1,
                    col: span.start + 1,
                    mode: DialectMode::MySqlCompatible,
                })
            })
            .collect();
        ParseNode::new(RuleKind::SelectStmt, children)
    }

    #[test]
    fn punctuation_hugs_its_neighbours() {
        let node = toks(&[
            (TokenKind::Keyword(Keyword::Select), "SELECT"),
            (TokenKind::Ident, "count"),
            (TokenKind::LeftParen, "("),
            (TokenKind::Star, "*"),
            (TokenKind::RightParen, ")"),
            (TokenKind::Comma, ","),
            (TokenKind::Ident, "t"),
            (TokenKind::Dot, "."),
            (TokenKind::Ident, "a"),
            (TokenKind::Keyword(Keyword::From), "FROM"),
            (TokenKind::Ident, "t"),
            (TokenKind::Semicolon, ";"),
        ]);
        assert_eq!(node.to_string(), "SELECT count(*), t.a FROM t;");
    }

    #[test]
    fn operators_are_spaced() {
        let node = toks(&[
            (TokenKind::Ident, "a"),
            (TokenKind::Plus, "+"),
            (TokenKind::LeftParen, "("),
            (TokenKind::Integer, "1"),
            (TokenKind::RightParen, ")"),
        ]);
        assert_eq!(node.to_string(), "a + (1)");
    }

    #[test]
    fn charset_introducer_glues_to_string() {
        let node = toks(&[
            (TokenKind::CharsetIntroducer, "_utf8mb4"),
            (TokenKind::String, "'x'"),
        ]);
        assert_eq!(node.to_string(), "_utf8mb4'x'");
    }
}
