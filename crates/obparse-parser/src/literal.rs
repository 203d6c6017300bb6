//! Decoding of literal and identifier token text.
//!
//! The lexer only delimits tokens; the values attached to `Literal` and
//! `Identifier` nodes are computed here from the raw token text.

use obparse_ast::{Identifier, LiteralValue, Token, TokenKind};
use obparse_types::ParseOptions;

use crate::keywords::{DialectFeatures, DialectGrammar};

/// Body of a quoted token with its delimiters and any prefix removed,
/// plus the quote byte that delimited it.
fn quoted_body(text: &str) -> (&str, char) {
    let start = text.find(['\'', '"', '`']).unwrap_or(0);
    let quote = text[start..].chars().next().unwrap_or('\'');
    let inner = text
        .get(start + 1..text.len().saturating_sub(1))
        .unwrap_or("");
    (inner, quote)
}

/// Decode a string literal token (`'..'`, MySQL `".."`, `N'..'`, Oracle `q'[..]'`).
#[must_use]
pub fn decode_string(text: &str, grammar: &DialectGrammar) -> String {
    let bytes = text.as_bytes();
    if matches!(bytes.first(), Some(b'q' | b'Q')) && bytes.get(1) == Some(&b'\'') {
        return decode_q_quote(text);
    }
    let (body, quote) = quoted_body(text);
    if grammar.has(DialectFeatures::BACKSLASH_ESCAPES) {
        unescape_mysql(body, quote)
    } else {
        undouble(body, quote)
    }
}

fn decode_q_quote(text: &str) -> String {
    // q'<open> ... <close>'
    let mut chars = text[2..].chars();
    let Some(open) = chars.next() else {
        return String::new();
    };
    let body_start = 2 + open.len_utf8();
    let close_len = match open {
        '[' | '(' | '{' | '<' => 1,
        c => c.len_utf8(),
    };
    text.get(body_start..text.len().saturating_sub(1 + close_len))
        .unwrap_or("")
        .to_owned()
}

fn undouble(body: &str, quote: char) -> String {
    let single = quote.to_string();
    let pair = single.repeat(2);
    if body.contains(&pair) {
        body.replace(&pair, &single)
    } else {
        body.to_owned()
    }
}

fn unescape_mysql(body: &str, quote: char) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('0') => out.push('\0'),
                Some('b') => out.push('\u{8}'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some('Z') => out.push('\u{1a}'),
                // LIKE wildcards keep their backslash.
                Some(w @ ('%' | '_')) => {
                    out.push('\\');
                    out.push(w);
                }
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else if c == quote && chars.peek() == Some(&quote) {
            chars.next();
            out.push(quote);
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode a backtick or double-quote delimited identifier.
#[must_use]
pub fn decode_quoted_ident(text: &str) -> String {
    let (body, quote) = quoted_body(text);
    undouble(body, quote)
}

/// Bytes of `X'0A'` or `0x0A`. An odd digit count gets a leading zero nibble.
#[must_use]
pub fn decode_hex(text: &str) -> Vec<u8> {
    let digits = if text.starts_with('0') {
        text.get(2..).unwrap_or("")
    } else {
        quoted_body(text).0
    };
    let mut nibbles: Vec<u8> = digits
        .bytes()
        .filter_map(|b| char::from(b).to_digit(16))
        .filter_map(|d| u8::try_from(d).ok())
        .collect();
    if nibbles.len() % 2 == 1 {
        nibbles.insert(0, 0);
    }
    nibbles.chunks(2).map(|p| (p[0] << 4) | p[1]).collect()
}

/// Binary digits of `B'01'` or `0b01`.
#[must_use]
pub fn decode_bit(text: &str) -> String {
    if text.starts_with('0') {
        text.get(2..).unwrap_or("").to_owned()
    } else {
        quoted_body(text).0.to_owned()
    }
}

/// Decode a numeric token into its literal value.
#[must_use]
pub fn decode_number(kind: TokenKind, text: &str) -> LiteralValue {
    match kind {
        TokenKind::Integer => text
            .parse::<i64>()
            .map_or_else(|_| LiteralValue::BigInteger(text.to_owned()), LiteralValue::Integer),
        TokenKind::Decimal => LiteralValue::Decimal(text.to_owned()),
        TokenKind::BinaryFloat => {
            let digits = text.trim_end_matches(['f', 'F', 'd', 'D']);
            LiteralValue::Float(digits.parse().unwrap_or(f64::NAN))
        }
        _ => LiteralValue::Float(text.parse().unwrap_or(f64::NAN)),
    }
}

/// Normalized identifier for a word or quoted-identifier token.
///
/// Quoted identifiers keep their exact spelling. Unquoted ones are folded to
/// the dialect's identifier case unless case-sensitive identifiers are on.
#[must_use]
pub fn identifier(token: &Token, grammar: &DialectGrammar, options: &ParseOptions) -> Identifier {
    if token.kind == TokenKind::QuotedIdent {
        let name = decode_quoted_ident(&token.text);
        return Identifier {
            raw: name.clone(),
            name,
            quoted: true,
        };
    }
    let raw = token.text.clone();
    let name = if options.case_sensitive_identifiers {
        raw.clone()
    } else {
        grammar.identifier_case.fold(&raw)
    };
    Identifier {
        raw,
        name,
        quoted: false,
    }
}

#[cfg(test)]
mod tests {
    use obparse_types::DialectMode;

    use super::*;
    use crate::keywords::grammar;

    fn mysql() -> &'static DialectGrammar {
        grammar(DialectMode::MySqlCompatible)
    }

    fn oracle() -> &'static DialectGrammar {
        grammar(DialectMode::OracleCompatible)
    }

    #[test]
    fn mysql_escapes() {
        assert_eq!(decode_string(r"'it\'s'", mysql()), "it's");
        assert_eq!(decode_string(r"'a\nb'", mysql()), "a\nb");
        assert_eq!(decode_string(r"'50\%'", mysql()), r"50\%");
        assert_eq!(decode_string("'a''b'", mysql()), "a'b");
        assert_eq!(decode_string(r#""say \"hi\"""#, mysql()), "say \"hi\"");
        assert_eq!(decode_string("N'x'", mysql()), "x");
    }

    #[test]
    fn oracle_strings_only_double_quotes() {
        assert_eq!(decode_string(r"'a\n'", oracle()), r"a\n");
        assert_eq!(decode_string("'it''s'", oracle()), "it's");
        assert_eq!(decode_string("q'[it's]'", oracle()), "it's");
        assert_eq!(decode_string("q'!a!'", oracle()), "a");
        assert_eq!(decode_string("Q'<x>'", oracle()), "x");
    }

    #[test]
    fn quoted_identifiers() {
        assert_eq!(decode_quoted_ident("`a``b`"), "a`b");
        assert_eq!(decode_quoted_ident("\"My Col\""), "My Col");
    }

    #[test]
    fn hex_and_bit() {
        assert_eq!(decode_hex("X'0aFF'"), vec![0x0a, 0xff]);
        assert_eq!(decode_hex("0xABC"), vec![0x0a, 0xbc]);
        assert_eq!(decode_bit("b'0101'"), "0101");
        assert_eq!(decode_bit("0b11"), "11");
    }

    #[test]
    fn numbers() {
        assert_eq!(
            decode_number(TokenKind::Integer, "42"),
            LiteralValue::Integer(42)
        );
        assert_eq!(
            decode_number(TokenKind::Integer, "99999999999999999999"),
            LiteralValue::BigInteger("99999999999999999999".to_owned())
        );
        assert_eq!(
            decode_number(TokenKind::Decimal, "1.50"),
            LiteralValue::Decimal("1.50".to_owned())
        );
        assert_eq!(
            decode_number(TokenKind::BinaryFloat, "2.5f"),
            LiteralValue::Float(2.5)
        );
        assert_eq!(
            decode_number(TokenKind::Float, "1e3"),
            LiteralValue::Float(1000.0)
        );
    }
}
