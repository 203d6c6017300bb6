//! Optimizer hint sub-grammar.
//!
//! The body of a `/*+ ... */` comment is a whitespace- or comma-separated
//! list of directives, each a bare `NAME` or `NAME(arg, ...)`. Arguments are
//! kept as raw tokens. Malformed input never fails the statement; it is
//! reported as `HintParseWarning`s and the directive is dropped.

use obparse_ast::{Hint, HintArg, Token};
use obparse_error::HintParseWarning;
use obparse_types::Span;

/// Directive names the optimizer understands. Anything else is kept with
/// `known == false`.
const KNOWN_HINTS: &[&str] = &[
    "ALL_ROWS",
    "APPEND",
    "DIRECT",
    "DISABLE_PARALLEL_DML",
    "ENABLE_PARALLEL_DML",
    "FIRST_ROWS",
    "FROZEN_VERSION",
    "FULL",
    "INDEX",
    "INDEX_ASC",
    "INDEX_DESC",
    "INDEX_SS",
    "LEADING",
    "LOG_LEVEL",
    "MERGE",
    "MONITOR",
    "NO_EXPAND",
    "NO_INDEX",
    "NO_MERGE",
    "NO_PARALLEL",
    "NO_PLACE_GROUP_BY",
    "NO_REWRITE",
    "NO_UNNEST",
    "NO_USE_BNL",
    "NO_USE_HASH",
    "NO_USE_HASH_AGGREGATION",
    "NO_USE_MERGE",
    "NO_USE_NL",
    "NO_USE_PX",
    "OPT_PARAM",
    "ORDERED",
    "PARALLEL",
    "PLACE_GROUP_BY",
    "PQ_DISTRIBUTE",
    "PQ_MAP",
    "QB_NAME",
    "QUERY_TIMEOUT",
    "READ_CONSISTENCY",
    "TOPK",
    "TRACE_LOG",
    "TRANS_PARAM",
    "UNNEST",
    "USE_BNL",
    "USE_CONCAT",
    "USE_DAS",
    "USE_HASH",
    "USE_HASH_AGGREGATION",
    "USE_LATE_MATERIALIZATION",
    "USE_MERGE",
    "USE_NL",
    "USE_PLAN_CACHE",
    "USE_PX",
];

#[must_use]
pub fn is_known_hint(name: &str) -> bool {
    KNOWN_HINTS
        .binary_search_by(|entry| entry.cmp(&name))
        .is_ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Word,
    Quoted,
    Open,
    Close,
    Comma,
    Other,
}

#[derive(Debug, Clone, Copy)]
struct HintToken<'a> {
    piece: Piece,
    text: &'a str,
    span: Span,
}

fn offset(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Split the hint body into pieces. `base` is the byte offset of `body` in the source.
fn scan(body: &str, base: u32) -> Vec<HintToken<'_>> {
    let bytes = body.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let start = i;
        let piece = match b {
            _ if b.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            b'(' => {
                i += 1;
                Piece::Open
            }
            b')' => {
                i += 1;
                Piece::Close
            }
            b',' => {
                i += 1;
                Piece::Comma
            }
            b'\'' | b'"' | b'`' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b {
                    i += 1;
                }
                i = (i + 1).min(bytes.len());
                Piece::Quoted
            }
            _ if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'#' | b'@' | b'.') || b >= 0x80 => {
                while i < bytes.len()
                    && (bytes[i].is_ascii_alphanumeric()
                        || matches!(bytes[i], b'_' | b'$' | b'#' | b'@' | b'.')
                        || bytes[i] >= 0x80)
                {
                    i += 1;
                }
                Piece::Word
            }
            _ => {
                i += 1;
                while i < bytes.len() && !body.is_char_boundary(i) {
                    i += 1;
                }
                Piece::Other
            }
        };
        out.push(HintToken {
            piece,
            text: &body[start..i],
            span: Span::new(base + offset(start), base + offset(i)),
        });
    }
    out
}

/// Parse one hint comment token into directives and warnings.
#[must_use]
pub fn parse_hint_comment(token: &Token, strict: bool) -> (Vec<Hint>, Vec<HintParseWarning>) {
    let text = token.text.as_str();
    let body = text
        .strip_prefix("/*+")
        .and_then(|t| t.strip_suffix("*/"))
        .unwrap_or("");
    let pieces = scan(body, token.span.start + 3);
    let mut hints = Vec::new();
    let mut warnings = Vec::new();
    let mut i = 0;

    while i < pieces.len() {
        let head = pieces[i];
        match head.piece {
            Piece::Comma => {
                i += 1;
                continue;
            }
            Piece::Word => {}
            _ => {
                warnings.push(HintParseWarning::new(
                    None,
                    format!("expected hint name, found '{}'", head.text),
                    head.span,
                ));
                i += 1;
                continue;
            }
        }
        let name = head.text.to_ascii_uppercase();
        i += 1;

        let mut args = Vec::new();
        let mut end = head.span;
        if pieces.get(i).is_some_and(|p| p.piece == Piece::Open) {
            let open = pieces[i];
            i += 1;
            let mut depth = 1usize;
            while let Some(p) = pieces.get(i) {
                i += 1;
                match p.piece {
                    Piece::Open => depth += 1,
                    Piece::Close => {
                        depth -= 1;
                        if depth == 0 {
                            end = p.span;
                            break;
                        }
                    }
                    Piece::Comma if depth == 1 => continue,
                    _ => {}
                }
                args.push(HintArg {
                    text: p.text.to_owned(),
                    span: p.span,
                });
            }
            if depth > 0 {
                warnings.push(HintParseWarning::new(
                    Some(name.clone()),
                    format!("unbalanced parenthesis in hint {name}"),
                    head.span.union(open.span),
                ));
                continue;
            }
        }

        let known = is_known_hint(&name);
        if !known && strict {
            warnings.push(HintParseWarning::new(
                Some(name.clone()),
                format!("unknown hint {name}"),
                head.span,
            ));
        }
        hints.push(Hint {
            name,
            args,
            known,
            span: head.span.union(end),
        });
    }
    (hints, warnings)
}

#[cfg(test)]
mod tests {
    use obparse_ast::TokenKind;
    use obparse_types::DialectMode;

    use super::*;

    fn hint_token(text: &str, at: u32) -> Token {
        Token {
            kind: TokenKind::HintComment,
            text: text.to_owned(),
            span: Span::new(at, at + offset(text.len())),
            line: 1,
            col: at + 1,
            mode: DialectMode::MySqlCompatible,
        }
    }

    #[test]
    fn known_list_is_sorted() {
        assert!(KNOWN_HINTS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn index_hint_with_arguments() {
        let (hints, warnings) = parse_hint_comment(&hint_token("/*+ INDEX(t idx1) */", 7), false);
        assert!(warnings.is_empty());
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].name, "INDEX");
        assert_eq!(hints[0].arg_texts(), vec!["t", "idx1"]);
        assert!(hints[0].known);
        assert_eq!(hints[0].span, Span::new(11, 24));
        assert_eq!(hints[0].args[0].span, Span::new(17, 18));
    }

    #[test]
    fn several_directives_separated_by_space_and_comma() {
        let (hints, _) = parse_hint_comment(
            &hint_token("/*+ parallel(4), NO_REWRITE leading(a, b) */", 0),
            false,
        );
        let names: Vec<&str> = hints.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["PARALLEL", "NO_REWRITE", "LEADING"]);
        assert_eq!(hints[2].arg_texts(), vec!["a", "b"]);
        assert!(hints[1].args.is_empty());
    }

    #[test]
    fn nested_parentheses_are_kept() {
        let (hints, _) = parse_hint_comment(&hint_token("/*+ LEADING(a (b c)) */", 0), false);
        assert_eq!(hints[0].arg_texts(), vec!["a", "(", "b", "c", ")"]);
    }

    #[test]
    fn unknown_name_is_retained() {
        let (hints, warnings) = parse_hint_comment(&hint_token("/*+ FOO_BAR(x) */", 0), false);
        assert_eq!(hints.len(), 1);
        assert!(!hints[0].known);
        assert!(warnings.is_empty());

        let (hints, warnings) = parse_hint_comment(&hint_token("/*+ FOO_BAR(x) */", 0), true);
        assert_eq!(hints.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].directive.as_deref(), Some("FOO_BAR"));
    }

    #[test]
    fn malformed_directives_warn_and_continue() {
        let (hints, warnings) =
            parse_hint_comment(&hint_token("/*+ ) FULL(t) INDEX(t */", 0), false);
        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].name, "FULL");
        assert_eq!(warnings.len(), 2);
        assert!(warnings[1].message.contains("unbalanced"));
    }

    #[test]
    fn quoted_and_numeric_arguments() {
        let (hints, _) = parse_hint_comment(
            &hint_token("/*+ OPT_PARAM('hash_join', 'false') QUERY_TIMEOUT(100000) */", 0),
            false,
        );
        assert_eq!(hints[0].arg_texts(), vec!["'hash_join'", "'false'"]);
        assert_eq!(hints[1].arg_texts(), vec!["100000"]);
    }

    #[test]
    fn empty_hint() {
        let (hints, warnings) = parse_hint_comment(&hint_token("/*+ */", 0), true);
        assert!(hints.is_empty());
        assert!(warnings.is_empty());
    }
}
