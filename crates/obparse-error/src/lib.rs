//! Diagnostics produced by the SQL front end.
//!
//! Lexical and syntax errors are recoverable and accumulate per call, each
//! tagged with the index of the statement it belongs to. Resource-limit
//! violations are fatal and replace the whole result. Hint warnings never
//! escalate; they ride along on the statement that owns the hint.

use std::fmt;

use obparse_types::{SourcePosition, Span};
use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Lexical errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LexicalErrorKind {
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedQuotedIdentifier,
    UnterminatedComment,
    UnterminatedHint,
    IdentifierTooLong,
    MalformedNumber,
    UnknownCharset,
}

impl LexicalErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnexpectedCharacter => "unexpected_character",
            Self::UnterminatedString => "unterminated_string",
            Self::UnterminatedQuotedIdentifier => "unterminated_quoted_identifier",
            Self::UnterminatedComment => "unterminated_comment",
            Self::UnterminatedHint => "unterminated_hint",
            Self::IdentifierTooLong => "identifier_too_long",
            Self::MalformedNumber => "malformed_number",
            Self::UnknownCharset => "unknown_charset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{position}: {message}")]
pub struct LexicalError {
    pub kind: LexicalErrorKind,
    pub message: String,
    pub span: Span,
    pub position: SourcePosition,
}

impl LexicalError {
    #[must_use]
    pub fn new(
        kind: LexicalErrorKind,
        message: impl Into<String>,
        span: Span,
        position: SourcePosition,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            position,
        }
    }
}

// ---------------------------------------------------------------------------
// Syntax errors
// ---------------------------------------------------------------------------

/// A token sequence that matches no production.
///
/// `rule` names the innermost grammar rule that was active, `expected` is the
/// sorted set of tokens that would have been accepted at `position`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{position}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub rule: &'static str,
    pub expected: Vec<String>,
    pub found: String,
    pub span: Span,
    pub position: SourcePosition,
}

impl SyntaxError {
    #[must_use]
    pub fn expects(&self, what: &str) -> bool {
        self.expected.iter().any(|e| e == what)
    }
}

// ---------------------------------------------------------------------------
// Batch diagnostics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParseErrorKind {
    #[error("lexical error at {0}")]
    Lexical(LexicalError),
    #[error("syntax error at {0}")]
    Syntax(SyntaxError),
}

/// One `(position, message, statement-index)` diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("statement {statement_index}: {kind}")]
pub struct ParseError {
    pub statement_index: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    #[must_use]
    pub const fn lexical(statement_index: usize, error: LexicalError) -> Self {
        Self {
            statement_index,
            kind: ParseErrorKind::Lexical(error),
        }
    }

    #[must_use]
    pub const fn syntax(statement_index: usize, error: SyntaxError) -> Self {
        Self {
            statement_index,
            kind: ParseErrorKind::Syntax(error),
        }
    }

    #[must_use]
    pub const fn position(&self) -> SourcePosition {
        match &self.kind {
            ParseErrorKind::Lexical(e) => e.position,
            ParseErrorKind::Syntax(e) => e.position,
        }
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        match &self.kind {
            ParseErrorKind::Lexical(e) => e.span,
            ParseErrorKind::Syntax(e) => e.span,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match &self.kind {
            ParseErrorKind::Lexical(e) => &e.message,
            ParseErrorKind::Syntax(e) => &e.message,
        }
    }

    #[must_use]
    pub const fn is_lexical(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Lexical(_))
    }

    #[must_use]
    pub const fn as_syntax(&self) -> Option<&SyntaxError> {
        match &self.kind {
            ParseErrorKind::Syntax(e) => Some(e),
            ParseErrorKind::Lexical(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Fatal budget violations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceLimit {
    RecursionDepth,
    NodeCount,
    Deadline,
}

impl ResourceLimit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RecursionDepth => "recursion_depth",
            Self::NodeCount => "node_count",
            Self::Deadline => "deadline",
        }
    }
}

impl fmt::Display for ResourceLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parse exceeded a caller-configured budget. Aborts the entire call.
///
/// `limit_value` is the configured bound: nodes, depth, or milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("resource limit exceeded: {limit} (limit {limit_value}) at {position}")]
pub struct ResourceLimitExceeded {
    pub limit: ResourceLimit,
    pub limit_value: u64,
    pub statement_index: usize,
    pub position: SourcePosition,
}

// ---------------------------------------------------------------------------
// Hint warnings
// ---------------------------------------------------------------------------

/// A malformed or unknown optimizer hint. The statement still parses.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("hint warning at {span}: {message}")]
pub struct HintParseWarning {
    /// Directive the warning is about, when one could be identified.
    pub directive: Option<String>,
    pub message: String,
    pub span: Span,
}

impl HintParseWarning {
    #[must_use]
    pub fn new(directive: Option<String>, message: impl Into<String>, span: Span) -> Self {
        Self {
            directive,
            message: message.into(),
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax_at(line: u32, col: u32) -> SyntaxError {
        SyntaxError {
            message: "expected expression, found FROM".to_owned(),
            rule: "projection",
            expected: vec!["expression".to_owned(), "'*'".to_owned()],
            found: "FROM".to_owned(),
            span: Span::new(7, 11),
            position: SourcePosition::new(7, line, col),
        }
    }

    #[test]
    fn diagnostic_display_carries_index_and_position() {
        let err = ParseError::syntax(2, syntax_at(3, 8));
        let text = err.to_string();
        assert!(text.starts_with("statement 2:"), "{text}");
        assert!(text.contains("3:8"), "{text}");
        assert_eq!(err.position().line, 3);
        assert_eq!(err.message(), "expected expression, found FROM");
        assert!(err.as_syntax().is_some_and(|s| s.expects("expression")));
    }

    #[test]
    fn lexical_diagnostic_accessors() {
        let lex = LexicalError::new(
            LexicalErrorKind::UnterminatedString,
            "unterminated string literal",
            Span::new(7, 12),
            SourcePosition::new(7, 1, 8),
        );
        let err = ParseError::lexical(0, lex);
        assert!(err.is_lexical());
        assert_eq!(err.span(), Span::new(7, 12));
        assert!(err.as_syntax().is_none());
    }

    #[test]
    fn resource_limit_message_names_the_limit() {
        let err = ResourceLimitExceeded {
            limit: ResourceLimit::RecursionDepth,
            limit_value: 256,
            statement_index: 0,
            position: SourcePosition::new(300, 1, 301),
        };
        assert_eq!(
            err.to_string(),
            "resource limit exceeded: recursion_depth (limit 256) at 1:301"
        );
    }

    #[test]
    fn diagnostics_serialize_with_type_tag() {
        let err = ParseError::syntax(1, syntax_at(1, 8));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["statement_index"], 1);
        assert_eq!(json["kind"]["type"], "syntax");
        assert_eq!(json["kind"]["rule"], "projection");
    }
}
