//! Dual-dialect (MySQL-compatible / Oracle-compatible) SQL parser.
//!
//! ```
//! use obparse::{DialectMode, RuleKind, parse_default};
//!
//! let out = parse_default("SELECT /*+ INDEX(t idx1) */ a FROM t", DialectMode::MySqlCompatible)
//!     .expect("within default budgets");
//! assert!(out.is_clean());
//! assert_eq!(out.statements[0].kind(), RuleKind::SelectStmt);
//! assert_eq!(out.statements[0].hints()[0].name, "INDEX");
//! ```
//!
//! Every call is independent: keyword tables and grammar profiles are shared
//! read-only, trees are immutable, and any number of threads may parse or
//! walk concurrently.

use std::path::Path;

pub use obparse_ast::{
    ColumnAttributeKind, ConstraintKind, Descendants, Hint, HintArg, Identifier, JoinKind,
    Keyword, ListenerTable, LiteralValue, NodeValue, Operator, ParseChild, ParseNode,
    PartitionMethod, QualifiedName, RuleKind, SetOperation, SetOperator, Statement,
    StatementCategory, StringLiteral, TemporalKind, Token, TokenKind, Variable, VariableScope,
    WalkControl, WalkOutcome, walk,
};
pub use obparse_error::{
    HintParseWarning, LexicalError, LexicalErrorKind, ParseError, ParseErrorKind, ResourceLimit,
    ResourceLimitExceeded, SyntaxError,
};
pub use obparse_parser::{
    DiagnosticKind, DialectGrammar, KeywordClass, LexOutput, ParseDurationHistogram,
    ParseMetricsSnapshot, ParseOutput, classify, grammar, parse, parse_default,
    parse_metrics_snapshot, reset_parse_metrics, tokenize,
};
pub use obparse_types::{
    Charset, CharsetConfig, ConfigError, DialectMode, ParseOptions, SourcePosition, Span,
};

/// A dialect, charset, and option set bundled for repeated parsing.
#[derive(Debug, Clone)]
pub struct SqlParser {
    mode: DialectMode,
    charset: CharsetConfig,
    options: ParseOptions,
}

impl SqlParser {
    /// Dialect defaults with `utf8mb4` input.
    #[must_use]
    pub fn new(mode: DialectMode) -> Self {
        Self {
            mode,
            charset: CharsetConfig::default(),
            options: ParseOptions::for_dialect(mode),
        }
    }

    /// Dialect defaults overlaid with the keys set in a TOML file.
    pub fn from_config_file(mode: DialectMode, path: &Path) -> Result<Self, ConfigError> {
        Ok(Self {
            options: ParseOptions::from_toml_file(mode, path)?,
            ..Self::new(mode)
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_charset(mut self, charset: CharsetConfig) -> Self {
        self.charset = charset;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> DialectMode {
        self.mode
    }

    #[must_use]
    pub const fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn parse(&self, source: &str) -> Result<ParseOutput, ResourceLimitExceeded> {
        parse(source, self.mode, &self.charset, &self.options)
    }
}
