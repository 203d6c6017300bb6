//! Dual-dialect SQL front end: lexer, keyword tables, and a recursive
//! descent parser producing `RuleKind`-tagged concrete parse trees.
//!
//! The entry point is [`parse`]. Keyword tables and grammar profiles are
//! built once per process and shared read-only by every call.

mod budget;
pub mod hint;
pub mod keywords;
pub mod lexer;
pub mod literal;
pub mod metrics;
mod parser;

use std::time::Instant;

use obparse_ast::Statement;
use obparse_error::{ParseError, ResourceLimitExceeded};
use obparse_types::{CharsetConfig, DialectMode, ParseOptions};
use tracing::{debug, debug_span, warn};

pub use keywords::{DialectFeatures, DialectGrammar, KeywordClass, KeywordTable, classify, grammar};
pub use lexer::{LexOutput, Lexer, tokenize};
pub use metrics::{
    DiagnosticKind, ParseDurationHistogram, ParseMetricsSnapshot, parse_metrics_snapshot,
    reset_parse_metrics,
};

use crate::metrics::record_diagnostic;

/// Everything one parse call produced.
///
/// `errors` are ordered by source position; each names the statement slot it
/// belongs to, so failed statements leave gaps in `Statement::index`.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub statements: Vec<Statement>,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse a batch of `;`-separated statements.
///
/// Lexical and syntax errors are recovered from and returned alongside the
/// statements that parsed. Exceeding a budget in `options` aborts the whole
/// call with `ResourceLimitExceeded`.
pub fn parse(
    source: &str,
    mode: DialectMode,
    charset: &CharsetConfig,
    options: &ParseOptions,
) -> Result<ParseOutput, ResourceLimitExceeded> {
    let span = debug_span!("sql_parse", mode = mode.as_str(), bytes = source.len());
    let _guard = span.enter();
    let started = Instant::now();
    let grammar = grammar(mode);

    let lexed = tokenize(source, grammar, options);
    metrics::record_tokens(lexed.tokens.len());
    let lexical_errors = lexed.errors;

    let mut parser = parser::Parser::new(lexed.tokens, grammar, options, charset, started);
    let batch = match parser.parse_batch() {
        Ok(batch) => batch,
        Err(limit) => {
            record_diagnostic(DiagnosticKind::ResourceLimit);
            warn!(
                limit = %limit.limit,
                limit_value = limit.limit_value,
                statement = limit.statement_index,
                line = limit.position.line,
                col = limit.position.col,
                "parse aborted: resource limit exceeded"
            );
            metrics::record_parse_call(started.elapsed());
            return Err(limit);
        }
    };

    let mut errors = batch.errors;
    for err in lexical_errors {
        let offset = err.span.start;
        let index = batch
            .slot_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        record_diagnostic(DiagnosticKind::Lexical);
        debug!(
            index,
            line = err.position.line,
            col = err.position.col,
            message = %err.message,
            "lexical error recovered"
        );
        errors.push(ParseError::lexical(index, err));
    }
    errors.sort_by_key(|e| (e.position().offset, e.statement_index));
    if !options.error_recovery {
        errors.truncate(1);
    }

    let elapsed = started.elapsed();
    metrics::record_parse_call(elapsed);
    debug!(
        statements = batch.statements.len(),
        errors = errors.len(),
        elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
        "parse finished"
    );
    Ok(ParseOutput {
        statements: batch.statements,
        errors,
    })
}

/// [`parse`] with the dialect's default options and `utf8mb4`.
pub fn parse_default(source: &str, mode: DialectMode) -> Result<ParseOutput, ResourceLimitExceeded> {
    parse(
        source,
        mode,
        &CharsetConfig::default(),
        &ParseOptions::for_dialect(mode),
    )
}
