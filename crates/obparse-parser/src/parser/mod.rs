//! Recursive descent parser.
//!
//! One `Parser` consumes the token stream of a whole batch. Statement
//! sub-grammars live in the sibling modules as further `impl Parser` blocks:
//! expressions in `expr.rs`, queries in `query.rs`, DML in `dml.rs`, DDL in
//! `ddl.rs`, data types in `datatype.rs`, transaction and administrative
//! statements in `admin.rs`.

mod admin;
mod datatype;
mod ddl;
mod dml;
mod expr;
mod query;

use std::cell::RefCell;
use std::time::Instant;

use obparse_ast::{
    Hint, Keyword, NodeValue, ParseChild, ParseNode, QualifiedName, RuleKind, Statement, Token,
    TokenKind,
};
use obparse_error::{HintParseWarning, ParseError, ResourceLimitExceeded, SyntaxError};
use obparse_types::{CharsetConfig, ParseOptions, SourcePosition};
use smallvec::SmallVec;
use tracing::debug;

use crate::budget::{Budget, Exhausted};
use crate::hint::parse_hint_comment;
use crate::keywords::{DialectFeatures, DialectGrammar};
use crate::literal;
use crate::metrics::{self, DiagnosticKind};

/// Nested speculation deeper than this commits to the first alternative.
const MAX_SPECULATION_DEPTH: usize = 4;

/// Words that unambiguously open a new top-level statement. Recovery stops
/// in front of them even without a `;`.
const STATEMENT_STARTERS: &[&str] = &[
    "CREATE", "GRANT", "REVOKE", "TRUNCATE", "COMMIT", "SHOW", "EXPLAIN", "BEGIN",
];

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

/// Why a production failed: a recoverable syntax error or an exhausted budget.
#[derive(Debug)]
pub(crate) enum Failure {
    Syntax(Box<SyntaxError>),
    Fatal(Exhausted),
}

impl From<Exhausted> for Failure {
    fn from(e: Exhausted) -> Self {
        Self::Fatal(e)
    }
}

pub(crate) type PResult<T> = Result<T, Failure>;

// ---------------------------------------------------------------------------
// Node builder
// ---------------------------------------------------------------------------

/// Children of a node under construction.
#[derive(Debug)]
pub(crate) struct NodeBuilder {
    kind: RuleKind,
    children: Vec<ParseChild>,
    value: Option<NodeValue>,
}

impl NodeBuilder {
    pub(crate) fn push_node(&mut self, node: ParseNode) {
        self.children.push(ParseChild::Node(node));
    }

    pub(crate) fn push_token(&mut self, token: Token) {
        self.children.push(ParseChild::Token(token));
    }

    pub(crate) fn set_value(&mut self, value: NodeValue) {
        self.value = Some(value);
    }

    /// Change the rule kind once a later token decides which production matched.
    pub(crate) fn retag(&mut self, kind: RuleKind) {
        self.kind = kind;
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
struct Expected {
    pos: usize,
    items: SmallVec<[&'static str; 16]>,
}

struct Checkpoint {
    pos: usize,
    rules: usize,
    hints: usize,
    hint_warnings: usize,
    expected: Expected,
}

/// Result of parsing a whole batch.
pub(crate) struct Batch {
    pub(crate) statements: Vec<Statement>,
    pub(crate) errors: Vec<ParseError>,
    /// Byte offset at which each statement slot starts, by statement index.
    pub(crate) slot_starts: Vec<u32>,
}

pub(crate) struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    grammar: &'static DialectGrammar,
    options: &'a ParseOptions,
    charset: &'a CharsetConfig,
    budget: Budget,
    rule_stack: Vec<RuleKind>,
    expected: RefCell<Expected>,
    hints: Vec<Hint>,
    hint_warnings: Vec<HintParseWarning>,
    speculation_depth: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(
        tokens: Vec<Token>,
        grammar: &'static DialectGrammar,
        options: &'a ParseOptions,
        charset: &'a CharsetConfig,
        started: Instant,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            grammar,
            options,
            charset,
            budget: Budget::new(options, started),
            rule_stack: Vec::with_capacity(64),
            expected: RefCell::new(Expected::default()),
            hints: Vec::new(),
            hint_warnings: Vec::new(),
            speculation_depth: 0,
        }
    }

    /// Parse every statement of the batch.
    pub(crate) fn parse_batch(&mut self) -> Result<Batch, ResourceLimitExceeded> {
        let mut batch = Batch {
            statements: Vec::new(),
            errors: Vec::new(),
            slot_starts: Vec::new(),
        };
        loop {
            while self.peek() == TokenKind::Semicolon {
                self.pos += 1;
            }
            if self.at_eof() {
                break;
            }
            let index = batch.slot_starts.len();
            if let Err(e) = self.budget.check_deadline() {
                return Err(self.fatal(e, index));
            }
            let stmt_start = self.pos;
            batch.slot_starts.push(self.current().span.start);
            self.rule_stack.clear();
            self.hints.clear();
            self.hint_warnings.clear();
            self.expected.replace(Expected::default());
            let nodes_before = self.budget.nodes();

            match self.parse_statement() {
                Ok(tree) => {
                    let nodes = usize::try_from(self.budget.nodes() - nodes_before).unwrap_or(usize::MAX);
                    let stmt = Statement::new(
                        index,
                        tree,
                        std::mem::take(&mut self.hints),
                        std::mem::take(&mut self.hint_warnings),
                    );
                    for warning in stmt.hint_warnings() {
                        metrics::record_diagnostic(DiagnosticKind::HintWarning);
                        debug!(
                            index,
                            directive = warning.directive.as_deref().unwrap_or(""),
                            message = %warning.message,
                            "hint warning"
                        );
                    }
                    metrics::record_statement(nodes);
                    debug!(index, kind = %stmt.kind(), nodes, "statement parsed");
                    batch.statements.push(stmt);
                }
                Err(Failure::Syntax(err)) => {
                    // An invalid token already carries a lexical error.
                    if self.peek() != TokenKind::Invalid {
                        metrics::record_diagnostic(DiagnosticKind::Syntax);
                        debug!(
                            index,
                            line = err.position.line,
                            col = err.position.col,
                            rule = err.rule,
                            message = %err.message,
                            "syntax error recovered"
                        );
                        batch.errors.push(ParseError::syntax(index, *err));
                    }
                    if !self.options.error_recovery {
                        break;
                    }
                    self.synchronize(stmt_start);
                }
                Err(Failure::Fatal(e)) => return Err(self.fatal(e, index)),
            }
        }
        Ok(batch)
    }

    fn fatal(&self, e: Exhausted, statement_index: usize) -> ResourceLimitExceeded {
        let tok = self.current();
        ResourceLimitExceeded {
            limit: e.limit,
            limit_value: e.limit_value,
            statement_index,
            position: SourcePosition::new(tok.span.start, tok.line, tok.col),
        }
    }

    /// Skip to the end of the broken statement: past the next `;`, or up to a
    /// statement-starting word. Always makes progress.
    fn synchronize(&mut self, stmt_start: usize) {
        if self.pos == stmt_start {
            self.pos += 1;
        }
        loop {
            match self.peek() {
                TokenKind::Eof => return,
                TokenKind::Semicolon => {
                    self.pos += 1;
                    return;
                }
                _ if STATEMENT_STARTERS.iter().any(|w| self.current().is_word(w)) => return,
                _ => self.pos += 1,
            }
        }
    }

    fn parse_statement(&mut self) -> PResult<ParseNode> {
        let mut root = self.begin(RuleKind::Stmt)?;
        let body = self.parse_statement_body()?;
        root.push_node(body);
        if !self.at_eof() && !self.eat(&mut root, TokenKind::Semicolon) {
            return Err(self.err_expected("';'"));
        }
        self.finish(root)
    }

    fn parse_statement_body(&mut self) -> PResult<ParseNode> {
        let tok = self.current();
        if tok.kind == TokenKind::LeftParen {
            return self.parse_select_stmt();
        }
        if !tok.kind.is_word() {
            return Err(self.err_expected("statement"));
        }
        let word = tok.text.to_ascii_uppercase();
        let mysql = self.grammar.is_mysql();
        let oracle = self.grammar.is_oracle();
        match word.as_str() {
            "SELECT" | "WITH" => self.parse_select_stmt(),
            "VALUES" | "TABLE" if mysql => self.parse_select_stmt(),
            "INSERT" => self.parse_insert(),
            "REPLACE" if mysql => self.parse_insert(),
            "UPDATE" => self.parse_update(),
            "DELETE" => self.parse_delete(),
            "MERGE" if oracle => self.parse_merge(),
            "LOAD" if mysql => self.parse_load_data(),
            "CALL" => self.parse_call(),
            "CREATE" => self.parse_create(),
            "ALTER" => self.parse_alter(),
            "DROP" => self.parse_drop(),
            "TRUNCATE" => self.parse_truncate(),
            "RENAME" => self.parse_rename(),
            "COMMENT" if oracle => self.parse_comment_on(),
            "FLASHBACK" => self.parse_flashback(),
            "PURGE" => self.parse_purge(),
            "ANALYZE" => self.parse_analyze(),
            "BEGIN" | "START" => self.parse_begin(),
            "COMMIT" => self.parse_commit(),
            "ROLLBACK" => self.parse_rollback(),
            "SAVEPOINT" => self.parse_savepoint(),
            "RELEASE" => self.parse_release_savepoint(),
            "XA" if mysql => self.parse_xa(),
            "LOCK" => self.parse_lock(),
            "UNLOCK" if mysql => self.parse_unlock(),
            "SET" => self.parse_set(),
            "SHOW" => self.parse_show(),
            "EXPLAIN" => self.parse_explain(),
            "DESC" | "DESCRIBE" => self.parse_describe(),
            "USE" if mysql => self.parse_use(),
            "GRANT" => self.parse_grant(),
            "REVOKE" => self.parse_revoke(),
            "KILL" => self.parse_kill(),
            "PREPARE" if mysql => self.parse_prepare(),
            "EXECUTE" if mysql => self.parse_execute(),
            "DEALLOCATE" if mysql => self.parse_deallocate(),
            "HELP" if mysql => self.parse_help(),
            _ => Err(self.err_expected("statement")),
        }
    }

    // -----------------------------------------------------------------------
    // Token navigation
    // -----------------------------------------------------------------------

    pub(crate) fn current(&self) -> &Token {
        self.nth(0)
    }

    pub(crate) fn nth(&self, n: usize) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + n).min(last)]
    }

    pub(crate) fn peek(&self) -> TokenKind {
        self.current().kind
    }

    pub(crate) fn peek_nth(&self, n: usize) -> TokenKind {
        self.nth(n).kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.peek() == TokenKind::Eof
    }

    /// Consume the current token and return a copy of it.
    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if !self.at_eof() {
            self.pos += 1;
        }
        tok
    }

    /// Push the current token into `b` unconditionally.
    pub(crate) fn take(&mut self, b: &mut NodeBuilder) {
        let tok = self.advance();
        b.push_token(tok);
    }

    pub(crate) fn has(&self, feature: DialectFeatures) -> bool {
        self.grammar.has(feature)
    }

    pub(crate) fn is_mysql(&self) -> bool {
        self.grammar.is_mysql()
    }

    pub(crate) fn is_oracle(&self) -> bool {
        self.grammar.is_oracle()
    }

    fn note_expected(&self, what: &'static str) {
        let mut exp = self.expected.borrow_mut();
        if self.pos > exp.pos {
            exp.pos = self.pos;
            exp.items.clear();
        }
        if self.pos == exp.pos && !exp.items.contains(&what) {
            exp.items.push(what);
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.note_expected(kind.describe());
        self.peek() == kind
    }

    pub(crate) fn check_kw(&self, kw: Keyword) -> bool {
        self.check_word(kw.as_str())
    }

    /// Current token is the unquoted word `word`, keyword or not.
    pub(crate) fn check_word(&self, word: &'static str) -> bool {
        self.note_expected(word);
        self.current().is_word(word)
    }

    /// Lookahead without touching the expected set.
    pub(crate) fn word_at(&self, n: usize, word: &str) -> bool {
        self.nth(n).is_word(word)
    }

    pub(crate) fn eat(&mut self, b: &mut NodeBuilder, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.take(b);
            true
        } else {
            false
        }
    }

    pub(crate) fn eat_kw(&mut self, b: &mut NodeBuilder, kw: Keyword) -> bool {
        self.eat_word(b, kw.as_str())
    }

    pub(crate) fn eat_word(&mut self, b: &mut NodeBuilder, word: &'static str) -> bool {
        if self.check_word(word) {
            self.take(b);
            true
        } else {
            false
        }
    }

    /// Eat a run of words only if all of them are present.
    pub(crate) fn eat_words(&mut self, b: &mut NodeBuilder, words: &[&'static str]) -> bool {
        if let Some(first) = words.first() {
            self.note_expected(first);
        }
        if words.iter().enumerate().all(|(i, w)| self.word_at(i, w)) {
            for _ in words {
                self.take(b);
            }
            true
        } else {
            false
        }
    }

    /// Number of words in `phrase` when the upcoming tokens spell it, else 0.
    pub(crate) fn phrase_ahead(&self, phrase: &str) -> usize {
        let mut len = 0;
        for word in phrase.split(' ') {
            if !self.word_at(len, word) {
                return 0;
            }
            len += 1;
        }
        len
    }

    /// Eat the first of `phrases` (space separated words) that is present.
    pub(crate) fn eat_phrase(
        &mut self,
        b: &mut NodeBuilder,
        phrases: &[&'static str],
    ) -> Option<&'static str> {
        for phrase in phrases {
            self.note_expected(phrase);
        }
        let (phrase, len) = phrases.iter().find_map(|p| {
            let len = self.phrase_ahead(p);
            (len > 0).then_some((*p, len))
        })?;
        for _ in 0..len {
            self.take(b);
        }
        Some(phrase)
    }

    pub(crate) fn expect(&mut self, b: &mut NodeBuilder, kind: TokenKind) -> PResult<()> {
        if self.eat(b, kind) {
            Ok(())
        } else {
            Err(self.err_expected(kind.describe()))
        }
    }

    pub(crate) fn expect_kw(&mut self, b: &mut NodeBuilder, kw: Keyword) -> PResult<()> {
        self.expect_word(b, kw.as_str())
    }

    pub(crate) fn expect_word(&mut self, b: &mut NodeBuilder, word: &'static str) -> PResult<()> {
        if self.eat_word(b, word) {
            Ok(())
        } else {
            Err(self.err_expected(word))
        }
    }

    /// Eat one of `words`, returning which one matched.
    pub(crate) fn eat_one_of(
        &mut self,
        b: &mut NodeBuilder,
        words: &[&'static str],
    ) -> Option<&'static str> {
        let hit = words.iter().copied().find(|w| self.check_word(*w));
        if hit.is_some() {
            self.take(b);
        }
        hit
    }

    pub(crate) fn expect_one_of(
        &mut self,
        b: &mut NodeBuilder,
        words: &[&'static str],
    ) -> PResult<&'static str> {
        match self.eat_one_of(b, words) {
            Some(w) => Ok(w),
            None => Err(self.err_expected(words.first().copied().unwrap_or("keyword"))),
        }
    }

    // -----------------------------------------------------------------------
    // Errors
    // -----------------------------------------------------------------------

    pub(crate) fn err_expected(&self, what: &'static str) -> Failure {
        self.note_expected(what);
        let tok = self.current();
        let message = match tok.kind {
            TokenKind::Eof => "unexpected end of input".to_owned(),
            TokenKind::Invalid => "invalid token".to_owned(),
            _ => format!("unexpected '{}'", tok.text),
        };
        self.err_msg(message)
    }

    pub(crate) fn err_msg(&self, message: String) -> Failure {
        let tok = self.current();
        let exp = self.expected.borrow();
        let mut expected: Vec<String> = if exp.pos == self.pos {
            exp.items.iter().map(|s| (*s).to_owned()).collect()
        } else {
            Vec::new()
        };
        expected.sort_unstable();
        expected.dedup();
        let message = if expected.is_empty() {
            message
        } else {
            format!("{message}, expected one of: {}", expected.join(", "))
        };
        Failure::Syntax(Box::new(SyntaxError {
            message,
            rule: self.rule_stack.last().map_or("stmt", |k| k.name()),
            expected,
            found: if tok.kind == TokenKind::Eof {
                "end of input".to_owned()
            } else {
                tok.text.clone()
            },
            span: tok.span,
            position: SourcePosition::new(tok.span.start, tok.line, tok.col),
        }))
    }

    // -----------------------------------------------------------------------
    // Node construction
    // -----------------------------------------------------------------------

    /// Open a rule. Fails once nesting exceeds the configured depth.
    pub(crate) fn begin(&mut self, kind: RuleKind) -> PResult<NodeBuilder> {
        self.rule_stack.push(kind);
        self.budget.check_depth(self.rule_stack.len())?;
        Ok(NodeBuilder {
            kind,
            children: Vec::new(),
            value: None,
        })
    }

    /// Open a rule whose first child is an already built node.
    pub(crate) fn begin_with(&mut self, kind: RuleKind, first: ParseNode) -> PResult<NodeBuilder> {
        let mut b = self.begin(kind)?;
        b.push_node(first);
        Ok(b)
    }

    pub(crate) fn finish(&mut self, b: NodeBuilder) -> PResult<ParseNode> {
        self.rule_stack.pop();
        self.budget.charge_node()?;
        let node = ParseNode::new(b.kind, b.children);
        Ok(match b.value {
            Some(v) => node.with_value(v),
            None => node,
        })
    }

    /// Finish `child` and append it to `parent`.
    pub(crate) fn attach(&mut self, parent: &mut NodeBuilder, child: NodeBuilder) -> PResult<()> {
        let node = self.finish(child)?;
        parent.push_node(node);
        Ok(())
    }

    /// A node holding just the current token.
    pub(crate) fn leaf(&mut self, kind: RuleKind) -> PResult<ParseNode> {
        let mut b = self.begin(kind)?;
        self.take(&mut b);
        self.finish(b)
    }

    // -----------------------------------------------------------------------
    // Speculation
    // -----------------------------------------------------------------------

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            rules: self.rule_stack.len(),
            hints: self.hints.len(),
            hint_warnings: self.hint_warnings.len(),
            expected: self.expected.borrow().clone(),
        }
    }

    fn rollback(&mut self, cp: Checkpoint) {
        self.pos = cp.pos;
        self.rule_stack.truncate(cp.rules);
        self.hints.truncate(cp.hints);
        self.hint_warnings.truncate(cp.hint_warnings);
        self.expected.replace(cp.expected);
        metrics::record_speculation_rollback();
    }

    /// Try `f`; on a syntax error rewind to where it started and return `None`.
    ///
    /// Budget failures are never rolled back. Past `MAX_SPECULATION_DEPTH`
    /// nested attempts the alternative is committed to as if unconditional.
    pub(crate) fn speculate<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<Option<T>> {
        if self.speculation_depth >= MAX_SPECULATION_DEPTH {
            return f(self).map(Some);
        }
        let cp = self.checkpoint();
        self.speculation_depth += 1;
        let result = f(self);
        self.speculation_depth -= 1;
        match result {
            Ok(v) => Ok(Some(v)),
            Err(Failure::Syntax(_)) => {
                self.rollback(cp);
                Ok(None)
            }
            Err(fatal @ Failure::Fatal(_)) => Err(fatal),
        }
    }

    // -----------------------------------------------------------------------
    // Hints
    // -----------------------------------------------------------------------

    /// Absorb hint comments following a hint-accepting keyword.
    pub(crate) fn parse_hints(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        while self.peek() == TokenKind::HintComment {
            let tok = self.advance();
            let (hints, warnings) = parse_hint_comment(&tok, self.options.strict_hint_syntax);
            self.hints.extend(hints);
            self.hint_warnings.extend(warnings);
            let mut clause = self.begin(RuleKind::HintClause)?;
            clause.push_token(tok);
            self.attach(b, clause)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Names
    // -----------------------------------------------------------------------

    /// Tokens usable as an identifier: plain or quoted identifiers and
    /// keywords the dialect does not reserve.
    pub(crate) fn is_identifier(&self, tok: &Token) -> bool {
        match tok.kind {
            TokenKind::Ident | TokenKind::QuotedIdent => true,
            TokenKind::Keyword(kw) => !self.grammar.keywords.is_reserved(kw),
            _ => false,
        }
    }

    pub(crate) fn check_ident(&self) -> bool {
        self.note_expected("identifier");
        self.is_identifier(self.current())
    }

    fn normalize(&self, tok: &Token) -> String {
        literal::identifier(tok, self.grammar, self.options).name
    }

    /// A single identifier as an `Identifier` node.
    pub(crate) fn parse_identifier(&mut self) -> PResult<ParseNode> {
        if !self.check_ident() {
            return Err(self.err_expected("identifier"));
        }
        let tok = self.advance();
        let id = literal::identifier(&tok, self.grammar, self.options);
        let mut b = self.begin(RuleKind::Identifier)?;
        b.push_token(tok);
        b.set_value(NodeValue::Identifier(id));
        self.finish(b)
    }

    /// Identifier, or any word when reserved words are acceptable in context
    /// (after a dot, as an option name).
    pub(crate) fn parse_any_word(&mut self) -> PResult<ParseNode> {
        if self.peek().is_word() && !self.check_ident() {
            let tok = self.advance();
            let id = literal::identifier(&tok, self.grammar, self.options);
            let mut b = self.begin(RuleKind::Identifier)?;
            b.push_token(tok);
            b.set_value(NodeValue::Identifier(id));
            return self.finish(b);
        }
        self.parse_identifier()
    }

    /// Dotted name parts pushed straight into `b`: `a`, `a.b`, `a.b.c`.
    pub(crate) fn push_name_parts(
        &mut self,
        b: &mut NodeBuilder,
        max_parts: usize,
    ) -> PResult<QualifiedName> {
        if !self.check_ident() {
            return Err(self.err_expected("identifier"));
        }
        let first = self.advance();
        let mut parts = vec![self.normalize(&first)];
        b.push_token(first);
        while parts.len() < max_parts
            && self.peek() == TokenKind::Dot
            && matches!(self.peek_nth(1), TokenKind::Ident | TokenKind::QuotedIdent | TokenKind::Keyword(_))
        {
            self.take(b);
            let part = self.advance();
            parts.push(self.normalize(&part));
            b.push_token(part);
        }
        let mut dblink = None;
        if self.is_oracle() && self.peek() == TokenKind::UserVariable {
            let link = self.advance();
            dblink = Some(link.text.trim_start_matches('@').to_owned());
            b.push_token(link);
        }
        Ok(QualifiedName { parts, dblink })
    }

    /// A schema-qualified object name as a node of `kind`.
    pub(crate) fn parse_object_name(&mut self, kind: RuleKind) -> PResult<ParseNode> {
        let mut b = self.begin(kind)?;
        let name = self.push_name_parts(&mut b, 3)?;
        b.set_value(NodeValue::Name(name));
        self.finish(b)
    }

    pub(crate) fn parse_relation(&mut self) -> PResult<ParseNode> {
        self.parse_object_name(RuleKind::RelationFactor)
    }

    // -----------------------------------------------------------------------
    // Composable list helpers
    // -----------------------------------------------------------------------

    /// `item (, item)*`, items and commas pushed into `b`.
    pub(crate) fn parse_comma_sep(
        &mut self,
        b: &mut NodeBuilder,
        mut item: impl FnMut(&mut Self) -> PResult<ParseNode>,
    ) -> PResult<()> {
        loop {
            let node = item(self)?;
            b.push_node(node);
            if !self.eat(b, TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    /// `( item, ... )` pushed into `b`.
    pub(crate) fn parse_paren_sep(
        &mut self,
        b: &mut NodeBuilder,
        item: impl FnMut(&mut Self) -> PResult<ParseNode>,
    ) -> PResult<()> {
        self.expect(b, TokenKind::LeftParen)?;
        self.parse_comma_sep(b, item)?;
        self.expect(b, TokenKind::RightParen)
    }

    /// `( name, ... )`
    pub(crate) fn parse_column_list(&mut self) -> PResult<ParseNode> {
        let mut b = self.begin(RuleKind::ColumnList)?;
        self.parse_paren_sep(&mut b, Self::parse_identifier)?;
        self.finish(b)
    }

    /// Zero or more repetitions of an optional clause.
    pub(crate) fn parse_repeated(
        &mut self,
        b: &mut NodeBuilder,
        mut item: impl FnMut(&mut Self) -> PResult<Option<ParseNode>>,
        separator: Option<TokenKind>,
    ) -> PResult<usize> {
        let mut count = 0;
        loop {
            let Some(node) = item(self)? else {
                return Ok(count);
            };
            b.push_node(node);
            count += 1;
            if let Some(sep) = separator {
                if self.peek() == sep {
                    self.take(b);
                }
            }
        }
    }

    /// Consume raw tokens up to the end of the statement. Parentheses must balance.
    pub(crate) fn parse_rest_of_statement(&mut self, b: &mut NodeBuilder) -> PResult<()> {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                TokenKind::Eof => break,
                TokenKind::Semicolon if depth == 0 => break,
                TokenKind::Invalid => return Err(self.err_expected("token")),
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    if depth == 0 {
                        return Err(self.err_expected("';'"));
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.take(b);
        }
        if depth > 0 {
            return Err(self.err_expected("')'"));
        }
        Ok(())
    }

    pub(crate) fn charset(&self) -> &CharsetConfig {
        self.charset
    }

    pub(crate) fn grammar(&self) -> &'static DialectGrammar {
        self.grammar
    }

    pub(crate) fn options(&self) -> &ParseOptions {
        self.options
    }
}
