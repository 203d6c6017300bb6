use std::fmt;

use obparse_error::HintParseWarning;
use obparse_types::Span;
use serde::Serialize;

use crate::walk::{ListenerTable, WalkOutcome, walk};
use crate::{ParseNode, RuleKind, StatementCategory};

/// One optimizer directive from a `/*+ ... */` comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    /// Directive name, upper-cased.
    pub name: String,
    pub args: Vec<HintArg>,
    /// Whether the name is a directive the optimizer knows about.
    pub known: bool,
    pub span: Span,
}

impl Hint {
    #[must_use]
    pub fn arg_texts(&self) -> Vec<&str> {
        self.args.iter().map(|a| a.text.as_str()).collect()
    }
}

/// A raw hint argument token; interpretation is left to the optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintArg {
    pub text: String,
    pub span: Span,
}

/// A top-level statement of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    index: usize,
    tree: ParseNode,
    hints: Vec<Hint>,
    hint_warnings: Vec<HintParseWarning>,
}

impl Statement {
    /// `tree` must be a `Stmt` node whose first child node is the statement body.
    #[must_use]
    pub fn new(
        index: usize,
        tree: ParseNode,
        hints: Vec<Hint>,
        hint_warnings: Vec<HintParseWarning>,
    ) -> Self {
        debug_assert_eq!(tree.kind(), RuleKind::Stmt);
        Self {
            index,
            tree,
            hints,
            hint_warnings,
        }
    }

    /// Position of this statement in the submitted batch, counting failed ones.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Rule kind of the statement body, e.g. `RuleKind::SelectStmt`.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        self.body().kind()
    }

    #[must_use]
    pub fn category(&self) -> Option<StatementCategory> {
        self.kind().category()
    }

    /// The `Stmt` root: body plus terminator.
    #[must_use]
    pub const fn tree(&self) -> &ParseNode {
        &self.tree
    }

    #[must_use]
    pub fn body(&self) -> &ParseNode {
        self.tree.child_nodes().next().unwrap_or(&self.tree)
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        self.tree.span()
    }

    #[must_use]
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    #[must_use]
    pub fn hint_warnings(&self) -> &[HintParseWarning] {
        &self.hint_warnings
    }

    #[must_use]
    pub fn source_text<'s>(&self, source: &'s str) -> &'s str {
        self.tree.source_text(source)
    }

    /// Rule kinds of every node, pre-order.
    #[must_use]
    pub fn rule_kinds(&self) -> Vec<RuleKind> {
        self.tree.descendants().map(ParseNode::kind).collect()
    }

    pub fn walk<S>(&self, table: &mut ListenerTable<'_, S>, state: &mut S) -> WalkOutcome {
        walk(&self.tree, table, state)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}
