//! Parse-tree nodes.
//!
//! A node is a rule tag, an ordered list of children (nodes and terminal
//! tokens), the span they cover, and optional rule-specific data such as a
//! literal's decoded value. Nodes are immutable once built.

use obparse_types::{Charset, Span};
use serde::Serialize;

use crate::{RuleKind, Token};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParseChild {
    Node(ParseNode),
    Token(Token),
}

impl ParseChild {
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Node(n) => n.span,
            Self::Token(t) => t.span,
        }
    }

    #[must_use]
    pub const fn as_node(&self) -> Option<&ParseNode> {
        match self {
            Self::Node(n) => Some(n),
            Self::Token(_) => None,
        }
    }

    #[must_use]
    pub const fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Token(t) => Some(t),
            Self::Node(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseNode {
    kind: RuleKind,
    span: Span,
    children: Vec<ParseChild>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<NodeValue>,
}

impl ParseNode {
    /// Build a node; its span is the union of its children's spans.
    #[must_use]
    pub fn new(kind: RuleKind, children: Vec<ParseChild>) -> Self {
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => first.span().union(last.span()),
            _ => Span::ZERO,
        };
        Self {
            kind,
            span,
            children,
            value: None,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: NodeValue) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        self.kind
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn children(&self) -> &[ParseChild] {
        &self.children
    }

    #[must_use]
    pub const fn value(&self) -> Option<&NodeValue> {
        self.value.as_ref()
    }

    /// Direct child nodes, skipping terminal tokens.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(ParseChild::as_node)
    }

    /// Direct terminal tokens, skipping child nodes.
    pub fn child_tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(ParseChild::as_token)
    }

    #[must_use]
    pub fn child(&self, kind: RuleKind) -> Option<&Self> {
        self.child_nodes().find(|n| n.kind == kind)
    }

    /// Pre-order iterator over this node and all of its descendants.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First node of `kind` in pre-order, including `self`.
    #[must_use]
    pub fn find(&self, kind: RuleKind) -> Option<&Self> {
        self.descendants().find(|n| n.kind == kind)
    }

    #[must_use]
    pub fn find_all(&self, kind: RuleKind) -> Vec<&Self> {
        self.descendants().filter(|n| n.kind == kind).collect()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.descendants().count()
    }

    /// Every terminal token below this node, in source order.
    #[must_use]
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        let mut stack: Vec<&ParseChild> = self.children.iter().rev().collect();
        while let Some(child) = stack.pop() {
            match child {
                ParseChild::Token(t) => out.push(t),
                ParseChild::Node(n) => stack.extend(n.children.iter().rev()),
            }
        }
        out
    }

    /// True when some direct token child is the word `word`.
    #[must_use]
    pub fn has_word(&self, word: &str) -> bool {
        self.child_tokens().any(|t| t.is_word(word))
    }

    /// The exact source text this node was parsed from.
    #[must_use]
    pub fn source_text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }

    #[must_use]
    pub const fn identifier(&self) -> Option<&Identifier> {
        match &self.value {
            Some(NodeValue::Identifier(id)) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub const fn qualified_name(&self) -> Option<&QualifiedName> {
        match &self.value {
            Some(NodeValue::Name(name)) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub const fn literal(&self) -> Option<&LiteralValue> {
        match &self.value {
            Some(NodeValue::Literal(lit)) => Some(lit),
            _ => None,
        }
    }

    #[must_use]
    pub const fn operator(&self) -> Option<Operator> {
        match &self.value {
            Some(NodeValue::Operator(op)) => Some(*op),
            _ => None,
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a ParseNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ParseNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().filter_map(ParseChild::as_node));
        Some(node)
    }
}

// ---------------------------------------------------------------------------
// Auxiliary node data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum NodeValue {
    Identifier(Identifier),
    Name(QualifiedName),
    Literal(LiteralValue),
    Operator(Operator),
    Join(JoinKind),
    SetOp(SetOperation),
    ColumnAttribute(ColumnAttributeKind),
    Constraint(ConstraintKind),
    Partition(PartitionMethod),
    /// Canonical upper-case type name, e.g. `VARCHAR` or `TIMESTAMP WITH TIME ZONE`.
    TypeName(String),
    Variable(Variable),
}

/// An identifier as written plus its normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identifier {
    /// Source spelling without quotes.
    pub raw: String,
    /// Case-folded unless quoted or case-sensitive identifiers are enabled.
    pub name: String,
    pub quoted: bool,
}

/// Dotted object name, normalized parts in source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QualifiedName {
    pub parts: Vec<String>,
    /// Oracle `@dblink` suffix.
    pub dblink: Option<String>,
}

impl QualifiedName {
    /// The last part: the object itself.
    #[must_use]
    pub fn name(&self) -> &str {
        self.parts.last().map_or("", String::as_str)
    }

    /// The part before the object name, when present.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.parts
            .len()
            .checked_sub(2)
            .map(|i| self.parts[i].as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integer too wide for `i64`, kept as digits.
    BigInteger(String),
    /// Exact decimal, kept as written.
    Decimal(String),
    Float(f64),
    String(StringLiteral),
    Hex(Vec<u8>),
    /// Binary digits of a bit literal.
    Bit(String),
    /// `DATE '...'`, `TIMESTAMP '...'`, `TIME '...'`.
    Temporal { kind: TemporalKind, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StringLiteral {
    pub value: String,
    pub charset: Charset,
    /// Charset came from an explicit `_charset` introducer.
    pub introduced: bool,
    pub national: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalKind {
    Date,
    Time,
    Timestamp,
    Datetime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Or,
    Xor,
    And,
    Not,
    Is,
    IsNot,
    Eq,
    NullSafeEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
    Between,
    NotBetween,
    Like,
    NotLike,
    Regexp,
    NotRegexp,
    MemberOf,
    SoundsLike,
    BitOr,
    BitAnd,
    BitXor,
    ShiftLeft,
    ShiftRight,
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
    Concat,
    Neg,
    Plus,
    BitNot,
    LogicalNot,
    Binary,
    Prior,
    ConnectByRoot,
    Assign,
    JsonExtract,
    JsonUnquoteExtract,
}

impl Operator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::And => "AND",
            Self::Not => "NOT",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::Eq => "=",
            Self::NullSafeEq => "<=>",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Between => "BETWEEN",
            Self::NotBetween => "NOT BETWEEN",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Regexp => "REGEXP",
            Self::NotRegexp => "NOT REGEXP",
            Self::MemberOf => "MEMBER OF",
            Self::SoundsLike => "SOUNDS LIKE",
            Self::BitOr => "|",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "DIV",
            Self::Mod => "MOD",
            Self::Concat => "||",
            Self::Neg => "-",
            Self::Plus => "+",
            Self::BitNot => "~",
            Self::LogicalNot => "!",
            Self::Binary => "BINARY",
            Self::Prior => "PRIOR",
            Self::ConnectByRoot => "CONNECT_BY_ROOT",
            Self::Assign => ":=",
            Self::JsonExtract => "->",
            Self::JsonUnquoteExtract => "->>",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    Comma,
    Inner,
    Cross,
    Left,
    Right,
    Full,
    NaturalInner,
    NaturalLeft,
    NaturalRight,
    NaturalFull,
    Straight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SetOperation {
    pub op: SetOperator,
    pub all: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAttributeKind {
    NotNull,
    Null,
    Default,
    AutoIncrement,
    PrimaryKey,
    Unique,
    Comment,
    OnUpdate,
    Collate,
    Charset,
    Check,
    References,
    Generated,
    Identity,
    Visible,
    Invisible,
    Srid,
    Enable,
    Disable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey,
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionMethod {
    Hash,
    Key,
    Range,
    RangeColumns,
    List,
    ListColumns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableScope {
    User,
    Global,
    Session,
    Local,
    /// `@@name` with no explicit scope.
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Variable {
    pub scope: VariableScope,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use obparse_types::DialectMode;

    use super::*;
    use crate::TokenKind;

    fn tok(kind: TokenKind, text: &str, start: u32) -> ParseChild {
        ParseChild::Token(Token {
            kind,
            text: text.to_owned(),
            span: Span::new(start, start + text.len() as u32),
            line: 1,
            col: start + 1,
            mode: DialectMode::MySqlCompatible,
        })
    }

    fn sample() -> ParseNode {
        // a + 1
        let lhs = ParseNode::new(RuleKind::ColumnRef, vec![tok(TokenKind::Ident, "a", 0)]);
        let rhs = ParseNode::new(RuleKind::Literal, vec![tok(TokenKind::Integer, "1", 4)])
            .with_value(NodeValue::Literal(LiteralValue::Integer(1)));
        ParseNode::new(
            RuleKind::BitExpr,
            vec![
                ParseChild::Node(lhs),
                tok(TokenKind::Plus, "+", 2),
                ParseChild::Node(rhs),
            ],
        )
        .with_value(NodeValue::Operator(Operator::Add))
    }

    #[test]
    fn span_is_union_of_children() {
        let node = sample();
        assert_eq!(node.span(), Span::new(0, 5));
        assert_eq!(node.source_text("a + 1"), "a + 1");
    }

    #[test]
    fn descendants_are_pre_order() {
        let node = sample();
        let kinds: Vec<RuleKind> = node.descendants().map(ParseNode::kind).collect();
        assert_eq!(
            kinds,
            vec![RuleKind::BitExpr, RuleKind::ColumnRef, RuleKind::Literal]
        );
        assert_eq!(node.node_count(), 3);
    }

    #[test]
    fn tokens_are_in_source_order() {
        let node = sample();
        let texts: Vec<&str> = node.tokens().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "+", "1"]);
    }

    #[test]
    fn typed_accessors() {
        let node = sample();
        assert_eq!(node.operator(), Some(Operator::Add));
        let lit = node.find(RuleKind::Literal).unwrap();
        assert_eq!(lit.literal(), Some(&LiteralValue::Integer(1)));
        assert!(node.identifier().is_none());
    }

    #[test]
    fn qualified_name_parts() {
        let name = QualifiedName {
            parts: vec!["db".into(), "t".into()],
            dblink: None,
        };
        assert_eq!(name.name(), "t");
        assert_eq!(name.schema(), Some("db"));
        let bare = QualifiedName {
            parts: vec!["t".into()],
            dblink: None,
        };
        assert_eq!(bare.schema(), None);
    }
}
