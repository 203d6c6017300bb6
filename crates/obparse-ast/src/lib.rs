//! Parse-tree model for the dual-dialect SQL front end.
//!
//! Trees are concrete: every node keeps its tokens, so any node can be
//! mapped back to the exact source text through its span, and the whole
//! tree can be rendered to canonical SQL with `Display`.

pub mod keyword;
pub mod node;
mod render;
pub mod rule;
pub mod statement;
pub mod token;
pub mod walk;

pub use keyword::Keyword;
pub use node::{
    ColumnAttributeKind, ConstraintKind, Descendants, Identifier, JoinKind, LiteralValue,
    NodeValue, Operator, ParseChild, ParseNode, PartitionMethod, QualifiedName, SetOperation,
    SetOperator, StringLiteral, TemporalKind, Variable, VariableScope,
};
pub use obparse_types::{Span, SourcePosition};
pub use rule::{RuleKind, StatementCategory};
pub use statement::{Hint, HintArg, Statement};
pub use token::{Token, TokenKind};
pub use walk::{ListenerTable, WalkControl, WalkOutcome, walk};

#[cfg(test)]
mod tests {
    use obparse_types::DialectMode;

    use super::*;

    fn stmt_tree() -> ParseNode {
        let tok = |kind, text: &str, at: u32| {
            ParseChild::Token(Token {
                kind,
                text: text.to_owned(),
                span: Span::new(at, at + text.len() as u32),
                line: 1,
                col: at + 1,
                mode: DialectMode::OracleCompatible,
            })
        };
        let body = ParseNode::new(
            RuleKind::CommitStmt,
            vec![tok(TokenKind::Keyword(Keyword::Commit), "COMMIT", 0)],
        );
        ParseNode::new(
            RuleKind::Stmt,
            vec![ParseChild::Node(body), tok(TokenKind::Semicolon, ";", 6)],
        )
    }

    #[test]
    fn statement_exposes_body_kind_and_category() {
        let stmt = Statement::new(0, stmt_tree(), Vec::new(), Vec::new());
        assert_eq!(stmt.kind(), RuleKind::CommitStmt);
        assert_eq!(stmt.category(), Some(StatementCategory::Transaction));
        assert_eq!(stmt.source_text("COMMIT;"), "COMMIT;");
        assert_eq!(stmt.to_string(), "COMMIT;");
        assert_eq!(stmt.rule_kinds(), vec![RuleKind::Stmt, RuleKind::CommitStmt]);
    }

    #[test]
    fn statement_serializes_to_json() {
        let stmt = Statement::new(3, stmt_tree(), Vec::new(), Vec::new());
        let json = serde_json::to_value(&stmt).unwrap();
        assert_eq!(json["index"], 3);
        assert_eq!(json["tree"]["kind"], "Stmt");
        assert_eq!(
            json["tree"]["children"][0]["children"][0]["kind"]["Keyword"],
            "COMMIT"
        );
    }
}
