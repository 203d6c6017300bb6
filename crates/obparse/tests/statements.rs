//! End-to-end statement parsing through the public entry point.
//!
//! Covers the canonical single-statement shapes, hint extraction, batch
//! recovery, and the guarantee that every statement span slices back to its
//! own source text and re-renders to a tree of the same shape.

use obparse::{
    ColumnAttributeKind, DialectMode, LiteralValue, NodeValue, ParseOutput, RuleKind,
    SqlParser, Statement, parse_default,
};

const MY: DialectMode = DialectMode::MySqlCompatible;
const ORA: DialectMode = DialectMode::OracleCompatible;

// ─── Helpers ────────────────────────────────────────────────────────────

/// Parse and require a result within the default budgets.
fn run(mode: DialectMode, sql: &str) -> ParseOutput {
    parse_default(sql, mode).expect("default budgets are never hit here")
}

/// Parse a batch that must be free of diagnostics.
fn parse_clean(mode: DialectMode, sql: &str) -> Vec<Statement> {
    let out = run(mode, sql);
    assert!(out.is_clean(), "{sql}: {:?}", out.errors);
    out.statements
}

fn parse_single(mode: DialectMode, sql: &str) -> Statement {
    let mut stmts = parse_clean(mode, sql);
    assert_eq!(stmts.len(), 1, "{sql}");
    stmts.remove(0)
}

// ─── Canonical statements ───────────────────────────────────────────────

#[test]
fn select_one_from_dual_in_both_dialects() {
    for mode in [MY, ORA] {
        let stmt = parse_single(mode, "SELECT 1 FROM dual");
        assert_eq!(stmt.kind(), RuleKind::SelectStmt);

        let projection = stmt.body().find(RuleKind::Projection).unwrap();
        assert_eq!(projection.child_nodes().count(), 1);
        let one = projection.find(RuleKind::Literal).unwrap();
        assert_eq!(one.literal(), Some(&LiteralValue::Integer(1)));

        let from = stmt.body().find(RuleKind::FromClause).unwrap();
        let factors = from.find_all(RuleKind::TableFactor);
        assert_eq!(factors.len(), 1);
        let name = factors[0]
            .find(RuleKind::RelationFactor)
            .and_then(|r| r.qualified_name())
            .unwrap();
        assert!(name.name().eq_ignore_ascii_case("dual"));
        assert_eq!(name.schema(), None);
    }
}

#[test]
fn create_table_attaches_primary_key_to_its_column() {
    let stmt = parse_single(MY, "CREATE TABLE t (a INT PRIMARY KEY, b VARCHAR(10))");
    assert_eq!(stmt.kind(), RuleKind::CreateTableStmt);

    let columns = stmt.body().find_all(RuleKind::ColumnDefinition);
    assert_eq!(columns.len(), 2);
    let pk_owners: Vec<&str> = columns
        .iter()
        .filter(|c| {
            c.find_all(RuleKind::ColumnAttribute).iter().any(|a| {
                a.value() == Some(&NodeValue::ColumnAttribute(ColumnAttributeKind::PrimaryKey))
            })
        })
        .filter_map(|c| c.child(RuleKind::Identifier)?.identifier())
        .map(|id| id.name.as_str())
        .collect();
    assert_eq!(pk_owners, vec!["a"]);
}

#[test]
fn index_hint_is_extracted_with_raw_arguments() {
    for mode in [MY, ORA] {
        let stmt = parse_single(mode, "SELECT /*+ INDEX(t idx1) */ a FROM t");
        assert_eq!(stmt.hints().len(), 1);
        let hint = &stmt.hints()[0];
        assert_eq!(hint.name, "INDEX");
        assert_eq!(hint.arg_texts(), vec!["t", "idx1"]);
        assert!(hint.known);
    }
}

#[test]
fn unrecognized_hint_name_still_parses() {
    let stmt = parse_single(MY, "SELECT /*+ FROBNICATE(t idx1) */ a FROM t");
    assert_eq!(stmt.kind(), RuleKind::SelectStmt);
    assert_eq!(stmt.hints().len(), 1);
    assert_eq!(stmt.hints()[0].name, "FROBNICATE");
    assert!(!stmt.hints()[0].known);
}

#[test]
fn ordinary_comments_are_not_hints() {
    let stmt = parse_single(ORA, "SELECT /* INDEX(t idx1) */ a FROM t -- trailing");
    assert!(stmt.hints().is_empty());
}

// ─── Batches and recovery ───────────────────────────────────────────────

#[test]
fn broken_statements_do_not_hide_good_ones() {
    let sql = "SELECT FROM t;\nSELECT 1 FROM dual;\nUPDATE SET a = 1;";
    let out = run(MY, sql);

    assert_eq!(out.statements.len(), 1);
    assert_eq!(out.statements[0].index(), 1);
    assert_eq!(out.statements[0].source_text(sql), "SELECT 1 FROM dual;");

    assert_eq!(out.errors.len(), 2);
    let lines: Vec<u32> = out.errors.iter().map(|e| e.position().line).collect();
    assert_eq!(lines, vec![1, 3]);
    let slots: Vec<usize> = out.errors.iter().map(|e| e.statement_index).collect();
    assert_eq!(slots, vec![0, 2]);
    for err in &out.errors {
        let syntax = err.as_syntax().expect("both failures are syntactic");
        assert!(!syntax.message.is_empty());
        assert!(!syntax.rule.is_empty());
    }
}

#[test]
fn error_display_names_statement_and_position() {
    let out = run(ORA, "SELECT 1 FROM dual;\nSELECT * FROM");
    assert_eq!(out.errors.len(), 1);
    let rendered = out.errors[0].to_string();
    assert!(rendered.starts_with("statement 1:"), "{rendered}");
}

#[test]
fn facade_parser_matches_free_function() {
    let sql = "INSERT INTO t (a, b) VALUES (1, 'x'); DELETE FROM t WHERE a = 1";
    let parser = SqlParser::new(MY);
    let via_struct = parser.parse(sql).unwrap();
    let via_fn = run(MY, sql);
    assert_eq!(via_struct.statements, via_fn.statements);
    assert_eq!(parser.mode(), MY);
}

// ─── Spans and rendering ────────────────────────────────────────────────

const MYSQL_CORPUS: &str = "\
SELECT a, b + 1 AS c FROM t WHERE a > 10 ORDER BY b DESC LIMIT 5;
INSERT INTO t (a, b) VALUES (1, 'one'), (2, 'two');
UPDATE t SET b = 'x' WHERE a IN (1, 2, 3);
DELETE FROM t WHERE b IS NULL;
CREATE TABLE u (id BIGINT NOT NULL AUTO_INCREMENT, name VARCHAR(64), PRIMARY KEY (id));
SELECT x.a FROM t x LEFT JOIN u y ON x.a = y.id UNION ALL SELECT 1;
DROP TABLE IF EXISTS u;
BEGIN;
COMMIT";

const ORACLE_CORPUS: &str = "\
SELECT e.ename, d.dname FROM emp e JOIN dept d ON e.deptno = d.deptno WHERE e.sal > 1000;
SELECT a FROM t MINUS SELECT a FROM u;
MERGE INTO t USING s ON (t.id = s.id) WHEN MATCHED THEN UPDATE SET t.v = s.v;
CREATE TABLE emp (eid NUMBER(10) NOT NULL, nm VARCHAR2(30), CONSTRAINT pk_emp PRIMARY KEY (eid));
SELECT a FROM t ORDER BY a FETCH FIRST 10 ROWS ONLY;
CREATE INDEX idx_nm ON emp (nm);
ROLLBACK";

#[test]
fn statement_spans_slice_back_to_source() {
    for (mode, sql) in [(MY, MYSQL_CORPUS), (ORA, ORACLE_CORPUS)] {
        let stmts = parse_clean(mode, sql);
        let expected: Vec<&str> = sql.lines().collect();
        assert_eq!(stmts.len(), expected.len());
        for (stmt, line) in stmts.iter().zip(expected) {
            assert_eq!(stmt.source_text(sql), line);
            for node in stmt.tree().descendants() {
                let span = node.span();
                if span.end > span.start {
                    assert!(span.start >= stmt.span().start && span.end <= stmt.span().end);
                }
            }
        }
    }
}

#[test]
fn rendered_statements_reparse_to_the_same_shape() {
    for (mode, sql) in [(MY, MYSQL_CORPUS), (ORA, ORACLE_CORPUS)] {
        for stmt in parse_clean(mode, sql) {
            let rendered = stmt.to_string();
            let again = parse_single(mode, &rendered);
            assert_eq!(again.rule_kinds(), stmt.rule_kinds(), "{rendered}");
            assert_eq!(again.to_string(), rendered);
        }
    }
}

#[test]
fn statement_categories_follow_the_body() {
    use obparse::StatementCategory as C;
    let stmts = parse_clean(MY, MYSQL_CORPUS);
    let categories: Vec<Option<C>> = stmts.iter().map(Statement::category).collect();
    assert_eq!(
        categories,
        vec![
            Some(C::Query),
            Some(C::Dml),
            Some(C::Dml),
            Some(C::Dml),
            Some(C::Ddl),
            Some(C::Query),
            Some(C::Ddl),
            Some(C::Transaction),
            Some(C::Transaction),
        ]
    );
}
