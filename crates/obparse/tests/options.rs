//! Caller configuration: TOML option files, resource budgets, and the
//! process-wide parse metrics.

use std::io::Write;

use obparse::{
    Charset, CharsetConfig, ConfigError, DialectMode, LexicalErrorKind, ParseErrorKind,
    ParseOptions, ResourceLimit, RuleKind, SqlParser, parse_metrics_snapshot,
};
use tempfile::NamedTempFile;

const MY: DialectMode = DialectMode::MySqlCompatible;
const ORA: DialectMode = DialectMode::OracleCompatible;

// ─── Helpers ────────────────────────────────────────────────────────────

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Write `body` to a temporary `.toml` file that lives as long as the handle.
fn config_file(body: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn parser_with(mode: DialectMode, toml: &str) -> SqlParser {
    SqlParser::new(mode).with_options(ParseOptions::from_toml(mode, toml).unwrap())
}

fn nested_parens(depth: usize) -> String {
    format!("SELECT {}1{}", "(".repeat(depth), ")".repeat(depth))
}

// ─── Option files ───────────────────────────────────────────────────────

#[test]
fn option_file_overrides_only_what_it_sets() {
    let file = config_file("strict_hint_syntax = true\nmax_recursion_depth = 64\n");
    let parser = SqlParser::from_config_file(ORA, file.path()).unwrap();
    let opts = parser.options();
    assert!(opts.strict_hint_syntax);
    assert_eq!(opts.max_recursion_depth, 64);
    assert_eq!(opts.max_identifier_length, 128);
    assert!(opts.error_recovery);
    assert_eq!(parser.mode(), ORA);
}

#[test]
fn option_file_rejects_unknown_and_invalid_keys() {
    let file = config_file("max_statements = 3\n");
    let err = SqlParser::from_config_file(MY, file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err}");

    let file = config_file("max_recursion_depth = 4\n");
    let err = SqlParser::from_config_file(MY, file.path()).unwrap_err();
    assert!(
        matches!(err, ConfigError::Invalid { key: "max_recursion_depth", .. }),
        "{err}"
    );
}

#[test]
fn strict_hints_turn_unknown_directives_into_warnings() {
    let sql = "SELECT /*+ NO_SUCH_HINT(t) INDEX(t i1) */ a FROM t";

    let lenient = SqlParser::new(MY).parse(sql).unwrap();
    assert!(lenient.is_clean());
    assert!(lenient.statements[0].hint_warnings().is_empty());

    let strict = parser_with(MY, "strict_hint_syntax = true").parse(sql).unwrap();
    assert!(strict.is_clean());
    let stmt = &strict.statements[0];
    assert_eq!(stmt.hints().len(), 2);
    assert_eq!(stmt.hint_warnings().len(), 1);
    assert_eq!(stmt.hint_warnings()[0].directive.as_deref(), Some("NO_SUCH_HINT"));
}

#[test]
fn case_sensitive_identifiers_skip_folding() {
    let sql = "SELECT a FROM MyTab";
    let name = |parser: &SqlParser| {
        let out = parser.parse(sql).unwrap();
        out.statements[0]
            .body()
            .find(RuleKind::RelationFactor)
            .and_then(|r| r.qualified_name())
            .map(|n| n.name().to_owned())
            .unwrap()
    };
    assert_eq!(name(&SqlParser::new(ORA)), "MYTAB");
    assert_eq!(name(&parser_with(ORA, "case_sensitive_identifiers = true")), "MyTab");
}

#[test]
fn identifier_length_limit_is_a_lexical_error() {
    let parser = parser_with(MY, "max_identifier_length = 8");
    let out = parser.parse("SELECT customer_name FROM t; SELECT id FROM t").unwrap();
    assert_eq!(out.statements.len(), 1);
    assert_eq!(out.statements[0].index(), 1);
    assert_eq!(out.errors.len(), 1);
    match &out.errors[0].kind {
        ParseErrorKind::Lexical(e) => assert_eq!(e.kind, LexicalErrorKind::IdentifierTooLong),
        ParseErrorKind::Syntax(e) => panic!("expected a lexical error, got {e}"),
    }
}

#[test]
fn charset_configuration_is_accepted() {
    let parser = SqlParser::new(MY).with_charset(CharsetConfig::new(Charset::Gbk));
    let out = parser.parse("SELECT 'abc' FROM t").unwrap();
    assert!(out.is_clean());
}

// ─── Resource budgets ───────────────────────────────────────────────────

#[test]
fn node_budget_aborts_the_whole_call() {
    init_tracing();
    let parser = parser_with(MY, "max_parse_nodes = 16");
    let err = parser
        .parse("SELECT 1; SELECT a, b, c, d, e, f FROM t WHERE a = 1 AND b = 2")
        .unwrap_err();
    assert_eq!(err.limit, ResourceLimit::NodeCount);
    assert_eq!(err.limit_value, 16);
    assert!(err.to_string().contains("node_count"), "{err}");
}

#[test]
fn depth_budget_is_configurable() {
    let sql = nested_parens(40);
    assert!(SqlParser::new(ORA).parse(&sql).unwrap().is_clean());

    let err = parser_with(ORA, "max_recursion_depth = 16").parse(&sql).unwrap_err();
    assert_eq!(err.limit, ResourceLimit::RecursionDepth);
    assert_eq!(err.limit_value, 16);
    assert_eq!(err.statement_index, 0);
}

#[test]
fn depth_budget_failure_names_the_offending_statement() {
    let sql = format!("SELECT 1 FROM dual; {}", nested_parens(40));
    let err = parser_with(ORA, "max_recursion_depth = 16").parse(&sql).unwrap_err();
    assert_eq!(err.statement_index, 1);
    assert_eq!(err.position.line, 1);
}

#[test]
fn zero_timeout_expires_immediately() {
    let err = parser_with(MY, "timeout_ms = 0").parse("SELECT 1").unwrap_err();
    assert_eq!(err.limit, ResourceLimit::Deadline);
}

#[test]
fn generous_timeout_does_not_interfere() {
    let out = parser_with(MY, "timeout_ms = 60000").parse("SELECT 1; SELECT 2").unwrap();
    assert_eq!(out.statements.len(), 2);
}

// ─── Metrics ────────────────────────────────────────────────────────────

#[test]
fn metrics_count_calls_and_statements() {
    let before = parse_metrics_snapshot();
    let parser = SqlParser::new(MY);
    for _ in 0..3 {
        parser.parse("SELECT 1; SELECT FROM").unwrap();
    }
    let after = parse_metrics_snapshot();
    assert!(after.obparse_parse_calls_total >= before.obparse_parse_calls_total + 3);
    assert!(after.obparse_statements_total >= before.obparse_statements_total + 3);
    assert!(after.obparse_syntax_errors_total >= before.obparse_syntax_errors_total + 3);
    assert!(after.obparse_parse_duration.count >= before.obparse_parse_duration.count + 3);
    assert!(after.obparse_tokens_total > before.obparse_tokens_total);
}
