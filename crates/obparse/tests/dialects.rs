//! Dialect purity: each mode accepts its own syntax and rejects the other's.
//!
//! The same text is parsed under both modes and the outcome is checked
//! against the mode's keyword table and feature set, never a blend of both.

use obparse::{
    DialectMode, Keyword, KeywordClass, Operator, ParseOptions, ParseOutput, RuleKind, TokenKind,
    classify, grammar, parse_default, tokenize,
};
use proptest::prelude::*;

const MY: DialectMode = DialectMode::MySqlCompatible;
const ORA: DialectMode = DialectMode::OracleCompatible;

// ─── Helpers ────────────────────────────────────────────────────────────

fn run(mode: DialectMode, sql: &str) -> ParseOutput {
    parse_default(sql, mode).unwrap()
}

fn accepts(mode: DialectMode, sql: &str) -> bool {
    let out = run(mode, sql);
    out.is_clean() && out.statements.len() == 1
}

/// Statements valid in exactly one mode, paired with that mode.
const ONE_SIDED: &[(DialectMode, &str)] = &[
    (MY, "SELECT a FROM t LIMIT 1"),
    (MY, "SELECT a FROM t EXCEPT SELECT a FROM u"),
    (MY, "REPLACE INTO t (a) VALUES (1)"),
    (ORA, "SELECT a FROM t ORDER BY a FETCH FIRST 5 ROWS ONLY"),
    (ORA, "SELECT a FROM t MINUS SELECT a FROM u"),
    (ORA, "SELECT * FROM a FULL OUTER JOIN b ON a.id = b.id"),
    (ORA, "MERGE INTO t USING s ON (t.id = s.id) WHEN MATCHED THEN UPDATE SET t.v = s.v"),
];

// ─── Mode-specific syntax ───────────────────────────────────────────────

#[test]
fn one_sided_syntax_is_rejected_by_the_other_mode() {
    for &(mode, sql) in ONE_SIDED {
        let other = match mode {
            DialectMode::MySqlCompatible => ORA,
            DialectMode::OracleCompatible => MY,
        };
        assert!(accepts(mode, sql), "{sql} should parse as {mode:?}");
        assert!(!accepts(other, sql), "{sql} should not parse as {other:?}");
    }
}

#[test]
fn double_pipe_means_or_in_mysql_and_concat_in_oracle() {
    let sql = "SELECT a || b FROM t";
    let operator = |mode| {
        run(mode, sql).statements[0]
            .body()
            .find(RuleKind::SelectItem)
            .and_then(|item| item.child_nodes().next())
            .and_then(|n| n.operator())
    };
    assert_eq!(operator(MY), Some(Operator::Or));
    assert_eq!(operator(ORA), Some(Operator::Concat));
}

#[test]
fn identifiers_fold_to_the_dialect_case() {
    let sql = "SELECT Col FROM Sch.Tab";
    let names = |mode| {
        let out = run(mode, sql);
        let name = out.statements[0]
            .body()
            .find(RuleKind::RelationFactor)
            .and_then(|r| r.qualified_name())
            .cloned()
            .unwrap();
        (name.schema().map(str::to_owned), name.name().to_owned())
    };
    assert_eq!(names(MY), (Some("sch".to_owned()), "tab".to_owned()));
    assert_eq!(names(ORA), (Some("SCH".to_owned()), "TAB".to_owned()));
}

#[test]
fn quoted_identifiers_keep_their_spelling() {
    let out = run(ORA, "SELECT a FROM \"MixedCase\"");
    let relation = out.statements[0].body().find(RuleKind::RelationFactor).unwrap();
    assert_eq!(relation.qualified_name().unwrap().name(), "MixedCase");

    let out = run(MY, "SELECT a FROM `MixedCase`");
    let relation = out.statements[0].body().find(RuleKind::RelationFactor).unwrap();
    assert_eq!(relation.qualified_name().unwrap().name(), "MixedCase");
}

// ─── Keyword tables ─────────────────────────────────────────────────────

#[test]
fn keyword_classes_differ_per_mode() {
    assert_eq!(classify(MY, "limit"), Some(KeywordClass::Reserved));
    assert_eq!(classify(ORA, "limit"), None);
    assert_eq!(classify(ORA, "minus"), Some(KeywordClass::Reserved));
    assert_eq!(classify(MY, "minus"), None);
    assert_eq!(classify(MY, "select"), Some(KeywordClass::Reserved));
    assert_eq!(classify(ORA, "SELECT"), Some(KeywordClass::Reserved));
}

#[test]
fn reserved_words_cannot_name_a_table() {
    assert!(accepts(MY, "CREATE TABLE minus (a INT)"));
    assert!(!accepts(ORA, "CREATE TABLE minus (a NUMBER)"));
    assert!(accepts(ORA, "CREATE TABLE limit (a NUMBER)"));
    assert!(!accepts(MY, "CREATE TABLE limit (a INT)"));
}

proptest! {
    /// A word that is not a keyword in a mode works as an unquoted table name.
    #[test]
    fn non_keywords_are_plain_identifiers(word in "[a-z][a-z0-9_]{0,12}", oracle in any::<bool>()) {
        let mode = if oracle { ORA } else { MY };
        prop_assume!(classify(mode, &word).is_none());
        let sql = format!("SELECT x FROM {word}");
        prop_assert!(accepts(mode, &sql), "{sql}");
    }

    /// Reserved words are refused as unquoted table names, but quoting them works.
    #[test]
    fn reserved_words_need_quoting(oracle in any::<bool>(), pick in any::<prop::sample::Index>()) {
        let mode = if oracle { ORA } else { MY };
        let reserved: Vec<&str> = ["select", "from", "where", "order", "group", "union", "table"]
            .into_iter()
            .filter(|w| classify(mode, w) == Some(KeywordClass::Reserved))
            .collect();
        prop_assume!(!reserved.is_empty());
        let word = reserved[pick.index(reserved.len())];
        let bare = format!("SELECT x FROM {word}");
        prop_assert!(!accepts(mode, &bare), "{}", bare);
        let quoted = if oracle { format!("\"{word}\"") } else { format!("`{word}`") };
        let sql = format!("SELECT x FROM {quoted}");
        prop_assert!(accepts(mode, &sql), "{}", sql);
    }

    /// A word lexes to the same token kind wherever it appears in a statement.
    #[test]
    fn word_token_kind_ignores_context(word in "[a-z][a-z0-9_]{0,10}", oracle in any::<bool>()) {
        let mode = if oracle { ORA } else { MY };
        let expected = match Keyword::from_word(&word) {
            Some(kw) if classify(mode, &word).is_some() => TokenKind::Keyword(kw),
            _ => TokenKind::Ident,
        };
        let options = ParseOptions::for_dialect(mode);
        let contexts = [
            word.clone(),
            format!("SELECT {word}"),
            format!("SELECT a, {word} FROM t"),
            format!("SELECT a FROM t WHERE {word} = 1"),
            format!("SELECT ({word}) + 2"),
            format!("INSERT INTO t VALUES (1) /* c */ {word}"),
        ];
        for src in &contexts {
            let out = tokenize(src, grammar(mode), &options);
            let token = out.tokens.iter().find(|t| t.text == word);
            prop_assert!(token.is_some(), "{} not lexed as one token in {}", word, src);
            let kind = token.map(|t| t.kind);
            prop_assert_eq!(kind, Some(expected), "{} in {}", word, src);
        }
    }
}
