//! Listener-table traversal over real parse trees.
//!
//! Every node is entered and exited exactly once, enters arrive in pre-order,
//! exits close the most recently opened node, and a stop request truncates the
//! walk without visiting anything further.

use std::collections::HashMap;

use obparse::{
    DialectMode, ListenerTable, ParseNode, RuleKind, Statement, WalkControl, WalkOutcome,
    parse_default,
};
use proptest::prelude::*;

// ─── Helpers ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Enter(RuleKind),
    Exit(RuleKind),
}

fn statements(mode: DialectMode, sql: &str) -> Vec<Statement> {
    let out = parse_default(sql, mode).unwrap();
    assert!(out.is_clean(), "{:?}", out.errors);
    out.statements
}

/// Record every wildcard enter and exit event of one walk.
fn record(stmt: &Statement) -> (WalkOutcome, Vec<Event>) {
    let mut table = ListenerTable::new()
        .on_enter_any(|n: &ParseNode, log: &mut Vec<Event>| {
            log.push(Event::Enter(n.kind()));
            WalkControl::Continue
        })
        .on_exit_any(|n: &ParseNode, log: &mut Vec<Event>| {
            log.push(Event::Exit(n.kind()));
            WalkControl::Continue
        });
    let mut log = Vec::new();
    let outcome = stmt.walk(&mut table, &mut log);
    (outcome, log)
}

const SAMPLES: &[(DialectMode, &str)] = &[
    (
        DialectMode::MySqlCompatible,
        "SELECT a, COUNT(*) FROM t JOIN u ON t.id = u.tid WHERE a BETWEEN 1 AND 9 GROUP BY a",
    ),
    (
        DialectMode::MySqlCompatible,
        "CREATE TABLE t (a INT PRIMARY KEY, b VARCHAR(10) NOT NULL DEFAULT 'x')",
    ),
    (
        DialectMode::OracleCompatible,
        "WITH r AS (SELECT a FROM t) SELECT a FROM r WHERE a IN (SELECT b FROM u)",
    ),
    (
        DialectMode::OracleCompatible,
        "UPDATE emp SET sal = sal * 1.1 WHERE deptno = 10",
    ),
];

// ─── Completeness and ordering ──────────────────────────────────────────

#[test]
fn each_node_is_entered_and_exited_once() {
    for &(mode, sql) in SAMPLES {
        for stmt in statements(mode, sql) {
            let (outcome, log) = record(&stmt);
            assert_eq!(outcome, WalkOutcome::Completed);
            let enters = log.iter().filter(|e| matches!(e, Event::Enter(_))).count();
            let exits = log.len() - enters;
            assert_eq!(enters, stmt.tree().node_count(), "{sql}");
            assert_eq!(exits, enters, "{sql}");
        }
    }
}

#[test]
fn enters_are_pre_order_and_exits_nest() {
    for &(mode, sql) in SAMPLES {
        for stmt in statements(mode, sql) {
            let (_, log) = record(&stmt);

            let enters: Vec<RuleKind> = log
                .iter()
                .filter_map(|e| match e {
                    Event::Enter(k) => Some(*k),
                    Event::Exit(_) => None,
                })
                .collect();
            assert_eq!(enters, stmt.rule_kinds(), "{sql}");

            let mut open = Vec::new();
            for event in &log {
                match *event {
                    Event::Enter(kind) => open.push(kind),
                    Event::Exit(kind) => assert_eq!(open.pop(), Some(kind), "{sql}"),
                }
            }
            assert!(open.is_empty());
            assert_eq!(log.first(), Some(&Event::Enter(RuleKind::Stmt)));
            assert_eq!(log.last(), Some(&Event::Exit(RuleKind::Stmt)));
        }
    }
}

#[test]
fn per_kind_callbacks_see_only_their_kind() {
    let stmt = &statements(
        DialectMode::MySqlCompatible,
        "SELECT a, b FROM t WHERE c = (SELECT d FROM u)",
    )[0];
    let mut table = ListenerTable::new()
        .on_enter(RuleKind::ColumnRef, |n, seen: &mut HashMap<RuleKind, usize>| {
            *seen.entry(n.kind()).or_default() += 1;
            WalkControl::Continue
        })
        .on_exit(RuleKind::SelectStmt, |n, seen: &mut HashMap<RuleKind, usize>| {
            *seen.entry(n.kind()).or_default() += 1;
            WalkControl::Continue
        });
    assert_eq!(table.registered(), 2);

    let mut seen = HashMap::new();
    assert_eq!(stmt.walk(&mut table, &mut seen), WalkOutcome::Completed);
    assert_eq!(seen.len(), 2);
    assert_eq!(
        seen[&RuleKind::ColumnRef],
        stmt.tree().find_all(RuleKind::ColumnRef).len()
    );
    assert_eq!(
        seen[&RuleKind::SelectStmt],
        stmt.tree().find_all(RuleKind::SelectStmt).len()
    );
}

#[test]
fn stop_truncates_the_walk() {
    let stmt = &statements(DialectMode::OracleCompatible, "SELECT a, b, c FROM t")[0];
    let mut table = ListenerTable::new().on_enter_any(|n: &ParseNode, visited: &mut usize| {
        *visited += 1;
        if n.kind() == RuleKind::ColumnRef {
            WalkControl::Stop
        } else {
            WalkControl::Continue
        }
    });
    let mut visited = 0;
    let outcome = stmt.walk(&mut table, &mut visited);
    assert!(outcome.is_truncated());

    let until_first_column = stmt
        .rule_kinds()
        .iter()
        .position(|k| *k == RuleKind::ColumnRef)
        .unwrap()
        + 1;
    assert_eq!(visited, until_first_column);
}

#[test]
fn token_hook_sees_every_token_in_source_order() {
    let sql = "DELETE FROM t WHERE a >= 10";
    let stmt = &statements(DialectMode::MySqlCompatible, sql)[0];
    let mut table = ListenerTable::new().on_token(|tok, texts: &mut Vec<String>| {
        texts.push(tok.text.clone());
        WalkControl::Continue
    });
    let mut texts = Vec::new();
    stmt.walk(&mut table, &mut texts);
    assert_eq!(texts, vec!["DELETE", "FROM", "t", "WHERE", "a", ">=", "10"]);
}

#[test]
fn trees_are_shared_across_threads() {
    let stmts = statements(
        DialectMode::MySqlCompatible,
        "SELECT a FROM t; INSERT INTO t VALUES (1); DROP TABLE t",
    );
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    stmts
                        .iter()
                        .map(|s| record(s).1.len())
                        .collect::<Vec<usize>>()
                })
            })
            .collect();
        let expected: Vec<usize> = stmts.iter().map(|s| 2 * s.tree().node_count()).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

// ─── Generated expressions ──────────────────────────────────────────────

/// Column names with a fixed prefix never collide with a keyword.
fn arb_column() -> BoxedStrategy<String> {
    "[a-z]{1,5}".prop_map(|s| format!("c_{s}")).boxed()
}

fn arb_operand() -> BoxedStrategy<String> {
    prop_oneof![
        (0u32..10_000).prop_map(|n| n.to_string()),
        arb_column().prop_map(|s| format!("'{s}'")),
        arb_column(),
        (arb_column(), arb_column()).prop_map(|(t, c)| format!("{t}.{c}")),
    ]
    .boxed()
}

fn arb_expr(depth: u32) -> BoxedStrategy<String> {
    if depth == 0 {
        return arb_operand();
    }
    prop_oneof![
        3 => arb_operand(),
        2 => (
            arb_expr(depth - 1),
            prop_oneof![Just("+"), Just("*"), Just("="), Just("<"), Just("AND"), Just("OR")],
            arb_expr(depth - 1),
        )
            .prop_map(|(l, op, r)| format!("({l} {op} {r})")),
        1 => arb_expr(depth - 1).prop_map(|e| format!("(NOT {e})")),
        1 => (arb_expr(depth - 1), arb_operand(), arb_operand())
            .prop_map(|(e, lo, hi)| format!("({e} BETWEEN {lo} AND {hi})")),
        1 => (arb_column(), proptest::collection::vec(arb_expr(depth - 1), 0..3))
            .prop_map(|(f, args)| format!("{f}({})", args.join(", "))),
        1 => arb_expr(depth - 1).prop_map(|e| format!("CASE WHEN {e} THEN 1 ELSE 0 END")),
    ]
    .boxed()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Completeness holds for any expression shape, not only the fixed samples.
    #[test]
    fn generated_trees_are_walked_completely(expr in arb_expr(3), oracle in any::<bool>()) {
        let mode = if oracle { DialectMode::OracleCompatible } else { DialectMode::MySqlCompatible };
        let sql = format!("SELECT {expr} FROM t WHERE {expr}");
        let out = parse_default(&sql, mode).unwrap();
        prop_assert!(out.is_clean(), "{}: {:?}", sql, out.errors);
        prop_assert_eq!(out.statements.len(), 1);

        let stmt = &out.statements[0];
        let (outcome, log) = record(stmt);
        prop_assert_eq!(outcome, WalkOutcome::Completed);
        let mut open = Vec::new();
        for event in &log {
            match *event {
                Event::Enter(kind) => open.push(kind),
                Event::Exit(kind) => prop_assert_eq!(open.pop(), Some(kind), "{}", sql),
            }
        }
        prop_assert!(open.is_empty(), "{}", sql);
        prop_assert_eq!(log.len(), 2 * stmt.tree().node_count(), "{}", sql);
    }
}
