use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use obparse_parser::{grammar, parse_default, tokenize};
use obparse_types::{DialectMode, ParseOptions};

const MYSQL_STATEMENTS: &[&str] = &[
    "SELECT /*+ INDEX(o idx_created) */ o.id, o.total, c.name FROM orders o \
     JOIN customers c ON c.id = o.customer_id WHERE o.created_at >= '2024-01-01' \
     AND o.status IN ('paid', 'shipped') ORDER BY o.total DESC LIMIT 50",
    "INSERT INTO audit_log (actor, action, payload) VALUES ('svc', 'update', '{}'), ('svc', 'delete', '{}') \
     ON DUPLICATE KEY UPDATE action = VALUES(action)",
    "UPDATE inventory SET qty = qty - 1 WHERE sku = 'A-100' AND qty > 0",
    "CREATE TABLE IF NOT EXISTS events (id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY, \
     kind VARCHAR(32) NOT NULL, body JSON, created_at DATETIME DEFAULT CURRENT_TIMESTAMP, \
     KEY idx_kind (kind)) ENGINE = InnoDB DEFAULT CHARSET = utf8mb4",
    "SELECT kind, COUNT(*) AS n, AVG(LENGTH(body)) FROM events GROUP BY kind HAVING COUNT(*) > 10",
];

const ORACLE_STATEMENTS: &[&str] = &[
    "SELECT e.empno, e.ename, d.dname FROM emp e, dept d WHERE e.deptno = d.deptno(+) \
     AND e.sal BETWEEN 1000 AND 5000 ORDER BY e.ename FETCH FIRST 20 ROWS ONLY",
    "MERGE INTO bonuses b USING (SELECT empno, sal FROM emp WHERE deptno = 30) s ON (b.empno = s.empno) \
     WHEN MATCHED THEN UPDATE SET b.bonus = s.sal * 0.1 \
     WHEN NOT MATCHED THEN INSERT (empno, bonus) VALUES (s.empno, s.sal * 0.05)",
    "SELECT LPAD(' ', 2 * LEVEL) || ename FROM emp START WITH mgr IS NULL CONNECT BY PRIOR empno = mgr",
    "CREATE TABLE sales (id NUMBER(12) NOT NULL, sold DATE, amount NUMBER(10, 2), \
     CONSTRAINT pk_sales PRIMARY KEY (id)) PARTITION BY RANGE (sold) \
     (PARTITION p2023 VALUES LESS THAN (DATE '2024-01-01'), PARTITION pmax VALUES LESS THAN (MAXVALUE))",
];

fn batch(statements: &[&str], copies: usize) -> String {
    let mut out = String::new();
    for _ in 0..copies {
        for stmt in statements {
            out.push_str(stmt);
            out.push_str(";\n");
        }
    }
    out
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for (mode, statements) in [
        (DialectMode::MySqlCompatible, MYSQL_STATEMENTS),
        (DialectMode::OracleCompatible, ORACLE_STATEMENTS),
    ] {
        let source = batch(statements, 20);
        let options = ParseOptions::for_dialect(mode);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(mode.as_str()), &source, |b, src| {
            b.iter(|| tokenize(black_box(src), grammar(mode), &options));
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (mode, statements) in [
        (DialectMode::MySqlCompatible, MYSQL_STATEMENTS),
        (DialectMode::OracleCompatible, ORACLE_STATEMENTS),
    ] {
        for copies in [1usize, 20] {
            let source = batch(statements, copies);
            let out = parse_default(&source, mode).expect("within budgets");
            assert!(out.is_clean(), "{} batch does not parse: {:?}", mode.as_str(), out.errors);
            group.throughput(Throughput::Bytes(source.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(mode.as_str(), statements.len() * copies),
                &source,
                |b, src| {
                    b.iter(|| parse_default(black_box(src), mode));
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_parse);
criterion_main!(benches);
