//! Parser observability counters.
//!
//! Process-local totals updated with relaxed atomics, read through
//! `parse_metrics_snapshot` and cleared with `reset_parse_metrics`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Diagnostic categories counted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    HintWarning,
    ResourceLimit,
}

impl DiagnosticKind {
    /// Stable label used in logs and metrics dimensions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Syntax => "syntax",
            Self::HintWarning => "hint_warning",
            Self::ResourceLimit => "resource_limit",
        }
    }
}

/// Upper bounds, in microseconds, of the parse-duration histogram buckets.
/// A final implicit bucket catches everything slower.
pub const PARSE_DURATION_BUCKETS_US: [u64; 8] = [10, 50, 100, 500, 1_000, 5_000, 10_000, 100_000];

const BUCKETS: usize = PARSE_DURATION_BUCKETS_US.len() + 1;

/// Parse-call latency distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseDurationHistogram {
    /// Per-bucket counts; index `i` counts calls at or under
    /// `PARSE_DURATION_BUCKETS_US[i]`, the last slot counts the rest.
    pub buckets: [u64; BUCKETS],
    pub count: u64,
    pub sum_us: u64,
}

/// Snapshot of parser observability metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseMetricsSnapshot {
    pub obparse_parse_calls_total: u64,
    pub obparse_tokens_total: u64,
    pub obparse_statements_total: u64,
    pub obparse_nodes_total: u64,
    pub obparse_lexical_errors_total: u64,
    pub obparse_syntax_errors_total: u64,
    pub obparse_hint_warnings_total: u64,
    pub obparse_resource_limit_aborts_total: u64,
    /// Speculative alternatives that were rolled back.
    pub obparse_speculation_rollbacks_total: u64,
    pub obparse_parse_duration: ParseDurationHistogram,
}

static PARSE_CALLS_TOTAL: AtomicU64 = AtomicU64::new(0);
static TOKENS_TOTAL: AtomicU64 = AtomicU64::new(0);
static STATEMENTS_TOTAL: AtomicU64 = AtomicU64::new(0);
static NODES_TOTAL: AtomicU64 = AtomicU64::new(0);
static LEXICAL_ERRORS_TOTAL: AtomicU64 = AtomicU64::new(0);
static SYNTAX_ERRORS_TOTAL: AtomicU64 = AtomicU64::new(0);
static HINT_WARNINGS_TOTAL: AtomicU64 = AtomicU64::new(0);
static RESOURCE_LIMIT_TOTAL: AtomicU64 = AtomicU64::new(0);
static SPECULATION_ROLLBACKS_TOTAL: AtomicU64 = AtomicU64::new(0);

static DURATION_BUCKETS: [AtomicU64; BUCKETS] = [const { AtomicU64::new(0) }; BUCKETS];
static DURATION_COUNT: AtomicU64 = AtomicU64::new(0);
static DURATION_SUM_US: AtomicU64 = AtomicU64::new(0);

fn to_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

pub(crate) fn record_tokens(n: usize) {
    TOKENS_TOTAL.fetch_add(to_u64(n), Ordering::Relaxed);
}

pub(crate) fn record_statement(nodes: usize) {
    STATEMENTS_TOTAL.fetch_add(1, Ordering::Relaxed);
    NODES_TOTAL.fetch_add(to_u64(nodes), Ordering::Relaxed);
}

pub(crate) fn record_diagnostic(kind: DiagnosticKind) {
    let counter = match kind {
        DiagnosticKind::Lexical => &LEXICAL_ERRORS_TOTAL,
        DiagnosticKind::Syntax => &SYNTAX_ERRORS_TOTAL,
        DiagnosticKind::HintWarning => &HINT_WARNINGS_TOTAL,
        DiagnosticKind::ResourceLimit => &RESOURCE_LIMIT_TOTAL,
    };
    counter.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_speculation_rollback() {
    SPECULATION_ROLLBACKS_TOTAL.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn record_parse_call(elapsed: Duration) {
    let us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
    let bucket = PARSE_DURATION_BUCKETS_US
        .iter()
        .position(|&bound| us <= bound)
        .unwrap_or(BUCKETS - 1);
    PARSE_CALLS_TOTAL.fetch_add(1, Ordering::Relaxed);
    DURATION_BUCKETS[bucket].fetch_add(1, Ordering::Relaxed);
    DURATION_COUNT.fetch_add(1, Ordering::Relaxed);
    DURATION_SUM_US.fetch_add(us, Ordering::Relaxed);
}

/// Read current parser metrics.
#[must_use]
pub fn parse_metrics_snapshot() -> ParseMetricsSnapshot {
    let mut buckets = [0; BUCKETS];
    for (slot, counter) in buckets.iter_mut().zip(&DURATION_BUCKETS) {
        *slot = counter.load(Ordering::Relaxed);
    }
    ParseMetricsSnapshot {
        obparse_parse_calls_total: PARSE_CALLS_TOTAL.load(Ordering::Relaxed),
        obparse_tokens_total: TOKENS_TOTAL.load(Ordering::Relaxed),
        obparse_statements_total: STATEMENTS_TOTAL.load(Ordering::Relaxed),
        obparse_nodes_total: NODES_TOTAL.load(Ordering::Relaxed),
        obparse_lexical_errors_total: LEXICAL_ERRORS_TOTAL.load(Ordering::Relaxed),
        obparse_syntax_errors_total: SYNTAX_ERRORS_TOTAL.load(Ordering::Relaxed),
        obparse_hint_warnings_total: HINT_WARNINGS_TOTAL.load(Ordering::Relaxed),
        obparse_resource_limit_aborts_total: RESOURCE_LIMIT_TOTAL.load(Ordering::Relaxed),
        obparse_speculation_rollbacks_total: SPECULATION_ROLLBACKS_TOTAL.load(Ordering::Relaxed),
        obparse_parse_duration: ParseDurationHistogram {
            buckets,
            count: DURATION_COUNT.load(Ordering::Relaxed),
            sum_us: DURATION_SUM_US.load(Ordering::Relaxed),
        },
    }
}

/// Reset parser metrics (tests/diagnostics).
pub fn reset_parse_metrics() {
    for counter in [
        &PARSE_CALLS_TOTAL,
        &TOKENS_TOTAL,
        &STATEMENTS_TOTAL,
        &NODES_TOTAL,
        &LEXICAL_ERRORS_TOTAL,
        &SYNTAX_ERRORS_TOTAL,
        &HINT_WARNINGS_TOTAL,
        &RESOURCE_LIMIT_TOTAL,
        &SPECULATION_ROLLBACKS_TOTAL,
        &DURATION_COUNT,
        &DURATION_SUM_US,
    ] {
        counter.store(0, Ordering::Relaxed);
    }
    for counter in &DURATION_BUCKETS {
        counter.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Counters are process-global and other tests parse concurrently, so
    // assertions here only rely on monotonic growth.

    #[test]
    fn diagnostic_labels_are_stable() {
        assert_eq!(DiagnosticKind::Lexical.as_str(), "lexical");
        assert_eq!(DiagnosticKind::ResourceLimit.as_str(), "resource_limit");
    }

    #[test]
    fn duration_lands_in_a_bucket() {
        let before = parse_metrics_snapshot();
        record_parse_call(Duration::from_micros(70));
        record_parse_call(Duration::from_secs(1));
        let after = parse_metrics_snapshot();
        assert!(after.obparse_parse_duration.count >= before.obparse_parse_duration.count + 2);
        assert!(after.obparse_parse_duration.buckets[2] > before.obparse_parse_duration.buckets[2]);
        assert!(
            after.obparse_parse_duration.buckets[BUCKETS - 1]
                > before.obparse_parse_duration.buckets[BUCKETS - 1]
        );
    }

    #[test]
    fn diagnostics_are_counted() {
        let before = parse_metrics_snapshot();
        record_diagnostic(DiagnosticKind::HintWarning);
        record_speculation_rollback();
        let after = parse_metrics_snapshot();
        assert!(after.obparse_hint_warnings_total > before.obparse_hint_warnings_total);
        assert!(
            after.obparse_speculation_rollbacks_total > before.obparse_speculation_rollbacks_total
        );
    }
}
