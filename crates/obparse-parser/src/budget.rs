//! Caller-configured parse budgets.
//!
//! The node budget is cumulative over the whole call, including nodes built
//! by speculative alternatives that were later discarded, so rollback cannot
//! be used to dodge it. The deadline is polled every `DEADLINE_POLL_INTERVAL`
//! nodes and at every statement boundary.

use std::time::{Duration, Instant};

use obparse_error::ResourceLimit;
use obparse_types::ParseOptions;

pub(crate) const DEADLINE_POLL_INTERVAL: u64 = 64;

/// Which budget ran out, and its configured bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Exhausted {
    pub(crate) limit: ResourceLimit,
    pub(crate) limit_value: u64,
}

#[derive(Debug)]
pub(crate) struct Budget {
    max_nodes: u64,
    max_depth: usize,
    deadline: Option<(Instant, Duration)>,
    nodes: u64,
}

impl Budget {
    pub(crate) fn new(options: &ParseOptions, started: Instant) -> Self {
        Self {
            max_nodes: u64::try_from(options.max_parse_nodes).unwrap_or(u64::MAX),
            max_depth: options.max_recursion_depth,
            deadline: options.timeout().map(|t| (started + t, t)),
            nodes: 0,
        }
    }

    pub(crate) const fn nodes(&self) -> u64 {
        self.nodes
    }

    pub(crate) fn charge_node(&mut self) -> Result<(), Exhausted> {
        self.nodes += 1;
        if self.nodes > self.max_nodes {
            return Err(Exhausted {
                limit: ResourceLimit::NodeCount,
                limit_value: self.max_nodes,
            });
        }
        if self.nodes % DEADLINE_POLL_INTERVAL == 0 {
            self.check_deadline()?;
        }
        Ok(())
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), Exhausted> {
        if depth > self.max_depth {
            return Err(Exhausted {
                limit: ResourceLimit::RecursionDepth,
                limit_value: u64::try_from(self.max_depth).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }

    pub(crate) fn check_deadline(&self) -> Result<(), Exhausted> {
        match self.deadline {
            Some((at, timeout)) if Instant::now() >= at => Err(Exhausted {
                limit: ResourceLimit::Deadline,
                limit_value: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use obparse_types::DialectMode;

    use super::*;

    fn options() -> ParseOptions {
        ParseOptions::for_dialect(DialectMode::MySqlCompatible)
    }

    #[test]
    fn node_budget_trips_after_limit() {
        let mut opts = options();
        opts.max_parse_nodes = 3;
        let mut budget = Budget::new(&opts, Instant::now());
        for _ in 0..3 {
            budget.charge_node().unwrap();
        }
        let err = budget.charge_node().unwrap_err();
        assert_eq!(err.limit, ResourceLimit::NodeCount);
        assert_eq!(err.limit_value, 3);
        assert_eq!(budget.nodes(), 4);
    }

    #[test]
    fn depth_limit_is_inclusive() {
        let budget = Budget::new(&options(), Instant::now());
        assert!(budget.check_depth(256).is_ok());
        assert_eq!(
            budget.check_depth(257).unwrap_err().limit,
            ResourceLimit::RecursionDepth
        );
    }

    #[test]
    fn expired_deadline_is_reported() {
        let mut opts = options();
        opts.timeout_ms = Some(0);
        let budget = Budget::new(&opts, Instant::now());
        let err = budget.check_deadline().unwrap_err();
        assert_eq!(err.limit, ResourceLimit::Deadline);
        assert_eq!(err.limit_value, 0);
    }

    #[test]
    fn no_timeout_never_expires() {
        let budget = Budget::new(&options(), Instant::now());
        assert!(budget.check_deadline().is_ok());
    }
}
