// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Incremental α engine
//!
//! `DistanceEngine` owns everything a sequence of queries shares: the interval
//! and cyclic bound tables, the blocking buffer, the full-cycle values α(Z_N)
//! and the wall-clock budget. Separate engines are fully independent.
//!
//! ## Queries
//!
//! `query_interval(n)` and `query_cyclic(modulus, n)` return α of the prefix
//! graph on [0, n). A query never searches for a value the tables already
//! know. Otherwise it completes the prefixes below `n` in ascending order,
//! since the search bounds rely on exact shorter prefixes. Each missing
//! prefix k is settled by one search:
//!
//! - tighten from k - 1: `lower[k] ≥ lower[k-1]`, `upper[k] ≤ upper[k-1] + 1`;
//! - set the goal to `lower[k] + 1`;
//! - select index k - 1 and search the rest for the goal.
//!
//! Selecting k - 1 up front is sound: α grows by at most one per index, and
//! any independent set exceeding α(k - 1) must contain k - 1.
//!
//! ## Budget
//!
//! The optional time limit is cumulative from engine creation. Once spent,
//! every query returns `Alpha::Inconclusive` without touching the tables.
//! A search that runs out of time leaves its entry unchanged, so the same
//! query may be retried by an engine with more time.
//!
//! ## Usage
//!
//! ```rust
//! use alphadist_bnb::engine::{DistanceEngine, EngineConfig};
//! use alphadist_bnb::result::Alpha;
//! use alphadist_model::generators::GeneratorSet;
//!
//! let generators = GeneratorSet::new(vec![1]).unwrap();
//! let mut engine = DistanceEngine::new(EngineConfig::new(generators, 16));
//!
//! let outcome = engine.query_interval(5).unwrap();
//! assert_eq!(outcome.alpha(), Alpha::Exact(3));
//!
//! let outcome = engine.query_cyclic(5, 5).unwrap();
//! assert_eq!(outcome.alpha(), Alpha::Exact(2));
//! assert_eq!(engine.cyclic_alpha(5), Some(2));
//! ```

use crate::{
    blocking::BlockingState,
    bnb::{SearchFlow, SearchSession},
    error::EngineError,
    monitor::{
        composite::CompositeTreeSearchMonitor, log::LogMonitor, no_op::NoOperationMonitor,
        time_limit::TimeLimitMonitor, tree_search_monitor::TreeSearchMonitor,
    },
    result::QueryOutcome,
    stats::SearchStatistics,
    tables::BoundTable,
};
use alphadist_model::{generators::GeneratorSet, index::VertexIndex, topology::Topology};
use fixedbitset::FixedBitSet;
use std::time::{Duration, Instant};

/// Nodes between progress-log clock reads.
const LOG_CLOCK_CHECK_MASK: u64 = 4095;

/// Configuration for a `DistanceEngine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    generators: GeneratorSet,
    capacity: usize,
    time_limit: Option<Duration>,
    clock_check_interval: u64,
    log_interval: Option<Duration>,
}

impl EngineConfig {
    /// Creates a configuration for domains and moduli of up to `capacity` indices.
    #[inline]
    pub fn new(generators: GeneratorSet, capacity: usize) -> Self {
        Self {
            generators,
            capacity,
            time_limit: None,
            clock_check_interval: 1,
            log_interval: None,
        }
    }

    /// Limits the total wall-clock time of the engine, counted from its creation.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Reads the clock every `interval` search nodes instead of at every node.
    #[inline]
    pub fn with_clock_check_interval(mut self, interval: u64) -> Self {
        self.clock_check_interval = interval.max(1);
        self
    }

    /// Emits a `tracing` progress line at most once per `interval` during long searches.
    #[inline]
    pub fn with_log_interval(mut self, interval: Duration) -> Self {
        self.log_interval = Some(interval);
        self
    }

    #[inline]
    pub fn generators(&self) -> &GeneratorSet {
        &self.generators
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn clock_check_interval(&self) -> u64 {
        self.clock_check_interval
    }

    #[inline]
    pub fn log_interval(&self) -> Option<Duration> {
        self.log_interval
    }
}

/// How a single prefix extension ended.
enum Extension {
    Exact {
        value: usize,
        witness: Option<FixedBitSet>,
    },
    Aborted(String),
}

/// Computes α for interval and cyclic distance graphs with memoized bounds.
#[derive(Debug)]
pub struct DistanceEngine {
    config: EngineConfig,
    interval: BoundTable,
    cyclic: BoundTable,
    cyclic_modulus: Option<usize>,
    cycle_alpha: Vec<Option<usize>>,
    blocking: BlockingState,
    created_at: Instant,
}

impl DistanceEngine {
    /// Allocates tables and the blocking buffer for the configured capacity.
    pub fn new(config: EngineConfig) -> Self {
        let capacity = config.capacity;
        tracing::debug!(
            generators = %config.generators,
            capacity,
            time_limit = ?config.time_limit,
            "distance engine initialized"
        );
        Self {
            interval: BoundTable::new(capacity),
            cyclic: BoundTable::new(capacity),
            cyclic_modulus: None,
            cycle_alpha: vec![None; capacity + 1],
            blocking: BlockingState::new(capacity, config.generators.clone()),
            created_at: Instant::now(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn generators(&self) -> &GeneratorSet {
        &self.config.generators
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Time since the engine was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Budget left, or `None` without a time limit.
    #[inline]
    pub fn remaining_time(&self) -> Option<Duration> {
        self.config
            .time_limit
            .map(|limit| limit.saturating_sub(self.elapsed()))
    }

    /// The modulus the cyclic tables currently describe.
    #[inline]
    pub fn cyclic_modulus(&self) -> Option<usize> {
        self.cyclic_modulus
    }

    /// Returns `(lower, upper)` on α(I_n), or `None` if `n` exceeds the capacity.
    #[inline]
    pub fn interval_bounds(&self, n: usize) -> Option<(usize, usize)> {
        (n <= self.capacity()).then(|| self.interval.bounds(n))
    }

    /// Returns `(lower, upper)` on α of the first `n` residues of the current modulus.
    #[inline]
    pub fn cyclic_bounds(&self, n: usize) -> Option<(usize, usize)> {
        (n <= self.capacity()).then(|| self.cyclic.bounds(n))
    }

    /// α(Z_modulus), once a query with `n == modulus` has proven it.
    #[inline]
    pub fn cyclic_alpha(&self, modulus: usize) -> Option<usize> {
        self.cycle_alpha.get(modulus).copied().flatten()
    }

    /// Returns α of the interval graph on {0, …, n-1}.
    pub fn query_interval(&mut self, n: usize) -> Result<QueryOutcome, EngineError> {
        self.query_interval_with_monitor(n, &mut NoOperationMonitor::new())
    }

    /// Like `query_interval`, reporting search events to `monitor`.
    pub fn query_interval_with_monitor<M>(
        &mut self,
        n: usize,
        monitor: &mut M,
    ) -> Result<QueryOutcome, EngineError>
    where
        M: TreeSearchMonitor + ?Sized,
    {
        self.check_domain(n)?;
        Ok(self.query(Topology::Interval, n, monitor))
    }

    /// Returns α of the cyclic graph on the first `n` residues of Z_modulus.
    ///
    /// Switching to a different modulus discards the cyclic tables.
    pub fn query_cyclic(&mut self, modulus: usize, n: usize) -> Result<QueryOutcome, EngineError> {
        self.query_cyclic_with_monitor(modulus, n, &mut NoOperationMonitor::new())
    }

    /// Like `query_cyclic`, reporting search events to `monitor`.
    pub fn query_cyclic_with_monitor<M>(
        &mut self,
        modulus: usize,
        n: usize,
        monitor: &mut M,
    ) -> Result<QueryOutcome, EngineError>
    where
        M: TreeSearchMonitor + ?Sized,
    {
        self.check_domain(n)?;
        if modulus > self.capacity() {
            return Err(EngineError::ModulusExceedsCapacity {
                modulus,
                capacity: self.capacity(),
            });
        }
        if n > modulus {
            return Err(EngineError::PrefixExceedsModulus { n, modulus });
        }
        Ok(self.query(Topology::cyclic(modulus), n, monitor))
    }

    /// Releases the engine. Equivalent to dropping it.
    pub fn shutdown(self) {
        tracing::debug!(elapsed = ?self.elapsed(), "distance engine shut down");
    }

    fn check_domain(&self, n: usize) -> Result<(), EngineError> {
        if n == 0 {
            return Err(EngineError::EmptyDomain);
        }
        if n > self.capacity() {
            return Err(EngineError::DomainExceedsCapacity {
                n,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    fn budget_exhausted(&self) -> Option<String> {
        let limit = self.config.time_limit?;
        (self.elapsed() >= limit).then(|| {
            format!(
                "time limit of {:.3} seconds exceeded",
                limit.as_secs_f64()
            )
        })
    }

    fn query<M>(&mut self, topology: Topology, n: usize, monitor: &mut M) -> QueryOutcome
    where
        M: TreeSearchMonitor + ?Sized,
    {
        if let Some(reason) = self.budget_exhausted() {
            tracing::debug!(%topology, n, %reason, "query skipped");
            return QueryOutcome::aborted(reason, SearchStatistics::default());
        }

        if let Topology::Cyclic { modulus } = topology {
            if self.cyclic_modulus != Some(modulus) {
                tracing::debug!(
                    previous = ?self.cyclic_modulus,
                    modulus,
                    "cyclic tables reset"
                );
                self.cyclic.reset_trivial();
                self.cyclic_modulus = Some(modulus);
            }
        }

        let table = match topology {
            Topology::Interval => &self.interval,
            Topology::Cyclic { .. } => &self.cyclic,
        };
        if let Some(value) = table.exact(n) {
            self.record_cycle_alpha(topology, n, value);
            tracing::debug!(%topology, n, alpha = value, "query answered from tables");
            return QueryOutcome::cached(value);
        }

        let mut composite = CompositeTreeSearchMonitor::with_capacity(3);
        if let Some(limit) = self.config.time_limit {
            composite.add_monitor(TimeLimitMonitor::until(
                self.created_at,
                limit,
                self.config.clock_check_interval,
            ));
        }
        if let Some(interval) = self.config.log_interval {
            composite.add_monitor(LogMonitor::new(interval, LOG_CLOCK_CHECK_MASK));
        }
        composite.add_monitor(monitor);

        let table = match topology {
            Topology::Interval => &mut self.interval,
            Topology::Cyclic { .. } => &mut self.cyclic,
        };

        let mut statistics = SearchStatistics::default();
        let mut outcome = None;
        for k in 2..=n {
            if table.is_exact(k) {
                continue;
            }
            match extend_prefix(
                table,
                &mut self.blocking,
                topology,
                k,
                &mut composite,
                &mut statistics,
            ) {
                Extension::Exact { value, witness } => {
                    if k == n {
                        outcome = Some((value, witness));
                    }
                }
                Extension::Aborted(reason) => {
                    tracing::debug!(
                        %topology,
                        n,
                        prefix = k,
                        %reason,
                        nodes = statistics.nodes_explored,
                        "query inconclusive"
                    );
                    return QueryOutcome::aborted(reason, statistics);
                }
            }
        }

        // The loop settles entry n unless it was already exact.
        let (value, witness) = match outcome {
            Some(found) => found,
            None => (table.lower(n), None),
        };
        self.record_cycle_alpha(topology, n, value);
        tracing::debug!(
            %topology,
            n,
            alpha = value,
            nodes = statistics.nodes_explored,
            searches = statistics.searches,
            "query answered"
        );
        QueryOutcome::proven(value, witness, statistics)
    }

    fn record_cycle_alpha(&mut self, topology: Topology, n: usize, value: usize) {
        if let Topology::Cyclic { modulus } = topology {
            if n == modulus {
                self.cycle_alpha[modulus] = Some(value);
            }
        }
    }
}

/// Settles entry `k` of `table`, assuming entries below `k` are exact.
///
/// Entry `k` is written only when its value is proven.
fn extend_prefix<M>(
    table: &mut BoundTable,
    blocking: &mut BlockingState,
    topology: Topology,
    k: usize,
    monitor: &mut M,
    statistics: &mut SearchStatistics,
) -> Extension
where
    M: TreeSearchMonitor + ?Sized,
{
    let (best, upper) = table.tightened(k);
    if best == upper {
        table.set_exact(k, best);
        return Extension::Exact {
            value: best,
            witness: None,
        };
    }

    blocking.reset(k, topology);

    let report = {
        let mut guard = blocking.select_scoped(VertexIndex::new(k - 1));
        SearchSession::new(table, monitor, best, best + 1).run(&mut guard, 1)
    };
    statistics.merge(&report.statistics);

    match report.flow {
        SearchFlow::Aborted(reason) => Extension::Aborted(reason),
        SearchFlow::Exhausted | SearchFlow::GoalReached => {
            table.set_exact(k, report.best);
            Extension::Exact {
                value: report.best,
                witness: report.witness,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Alpha, TerminationReason};

    fn engine(gens: &[usize], capacity: usize) -> DistanceEngine {
        DistanceEngine::new(EngineConfig::new(
            GeneratorSet::new(gens.to_vec()).unwrap(),
            capacity,
        ))
    }

    #[test]
    fn test_config_builder() {
        let c = EngineConfig::new(GeneratorSet::new(vec![1, 4]).unwrap(), 32)
            .with_time_limit(Duration::from_secs(2))
            .with_clock_check_interval(0)
            .with_log_interval(Duration::from_millis(500));
        assert_eq!(c.capacity(), 32);
        assert_eq!(c.time_limit(), Some(Duration::from_secs(2)));
        assert_eq!(c.clock_check_interval(), 1);
        assert_eq!(c.log_interval(), Some(Duration::from_millis(500)));
        assert_eq!(c.generators().as_slice(), &[1, 4]);
    }

    #[test]
    fn test_invalid_requests_are_rejected() {
        let mut e = engine(&[1], 8);
        assert_eq!(e.query_interval(0), Err(EngineError::EmptyDomain));
        assert_eq!(
            e.query_interval(9),
            Err(EngineError::DomainExceedsCapacity { n: 9, capacity: 8 })
        );
        assert_eq!(
            e.query_cyclic(9, 3),
            Err(EngineError::ModulusExceedsCapacity {
                modulus: 9,
                capacity: 8
            })
        );
        assert_eq!(
            e.query_cyclic(4, 5),
            Err(EngineError::PrefixExceedsModulus { n: 5, modulus: 4 })
        );
        assert_eq!(
            e.query_cyclic(0, 1),
            Err(EngineError::PrefixExceedsModulus { n: 1, modulus: 0 })
        );
    }

    #[test]
    fn test_single_index_is_cached() {
        let mut e = engine(&[1], 4);
        let o = e.query_interval(1).unwrap();
        assert_eq!(o.alpha(), Alpha::Exact(1));
        assert!(o.is_cached());
    }

    #[test]
    fn test_prefix_completion_fills_shorter_entries() {
        let mut e = engine(&[1], 10);
        let o = e.query_interval(7).unwrap();
        assert_eq!(o.value(), Some(4));
        assert_eq!(o.termination_reason(), &TerminationReason::Proven);
        for k in 1..=7 {
            let (lo, hi) = e.interval_bounds(k).unwrap();
            assert_eq!(lo, hi);
            assert_eq!(lo, k.div_ceil(2));
        }
        assert_eq!(e.interval_bounds(8), Some((1, 8)));
        assert_eq!(e.interval_bounds(11), None);
    }

    #[test]
    fn test_cyclic_modulus_switch_resets_tables() {
        let mut e = engine(&[1], 10);
        assert_eq!(e.query_cyclic(6, 6).unwrap().value(), Some(3));
        assert_eq!(e.cyclic_modulus(), Some(6));
        assert_eq!(e.cyclic_alpha(6), Some(3));
        assert_eq!(e.query_cyclic(7, 4).unwrap().value(), Some(2));
        assert_eq!(e.cyclic_modulus(), Some(7));
        assert_eq!(e.cyclic_bounds(6), Some((1, 6)));
        // Full-cycle values survive the reset.
        assert_eq!(e.cyclic_alpha(6), Some(3));
        assert_eq!(e.cyclic_alpha(7), None);
    }

    #[test]
    fn test_zero_budget_leaves_tables_untouched() {
        let mut e = DistanceEngine::new(
            EngineConfig::new(GeneratorSet::new(vec![1]).unwrap(), 8)
                .with_time_limit(Duration::ZERO),
        );
        let o = e.query_interval(5).unwrap();
        assert_eq!(o.alpha(), Alpha::Inconclusive);
        assert!(matches!(
            o.termination_reason(),
            TerminationReason::Aborted(_)
        ));
        let o = e.query_cyclic(5, 5).unwrap();
        assert_eq!(o.alpha(), Alpha::Inconclusive);
        assert_eq!(e.cyclic_modulus(), None);
        for k in 0..=8 {
            assert_eq!(e.interval_bounds(k), Some((k.min(1), k)));
        }
        assert_eq!(e.remaining_time(), Some(Duration::ZERO));
    }

    #[test]
    fn test_shutdown_consumes_engine() {
        let mut e = engine(&[2, 3], 6);
        e.query_interval(6).unwrap();
        e.shutdown();
    }
}
