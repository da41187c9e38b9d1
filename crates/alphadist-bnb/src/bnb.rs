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

//! Branch-and-bound decision procedure
//!
//! Given a blocking state whose highest index has already been selected, a
//! bound table that is exact for every shorter prefix, and a goal, the search
//! decides whether an independent set of `goal` indices exists. It branches on
//! the numerically largest free index, trying "select" before "skip", and
//! prunes a node when one of three bounds shows the goal to be out of reach:
//!
//! 1. remaining count: `size + free < goal`;
//! 2. memoized prefix: `size + α(m + 1) < goal` for the branching index m;
//! 3. interval decomposition: `size + estimate(m + 1) < goal`.
//!
//! Termination requested by a monitor travels up the recursion as
//! `SearchFlow::Aborted`; the blocking guards restore the state on the way.

use crate::{
    blocking::BlockingState,
    estimate::estimate_upper_bound,
    monitor::tree_search_monitor::{
        Branch, PruneReason, SearchCommand, SearchTarget, TreeSearchMonitor,
    },
    stats::SearchStatistics,
    tables::BoundTable,
};
use fixedbitset::FixedBitSet;

/// How a (sub)search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFlow {
    /// The subtree was fully explored without reaching the goal.
    Exhausted,
    /// An independent set of the goal size was found.
    GoalReached,
    /// A monitor stopped the search.
    Aborted(String),
}

/// The result of one top-level search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// `Exhausted` or `GoalReached` if the search completed.
    pub flow: SearchFlow,
    /// The largest independent set size seen, at least the initial best.
    pub best: usize,
    /// The selected indices when the goal was reached.
    pub witness: Option<FixedBitSet>,
    pub statistics: SearchStatistics,
}

/// A single top-level search over a prepared blocking state.
pub struct SearchSession<'a, M>
where
    M: TreeSearchMonitor + ?Sized,
{
    table: &'a BoundTable,
    monitor: &'a mut M,
    goal: usize,
    best: usize,
    witness: Option<FixedBitSet>,
    stats: SearchStatistics,
}

impl<M> std::fmt::Debug for SearchSession<'_, M>
where
    M: TreeSearchMonitor + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("monitor", &self.monitor.name())
            .field("goal", &self.goal)
            .field("best", &self.best)
            .field("witness", &self.witness)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, M> SearchSession<'a, M>
where
    M: TreeSearchMonitor + ?Sized,
{
    /// Creates a session that tries to improve on `initial_best` by reaching `goal`.
    pub fn new(
        table: &'a BoundTable,
        monitor: &'a mut M,
        initial_best: usize,
        goal: usize,
    ) -> Self {
        Self {
            table,
            monitor,
            goal,
            best: initial_best,
            witness: None,
            stats: SearchStatistics::default(),
        }
    }

    /// Runs the search from a state where `size` indices are already selected.
    pub fn run(mut self, blocking: &mut BlockingState, size: usize) -> SearchReport {
        let target = SearchTarget {
            topology: blocking.topology(),
            domain_len: blocking.domain_len(),
            goal: self.goal,
        };
        let start = std::time::Instant::now();
        self.stats.on_search_started();
        self.monitor.on_enter_search(&target, &self.stats);

        let flow = self.search(blocking, size, size as u64);

        self.stats.add_time(start.elapsed());
        self.monitor.on_exit_search(&self.stats);

        SearchReport {
            flow,
            best: self.best,
            witness: self.witness,
            statistics: self.stats,
        }
    }

    fn search(&mut self, blocking: &mut BlockingState, size: usize, depth: u64) -> SearchFlow {
        self.stats.on_node_explored();
        self.stats.on_depth_update(depth);
        self.monitor.on_step(blocking, size, &self.stats);

        if let SearchCommand::Terminate(msg) = self.monitor.search_command(blocking, &self.stats) {
            return SearchFlow::Aborted(msg);
        }

        let free = blocking.free_count();
        if free == 0 {
            return self.on_maximal(blocking, size);
        }

        if size + free < self.goal {
            return self.prune(blocking, PruneReason::RemainingCount);
        }

        let Some(m) = blocking.highest_free() else {
            return self.on_maximal(blocking, size);
        };
        let prefix_len = m.get() + 1;

        if size + self.table.lower(prefix_len) < self.goal {
            return self.prune(blocking, PruneReason::TableBound);
        }

        if size + estimate_upper_bound(blocking, self.table, prefix_len) < self.goal {
            return self.prune(blocking, PruneReason::Decomposition);
        }

        self.monitor.on_descend(blocking, m, Branch::Select, &self.stats);
        {
            let mut guard = blocking.select_scoped(m);
            let flow = self.search(&mut guard, size + 1, depth + 1);
            if flow != SearchFlow::Exhausted {
                return flow;
            }
        }

        self.stats.on_backtrack();
        self.monitor.on_backtrack(blocking, &self.stats);

        self.monitor.on_descend(blocking, m, Branch::Skip, &self.stats);
        let mut guard = blocking.skip_scoped(m);
        self.search(&mut guard, size, depth + 1)
    }

    #[inline]
    fn prune(&mut self, blocking: &BlockingState, reason: PruneReason) -> SearchFlow {
        self.stats.on_prune(reason);
        self.monitor.on_prune(blocking, reason, &self.stats);
        SearchFlow::Exhausted
    }

    fn on_maximal(&mut self, blocking: &BlockingState, size: usize) -> SearchFlow {
        if size > self.best {
            self.best = size;
        }
        if size < self.goal {
            return SearchFlow::Exhausted;
        }

        let witness = blocking.selected();
        tracing::trace!(size, goal = self.goal, %blocking, "improving independent set");
        self.stats.on_solution_found();
        self.monitor.on_solution_found(&witness, &self.stats);
        self.witness = Some(witness);
        SearchFlow::GoalReached
    }
}
