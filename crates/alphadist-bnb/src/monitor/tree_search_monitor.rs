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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait together with `SearchCommand`,
//! `PruneReason` and `Branch` for observing and controlling the
//! branch-and-bound search. A monitor can stop the search by returning
//! `SearchCommand::Terminate` from `search_command`; the recursion then
//! unwinds and the query reports an inconclusive answer.
//!
//! Lifecycle
//! - enter → {step → prune | descend/backtrack} → solution → exit
//! - `SearchStatistics` is provided to every callback.
//!
//! Methods take `&mut self`; monitors are single-threaded.

use crate::{blocking::BlockingState, stats::SearchStatistics};
use alphadist_model::{index::VertexIndex, topology::Topology};
use fixedbitset::FixedBitSet;

/// The command returned by a monitor to steer the search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for pruning a search node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PruneReason {
    /// Selected plus free indices fall short of the goal.
    RemainingCount,
    /// The memoized α of the prefix below the branching index falls short.
    TableBound,
    /// The interval decomposition estimate falls short.
    Decomposition,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::RemainingCount => write!(f, "RemainingCount"),
            PruneReason::TableBound => write!(f, "TableBound"),
            PruneReason::Decomposition => write!(f, "Decomposition"),
        }
    }
}

/// The two children of a search node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Branch {
    /// The branching index joins the independent set.
    Select,
    /// The branching index is left out.
    Skip,
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Branch::Select => write!(f, "Select"),
            Branch::Skip => write!(f, "Skip"),
        }
    }
}

/// What a single top-level search is trying to establish.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SearchTarget {
    /// The topology of the searched graph.
    pub topology: Topology,
    /// The prefix length n of the domain [0, n).
    pub domain_len: usize,
    /// The independent set size that would improve on α(n - 1).
    pub goal: usize,
}

impl std::fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchTarget(topology: {}, n: {}, goal: {})",
            self.topology, self.domain_len, self.goal
        )
    }
}

/// Trait for monitoring and controlling the search process.
pub trait TreeSearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when a top-level search starts.
    fn on_enter_search(&mut self, target: &SearchTarget, statistics: &SearchStatistics);
    /// Called when a top-level search ends, however it ends.
    fn on_exit_search(&mut self, statistics: &SearchStatistics);
    /// Called at every node to determine whether the search continues.
    fn search_command(
        &mut self,
        _blocking: &BlockingState,
        _statistics: &SearchStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called at every node with the size of the current partial set.
    fn on_step(&mut self, blocking: &BlockingState, size: usize, statistics: &SearchStatistics);
    /// Called when a node is pruned.
    fn on_prune(
        &mut self,
        blocking: &BlockingState,
        reason: PruneReason,
        statistics: &SearchStatistics,
    );
    /// Called before descending into a child.
    fn on_descend(
        &mut self,
        blocking: &BlockingState,
        vertex: VertexIndex,
        branch: Branch,
        statistics: &SearchStatistics,
    );
    /// Called when the select branch is exhausted and the search moves on.
    fn on_backtrack(&mut self, blocking: &BlockingState, statistics: &SearchStatistics);
    /// Called when an improving independent set is found.
    fn on_solution_found(&mut self, witness: &FixedBitSet, statistics: &SearchStatistics);
}

impl<M> TreeSearchMonitor for &mut M
where
    M: TreeSearchMonitor + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, target: &SearchTarget, statistics: &SearchStatistics) {
        (**self).on_enter_search(target, statistics)
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        (**self).on_exit_search(statistics)
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        blocking: &BlockingState,
        statistics: &SearchStatistics,
    ) -> SearchCommand {
        (**self).search_command(blocking, statistics)
    }

    #[inline(always)]
    fn on_step(&mut self, blocking: &BlockingState, size: usize, statistics: &SearchStatistics) {
        (**self).on_step(blocking, size, statistics)
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        blocking: &BlockingState,
        reason: PruneReason,
        statistics: &SearchStatistics,
    ) {
        (**self).on_prune(blocking, reason, statistics)
    }

    #[inline(always)]
    fn on_descend(
        &mut self,
        blocking: &BlockingState,
        vertex: VertexIndex,
        branch: Branch,
        statistics: &SearchStatistics,
    ) {
        (**self).on_descend(blocking, vertex, branch, statistics)
    }

    #[inline(always)]
    fn on_backtrack(&mut self, blocking: &BlockingState, statistics: &SearchStatistics) {
        (**self).on_backtrack(blocking, statistics)
    }

    #[inline(always)]
    fn on_solution_found(&mut self, witness: &FixedBitSet, statistics: &SearchStatistics) {
        (**self).on_solution_found(witness, statistics)
    }
}

impl std::fmt::Debug for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn TreeSearchMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
