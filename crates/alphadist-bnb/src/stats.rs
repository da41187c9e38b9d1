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

use crate::monitor::tree_search_monitor::PruneReason;
use alphadist_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use std::time::Duration;

/// Statistics collected while answering a query.
///
/// A single query may run several searches (one per completed prefix); the
/// counters are summed over all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Total nodes visited.
    pub nodes_explored: u64,
    /// Total returns from an exhausted select branch into its skip branch.
    pub backtracks: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Pruned because the selected and free indices cannot reach the goal.
    pub prunings_remaining_count: u64,
    /// Pruned by the memoized α of the prefix below the branching index.
    pub prunings_table_bound: u64,
    /// Pruned by the interval decomposition estimate.
    pub prunings_decomposition: u64,
    /// Total improving independent sets found.
    pub solutions_found: u64,
    /// Number of top-level searches run.
    pub searches: u64,
    /// Total time spent searching.
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add_val(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add_val(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add_val(1);
    }

    #[inline]
    pub fn on_search_started(&mut self) {
        self.searches = self.searches.saturating_add_val(1);
    }

    #[inline]
    pub fn on_prune(&mut self, reason: PruneReason) {
        let counter = match reason {
            PruneReason::RemainingCount => &mut self.prunings_remaining_count,
            PruneReason::TableBound => &mut self.prunings_table_bound,
            PruneReason::Decomposition => &mut self.prunings_decomposition,
        };
        *counter = counter.saturating_add_val(1);
    }

    /// Total prunings over all reasons.
    #[inline]
    pub fn prunings(&self) -> u64 {
        self.prunings_remaining_count
            .saturating_add_val(self.prunings_table_bound)
            .saturating_add_val(self.prunings_decomposition)
    }

    #[inline]
    pub fn add_time(&mut self, duration: Duration) {
        self.time_total = self.time_total.saturating_add(duration);
    }

    /// Adds the counters of `other` to `self`.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.nodes_explored = self.nodes_explored.saturating_add_val(other.nodes_explored);
        self.backtracks = self.backtracks.saturating_add_val(other.backtracks);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.prunings_remaining_count = self
            .prunings_remaining_count
            .saturating_add_val(other.prunings_remaining_count);
        self.prunings_table_bound = self
            .prunings_table_bound
            .saturating_add_val(other.prunings_table_bound);
        self.prunings_decomposition = self
            .prunings_decomposition
            .saturating_add_val(other.prunings_decomposition);
        self.solutions_found = self.solutions_found.saturating_add_val(other.solutions_found);
        self.searches = self.searches.saturating_add_val(other.searches);
        self.add_time(other.time_total);
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Alphadist Search Statistics:")?;
        writeln!(f, "  Searches:                 {}", self.searches)?;
        writeln!(f, "  Nodes explored:           {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:               {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:        {}", self.max_depth)?;
        writeln!(f, "  Prunings (remaining):     {}", self.prunings_remaining_count)?;
        writeln!(f, "  Prunings (table):         {}", self.prunings_table_bound)?;
        writeln!(f, "  Prunings (decomposition): {}", self.prunings_decomposition)?;
        writeln!(f, "  Solutions found:          {}", self.solutions_found)?;
        writeln!(f, "  Total time:               {:.2?}", self.time_total)?;
        Ok(())
    }
}
