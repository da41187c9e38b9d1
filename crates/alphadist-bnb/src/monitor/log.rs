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

use crate::{
    blocking::BlockingState,
    monitor::tree_search_monitor::{
        Branch, PruneReason, SearchCommand, SearchTarget, TreeSearchMonitor,
    },
    stats::SearchStatistics,
};
use alphadist_model::index::VertexIndex;
use fixedbitset::FixedBitSet;
use std::time::{Duration, Instant};

/// Periodically reports search progress through `tracing`.
///
/// The clock is consulted only on nodes whose count matches `clock_check_mask`,
/// so the mask should be of the form 2^k - 1.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    target: Option<SearchTarget>,
    best_size: usize,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            target: None,
            best_size: 0,
        }
    }

    #[inline(always)]
    fn log_line(&mut self, blocking: &BlockingState, size: usize, stats: &SearchStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let goal = self.target.map_or(0, |t| t.goal);

        tracing::info!(
            elapsed_secs = elapsed,
            nodes = stats.nodes_explored,
            depth = stats.max_depth,
            size,
            free = blocking.free_count(),
            goal,
            best = self.best_size,
            pruned = stats.prunings(),
            "search progress"
        );

        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, target: &SearchTarget, _statistics: &SearchStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.target = Some(*target);
        self.best_size = target.goal.saturating_sub(1);
        tracing::debug!(%target, "search started");
    }

    fn search_command(
        &mut self,
        _blocking: &BlockingState,
        _statistics: &SearchStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }

    fn on_step(&mut self, blocking: &BlockingState, size: usize, stats: &SearchStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(blocking, size, stats);
        }
    }

    fn on_prune(
        &mut self,
        _blocking: &BlockingState,
        _reason: PruneReason,
        _statistics: &SearchStatistics,
    ) {
    }

    fn on_descend(
        &mut self,
        _blocking: &BlockingState,
        _vertex: VertexIndex,
        _branch: Branch,
        _statistics: &SearchStatistics,
    ) {
    }

    fn on_backtrack(&mut self, _blocking: &BlockingState, _statistics: &SearchStatistics) {}

    fn on_solution_found(&mut self, witness: &FixedBitSet, _statistics: &SearchStatistics) {
        self.best_size = witness.count_ones(..);
    }

    fn on_exit_search(&mut self, stats: &SearchStatistics) {
        tracing::debug!(
            nodes = stats.nodes_explored,
            best = self.best_size,
            elapsed = ?self.start_time.elapsed(),
            "search finished"
        );
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphadist_model::topology::Topology;

    #[test]
    fn test_tracks_best_size() {
        let mut m = LogMonitor::new(Duration::from_secs(60), 0);
        let stats = SearchStatistics::default();
        m.on_enter_search(
            &SearchTarget {
                topology: Topology::interval(),
                domain_len: 6,
                goal: 4,
            },
            &stats,
        );
        assert_eq!(m.best_size, 3);

        let mut w = FixedBitSet::with_capacity(6);
        w.insert_range(0..4);
        m.on_solution_found(&w, &stats);
        assert_eq!(m.best_size, 4);

        m.on_exit_search(&stats);
        assert!(m.target.is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            LogMonitor::default().to_string(),
            "LogMonitor(log_interval: 1s, clock_check_mask: 4095)"
        );
    }
}
