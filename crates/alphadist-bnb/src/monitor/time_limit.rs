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

//! Wall-clock limits for the search
//!
//! `TimeLimitMonitor` terminates the search once a deadline has passed. The
//! deadline is either fixed up front (`until`), which is how the engine
//! enforces its cumulative budget across all queries, or measured from the
//! start of each search (`new`).
//!
//! The clock is read every `check_interval` nodes; an interval of 1 checks
//! at every node.

use crate::{
    blocking::BlockingState,
    monitor::tree_search_monitor::{
        Branch, PruneReason, SearchCommand, SearchTarget, TreeSearchMonitor,
    },
    stats::SearchStatistics,
};
use alphadist_core::num::ops::saturating_arithmetic::SaturatingAddVal;
use alphadist_model::index::VertexIndex;
use fixedbitset::FixedBitSet;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deadline {
    /// Measured from `on_enter_search`.
    PerSearch { limit: Duration, started: Option<Instant> },
    /// A fixed point in time; `None` if it lies beyond what `Instant` can represent.
    Fixed { at: Option<Instant>, limit: Duration },
}

/// A monitor that terminates the search after a specified duration.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor {
    deadline: Deadline,
    check_interval: u64,
    ops_since_last_check: u64,
}

impl TimeLimitMonitor {
    /// Creates a monitor that allows each search `limit` of wall-clock time.
    ///
    /// `check_interval` is the number of nodes between clock reads; a value
    /// of 0 is treated as 1.
    pub fn new(limit: Duration, check_interval: u64) -> Self {
        Self {
            deadline: Deadline::PerSearch {
                limit,
                started: None,
            },
            check_interval: check_interval.max(1),
            ops_since_last_check: 0,
        }
    }

    /// Creates a monitor that terminates any search once `started + limit` has passed.
    pub fn until(started: Instant, limit: Duration, check_interval: u64) -> Self {
        Self {
            deadline: Deadline::Fixed {
                at: started.checked_add(limit),
                limit,
            },
            check_interval: check_interval.max(1),
            ops_since_last_check: 0,
        }
    }

    /// Creates a per-search monitor that reads the clock at every node.
    pub fn with_default_check_interval(limit: Duration) -> Self {
        Self::new(limit, 1)
    }

    #[inline]
    pub fn check_interval(&self) -> u64 {
        self.check_interval
    }

    fn limit(&self) -> Duration {
        match self.deadline {
            Deadline::PerSearch { limit, .. } | Deadline::Fixed { limit, .. } => limit,
        }
    }

    fn expired(&self, now: Instant) -> bool {
        match self.deadline {
            Deadline::PerSearch {
                limit,
                started: Some(started),
            } => now.duration_since(started) >= limit,
            Deadline::PerSearch { started: None, .. } => false,
            Deadline::Fixed { at: Some(at), .. } => now >= at,
            Deadline::Fixed { at: None, .. } => false,
        }
    }
}

impl TreeSearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _target: &SearchTarget, _statistics: &SearchStatistics) {
        if let Deadline::PerSearch { started, .. } = &mut self.deadline {
            *started = Some(Instant::now());
        }
        self.ops_since_last_check = 0;
    }

    fn on_exit_search(&mut self, _statistics: &SearchStatistics) {
        if let Deadline::PerSearch { started, .. } = &mut self.deadline {
            *started = None;
        }
    }

    fn search_command(
        &mut self,
        _blocking: &BlockingState,
        _statistics: &SearchStatistics,
    ) -> SearchCommand {
        self.ops_since_last_check = self.ops_since_last_check.saturating_add_val(1);

        if self.ops_since_last_check >= self.check_interval {
            self.ops_since_last_check = 0;

            if self.expired(Instant::now()) {
                return SearchCommand::Terminate(format!(
                    "time limit of {:.3} seconds exceeded",
                    self.limit().as_secs_f64()
                ));
            }
        }

        SearchCommand::Continue
    }

    fn on_step(&mut self, _blocking: &BlockingState, _size: usize, _statistics: &SearchStatistics) {
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
    fn on_solution_found(&mut self, _witness: &FixedBitSet, _statistics: &SearchStatistics) {}
}
