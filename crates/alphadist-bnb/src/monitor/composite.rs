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

//! Monitoring combinators for tree search
//!
//! Provides `CompositeTreeSearchMonitor`, a fan-out monitor that forwards every
//! event to its children. The engine uses it to run its own time limit and
//! progress log alongside a caller-supplied monitor.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

use crate::{
    blocking::BlockingState,
    monitor::tree_search_monitor::{
        Branch, PruneReason, SearchCommand, SearchTarget, TreeSearchMonitor,
    },
    stats::SearchStatistics,
};
use alphadist_model::index::VertexIndex;
use fixedbitset::FixedBitSet;

/// A tree search monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeTreeSearchMonitor<'a> {
    monitors: Vec<Box<dyn TreeSearchMonitor + 'a>>,
}

impl Default for CompositeTreeSearchMonitor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CompositeTreeSearchMonitor<'a> {
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl std::fmt::Debug for CompositeTreeSearchMonitor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.monitors.iter()).finish()
    }
}

impl TreeSearchMonitor for CompositeTreeSearchMonitor<'_> {
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, target: &SearchTarget, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(target, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        blocking: &BlockingState,
        statistics: &SearchStatistics,
    ) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(blocking, statistics);
            if !matches!(cmd, SearchCommand::Continue) {
                return cmd;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_step(&mut self, blocking: &BlockingState, size: usize, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(blocking, size, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        blocking: &BlockingState,
        reason: PruneReason,
        statistics: &SearchStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_prune(blocking, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_descend(
        &mut self,
        blocking: &BlockingState,
        vertex: VertexIndex,
        branch: Branch,
        statistics: &SearchStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_descend(blocking, vertex, branch, statistics);
        }
    }

    #[inline(always)]
    fn on_backtrack(&mut self, blocking: &BlockingState, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_backtrack(blocking, statistics);
        }
    }

    #[inline(always)]
    fn on_solution_found(&mut self, witness: &FixedBitSet, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(witness, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;
    use alphadist_model::{generators::GeneratorSet, topology::Topology};

    #[derive(Default)]
    struct Counting {
        enters: usize,
        solutions: usize,
        commands: usize,
        stop: bool,
    }

    impl TreeSearchMonitor for Counting {
        fn name(&self) -> &str {
            "Counting"
        }
        fn on_enter_search(&mut self, _t: &SearchTarget, _s: &SearchStatistics) {
            self.enters += 1;
        }
        fn on_exit_search(&mut self, _s: &SearchStatistics) {}
        fn search_command(&mut self, _b: &BlockingState, _s: &SearchStatistics) -> SearchCommand {
            self.commands += 1;
            if self.stop {
                SearchCommand::Terminate("stop".into())
            } else {
                SearchCommand::Continue
            }
        }
        fn on_step(&mut self, _b: &BlockingState, _z: usize, _s: &SearchStatistics) {}
        fn on_prune(&mut self, _b: &BlockingState, _r: PruneReason, _s: &SearchStatistics) {}
        fn on_descend(
            &mut self,
            _b: &BlockingState,
            _v: VertexIndex,
            _br: Branch,
            _s: &SearchStatistics,
        ) {
        }
        fn on_backtrack(&mut self, _b: &BlockingState, _s: &SearchStatistics) {}
        fn on_solution_found(&mut self, _w: &FixedBitSet, _s: &SearchStatistics) {
            self.solutions += 1;
        }
    }

    fn target() -> SearchTarget {
        SearchTarget {
            topology: Topology::interval(),
            domain_len: 2,
            goal: 2,
        }
    }

    #[test]
    fn test_fans_out_events() {
        let mut a = Counting::default();
        let mut b = Counting::default();
        {
            let mut c = CompositeTreeSearchMonitor::new();
            c.add_monitor(&mut a);
            c.add_monitor(&mut b);
            c.add_monitor(NoOperationMonitor::new());
            assert_eq!(c.len(), 3);
            let stats = SearchStatistics::default();
            c.on_enter_search(&target(), &stats);
            c.on_solution_found(&FixedBitSet::with_capacity(2), &stats);
        }
        assert_eq!((a.enters, a.solutions), (1, 1));
        assert_eq!((b.enters, b.solutions), (1, 1));
    }

    #[test]
    fn test_search_command_short_circuits() {
        let mut first = Counting {
            stop: true,
            ..Default::default()
        };
        let mut second = Counting::default();
        {
            let mut c = CompositeTreeSearchMonitor::with_capacity(2);
            c.add_monitor(&mut first);
            c.add_monitor(&mut second);
            let blocking = BlockingState::new(2, GeneratorSet::new(vec![1]).unwrap());
            let cmd = c.search_command(&blocking, &SearchStatistics::default());
            assert_eq!(cmd, SearchCommand::Terminate("stop".into()));
        }
        assert_eq!(first.commands, 1);
        assert_eq!(second.commands, 0);
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut c = CompositeTreeSearchMonitor::default();
        assert!(c.is_empty());
        let blocking = BlockingState::new(1, GeneratorSet::new(vec![1]).unwrap());
        assert_eq!(
            c.search_command(&blocking, &SearchStatistics::default()),
            SearchCommand::Continue
        );
    }
}
