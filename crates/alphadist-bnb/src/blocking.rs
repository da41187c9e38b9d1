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

//! Blocking state for the branch-and-bound search
//!
//! Every index of the current domain carries a `Mark`: free, selected, or
//! excluded by some selected index (a skipped index is excluded by itself).
//! A parallel counter tracks the number of free indices.
//!
//! Mutation happens only through the paired operations `select`/`unselect`
//! and `skip`/`unskip`, or through their scoped forms which return guards that
//! undo the operation on drop. Because the guards borrow the state mutably,
//! nesting is LIFO by construction and the state is fully restored on every
//! unwind path of the recursion.
//!
//! Invariants
//! - `free_count()` equals the number of `Mark::Free` entries in the domain.
//! - `ExcludedBy(k)` with k ≠ own index refers to a currently selected k.
//! - Neighbors outside the logical domain [0, n) are never touched.

use alphadist_model::{
    generators::GeneratorSet,
    index::VertexIndex,
    topology::{Neighbors, Topology},
};
use fixedbitset::FixedBitSet;

/// The annotation of a single index in the blocking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    /// Neither chosen nor ruled out.
    #[default]
    Free,
    /// Part of the current partial independent set.
    Selected,
    /// Ruled out by the given index; a skipped index is excluded by itself.
    ExcludedBy(VertexIndex),
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::Free => write!(f, "?"),
            Mark::Selected => write!(f, "+"),
            Mark::ExcludedBy(_) => write!(f, "_"),
        }
    }
}

/// Per-index blocking annotations over a fixed-capacity domain.
#[derive(Debug, Clone)]
pub struct BlockingState {
    marks: Vec<Mark>,
    adjacency: Vec<Neighbors>,
    generators: GeneratorSet,
    topology: Topology,
    domain_len: usize,
    free: usize,
}

impl BlockingState {
    /// Creates a blocking state able to hold domains of up to `capacity` indices.
    ///
    /// The initial domain is empty; call `reset` before use.
    pub fn new(capacity: usize, generators: GeneratorSet) -> Self {
        Self {
            marks: vec![Mark::Free; capacity],
            adjacency: Vec::with_capacity(capacity),
            generators,
            topology: Topology::Interval,
            domain_len: 0,
            free: 0,
        }
    }

    /// Marks the first `domain_len` indices free under the given topology.
    ///
    /// Neighbor lists are rebuilt for the new domain.
    pub fn reset(&mut self, domain_len: usize, topology: Topology) {
        assert!(
            domain_len <= self.marks.len(),
            "called `BlockingState::reset` with domain length {} exceeding capacity {}",
            domain_len,
            self.marks.len()
        );

        self.marks[..domain_len].fill(Mark::Free);
        self.domain_len = domain_len;
        self.free = domain_len;

        if self.topology != topology || self.adjacency.len() != domain_len {
            self.topology = topology;
            self.adjacency.clear();
            for v in 0..domain_len {
                self.adjacency.push(topology.neighbors(
                    &self.generators,
                    VertexIndex::new(v),
                    domain_len,
                ));
            }
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.marks.len()
    }

    #[inline]
    pub fn domain_len(&self) -> usize {
        self.domain_len
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[inline]
    pub fn generators(&self) -> &GeneratorSet {
        &self.generators
    }

    /// Number of free indices in the domain.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free
    }

    #[inline]
    pub fn mark(&self, vertex: VertexIndex) -> Mark {
        self.check_in_domain(vertex, "mark");
        self.marks[vertex.get()]
    }

    #[inline]
    pub fn is_free(&self, index: usize) -> bool {
        index < self.domain_len && self.marks[index] == Mark::Free
    }

    /// Returns the marks of the current domain.
    #[inline]
    pub fn marks(&self) -> &[Mark] {
        &self.marks[..self.domain_len]
    }

    /// Returns the numerically largest free index, if any.
    #[inline]
    pub fn highest_free(&self) -> Option<VertexIndex> {
        self.marks[..self.domain_len]
            .iter()
            .rposition(|m| *m == Mark::Free)
            .map(VertexIndex::new)
    }

    /// Returns the currently selected indices as a bitset over the domain.
    pub fn selected(&self) -> FixedBitSet {
        let mut set = FixedBitSet::with_capacity(self.domain_len);
        for (i, m) in self.marks[..self.domain_len].iter().enumerate() {
            if *m == Mark::Selected {
                set.insert(i);
            }
        }
        set
    }

    /// Selects a free index and excludes its free neighbors.
    ///
    /// Returns `false` and leaves the state untouched if `vertex` is not free.
    pub fn select(&mut self, vertex: VertexIndex) -> bool {
        self.check_in_domain(vertex, "select");

        let i = vertex.get();
        if self.marks[i] != Mark::Free {
            return false;
        }

        self.marks[i] = Mark::Selected;
        self.free -= 1;

        for w in self.adjacency[i].iter() {
            let mark = &mut self.marks[w.get()];
            if *mark == Mark::Free {
                *mark = Mark::ExcludedBy(vertex);
                self.free -= 1;
            }
        }
        true
    }

    /// Reverses a `select` of `vertex`.
    ///
    /// Returns `false` and leaves the state untouched if `vertex` is not selected.
    pub fn unselect(&mut self, vertex: VertexIndex) -> bool {
        self.check_in_domain(vertex, "unselect");

        let i = vertex.get();
        if self.marks[i] != Mark::Selected {
            return false;
        }

        self.marks[i] = Mark::Free;
        self.free += 1;

        for w in self.adjacency[i].iter() {
            let mark = &mut self.marks[w.get()];
            if *mark == Mark::ExcludedBy(vertex) {
                *mark = Mark::Free;
                self.free += 1;
            }
        }
        true
    }

    /// Excludes a free index without touching its neighbors.
    pub fn skip(&mut self, vertex: VertexIndex) -> bool {
        self.check_in_domain(vertex, "skip");

        let mark = &mut self.marks[vertex.get()];
        if *mark != Mark::Free {
            return false;
        }
        *mark = Mark::ExcludedBy(vertex);
        self.free -= 1;
        true
    }

    /// Reverses a `skip`; acts only if the index is excluded by itself.
    pub fn unskip(&mut self, vertex: VertexIndex) -> bool {
        self.check_in_domain(vertex, "unskip");

        let mark = &mut self.marks[vertex.get()];
        if *mark != Mark::ExcludedBy(vertex) {
            return false;
        }
        *mark = Mark::Free;
        self.free += 1;
        true
    }

    /// Selects `vertex` until the returned guard is dropped.
    #[inline]
    pub fn select_scoped(&mut self, vertex: VertexIndex) -> SelectGuard<'_> {
        let acquired = self.select(vertex);
        SelectGuard {
            state: self,
            vertex,
            acquired,
        }
    }

    /// Skips `vertex` until the returned guard is dropped.
    #[inline]
    pub fn skip_scoped(&mut self, vertex: VertexIndex) -> SkipGuard<'_> {
        let acquired = self.skip(vertex);
        SkipGuard {
            state: self,
            vertex,
            acquired,
        }
    }

    #[inline(always)]
    fn check_in_domain(&self, vertex: VertexIndex, op: &str) {
        debug_assert!(
            vertex.get() < self.domain_len,
            "called `BlockingState::{}` with vertex {} outside domain of length {}",
            op,
            vertex.get(),
            self.domain_len
        );
    }
}

impl std::fmt::Display for BlockingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for m in self.marks() {
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

/// Keeps an index selected for the guard's lifetime.
#[derive(Debug)]
pub struct SelectGuard<'a> {
    state: &'a mut BlockingState,
    vertex: VertexIndex,
    acquired: bool,
}

impl SelectGuard<'_> {
    /// Returns `true` if the guarded `select` changed the state.
    #[inline]
    pub fn acquired(&self) -> bool {
        self.acquired
    }

    #[inline]
    pub fn vertex(&self) -> VertexIndex {
        self.vertex
    }
}

impl std::ops::Deref for SelectGuard<'_> {
    type Target = BlockingState;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl std::ops::DerefMut for SelectGuard<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for SelectGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        if self.acquired {
            self.state.unselect(self.vertex);
        }
    }
}

/// Keeps an index skipped for the guard's lifetime.
#[derive(Debug)]
pub struct SkipGuard<'a> {
    state: &'a mut BlockingState,
    vertex: VertexIndex,
    acquired: bool,
}

impl SkipGuard<'_> {
    /// Returns `true` if the guarded `skip` changed the state.
    #[inline]
    pub fn acquired(&self) -> bool {
        self.acquired
    }

    #[inline]
    pub fn vertex(&self) -> VertexIndex {
        self.vertex
    }
}

impl std::ops::Deref for SkipGuard<'_> {
    type Target = BlockingState;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl std::ops::DerefMut for SkipGuard<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for SkipGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        if self.acquired {
            self.state.unskip(self.vertex);
        }
    }
}
