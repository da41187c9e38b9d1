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

//! Interval and cyclic topologies
//!
//! A `Topology` decides how distances are measured between two vertices:
//! - `Interval`: vertices are the integers 0..n and i ~ j iff |i - j| ∈ S.
//! - `Cyclic { modulus }`: vertices are the first n residues of Z_N and
//!   i ~ j iff (i - j) mod N ∈ S or (j - i) mod N ∈ S.
//!
//! Neighbor enumeration is always restricted to a logical domain [0, n).
//! Cyclic self-loops (a generator that is a multiple of N) are ignored.

use crate::{generators::GeneratorSet, index::VertexIndex};
use smallvec::SmallVec;

/// Neighbor list of a single vertex. Inline for up to four generators.
pub type Neighbors = SmallVec<[VertexIndex; 8]>;

/// The distance metric of a distance graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// The finite interval {0, …, n-1}.
    #[default]
    Interval,
    /// The first n residues of Z_modulus.
    Cyclic { modulus: usize },
}

impl Topology {
    #[inline]
    pub const fn interval() -> Self {
        Topology::Interval
    }

    #[inline]
    pub const fn cyclic(modulus: usize) -> Self {
        Topology::Cyclic { modulus }
    }

    #[inline]
    pub const fn is_cyclic(&self) -> bool {
        matches!(self, Topology::Cyclic { .. })
    }

    /// Returns the modulus of a cyclic topology.
    #[inline]
    pub const fn modulus(&self) -> Option<usize> {
        match self {
            Topology::Interval => None,
            Topology::Cyclic { modulus } => Some(*modulus),
        }
    }

    /// Returns `true` if `a` and `b` are joined by an edge.
    ///
    /// A vertex is never adjacent to itself, even when a generator is a
    /// multiple of the modulus.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use alphadist_model::{generators::GeneratorSet, topology::Topology};
    ///
    /// let s = GeneratorSet::new(vec![1]).unwrap();
    /// assert!(Topology::interval().is_adjacent(&s, 0, 1));
    /// assert!(!Topology::interval().is_adjacent(&s, 0, 4));
    /// assert!(Topology::cyclic(5).is_adjacent(&s, 0, 4));
    /// ```
    pub fn is_adjacent(&self, generators: &GeneratorSet, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        match *self {
            Topology::Interval => generators.contains(a.abs_diff(b)),
            Topology::Cyclic { modulus } => {
                debug_assert!(
                    modulus > 0,
                    "called `Topology::is_adjacent` with zero modulus"
                );
                let forward = (a % modulus + modulus - b % modulus) % modulus;
                let backward = (modulus - forward) % modulus;
                forward != 0
                    && (generators.contains_modulo(forward, modulus)
                        || generators.contains_modulo(backward, modulus))
            }
        }
    }

    /// Returns the distinct neighbors of `vertex` inside the domain [0, `domain_len`).
    ///
    /// Backward neighbors `vertex - g` come first (wrapping modulo N in cyclic
    /// mode), followed by the forward neighbors `vertex + g`.
    pub fn neighbors(
        &self,
        generators: &GeneratorSet,
        vertex: VertexIndex,
        domain_len: usize,
    ) -> Neighbors {
        debug_assert!(
            vertex.get() < domain_len,
            "called `Topology::neighbors` with vertex {} outside domain of length {}",
            vertex.get(),
            domain_len
        );

        let mut out = Neighbors::new();
        let mut push = |v: VertexIndex| {
            if v.get() < domain_len && v != vertex && !out.contains(&v) {
                out.push(v);
            }
        };

        match *self {
            Topology::Interval => {
                for &g in generators {
                    if let Some(v) = vertex.checked_sub(g) {
                        push(v);
                    }
                }
                for &g in generators {
                    if let Some(v) = vertex.get().checked_add(g) {
                        push(VertexIndex::new(v));
                    }
                }
            }
            Topology::Cyclic { modulus } => {
                debug_assert!(
                    domain_len <= modulus,
                    "called `Topology::neighbors` with domain length {} exceeding modulus {}",
                    domain_len,
                    modulus
                );
                for &g in generators {
                    push(vertex.sub_mod(g, modulus));
                }
                for &g in generators {
                    push(vertex.add_mod(g, modulus));
                }
            }
        }

        out
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Topology::Interval => write!(f, "Interval"),
            Topology::Cyclic { modulus } => write!(f, "Cyclic(Z_{})", modulus),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gens(v: &[usize]) -> GeneratorSet {
        GeneratorSet::new(v.to_vec()).unwrap()
    }

    fn raw(ns: &Neighbors) -> Vec<usize> {
        ns.iter().map(|v| v.get()).collect()
    }

    #[test]
    fn test_interval_adjacency() {
        let s = gens(&[2, 3]);
        let t = Topology::interval();
        assert!(t.is_adjacent(&s, 0, 2));
        assert!(t.is_adjacent(&s, 5, 2));
        assert!(!t.is_adjacent(&s, 0, 1));
        assert!(!t.is_adjacent(&s, 4, 4));
    }

    #[test]
    fn test_cyclic_adjacency_is_symmetric() {
        let s = gens(&[2]);
        let t = Topology::cyclic(7);
        for a in 0..7 {
            for b in 0..7 {
                assert_eq!(t.is_adjacent(&s, a, b), t.is_adjacent(&s, b, a));
            }
        }
        assert!(t.is_adjacent(&s, 0, 5));
        assert!(t.is_adjacent(&s, 6, 1));
        assert!(!t.is_adjacent(&s, 0, 1));
    }

    #[test]
    fn test_cyclic_self_loop_ignored() {
        let s = gens(&[3]);
        let t = Topology::cyclic(3);
        assert!(!t.is_adjacent(&s, 1, 1));
        assert!(t.neighbors(&s, VertexIndex::new(1), 3).is_empty());
    }

    #[test]
    fn test_interval_neighbors_respect_domain() {
        let s = gens(&[1, 4]);
        let t = Topology::interval();
        assert_eq!(raw(&t.neighbors(&s, VertexIndex::new(0), 6)), vec![1, 4]);
        assert_eq!(raw(&t.neighbors(&s, VertexIndex::new(5), 6)), vec![4, 1]);
        assert_eq!(raw(&t.neighbors(&s, VertexIndex::new(2), 3)), vec![1]);
    }

    #[test]
    fn test_interval_neighbors_with_huge_generator() {
        let s = gens(&[usize::MAX, 1]);
        let t = Topology::interval();
        assert_eq!(raw(&t.neighbors(&s, VertexIndex::new(1), 3)), vec![0, 2]);
        assert!(!t.is_adjacent(&s, 0, 2));
    }

    #[test]
    fn test_cyclic_neighbors_wrap_and_deduplicate() {
        let s = gens(&[2]);
        let t = Topology::cyclic(4);
        // 1 - 2 ≡ 3 and 1 + 2 ≡ 3 in Z_4.
        assert_eq!(raw(&t.neighbors(&s, VertexIndex::new(1), 4)), vec![3]);

        let s = gens(&[1]);
        let t = Topology::cyclic(5);
        assert_eq!(raw(&t.neighbors(&s, VertexIndex::new(0), 5)), vec![4, 1]);
        // Only the first three residues are in the domain.
        assert_eq!(raw(&t.neighbors(&s, VertexIndex::new(0), 3)), vec![1]);
    }

    #[test]
    fn test_neighbors_agree_with_adjacency() {
        let s = gens(&[1, 3, 5]);
        for t in [Topology::interval(), Topology::cyclic(9)] {
            for v in 0..9 {
                let ns = raw(&t.neighbors(&s, VertexIndex::new(v), 9));
                for w in 0..9 {
                    assert_eq!(ns.contains(&w), t.is_adjacent(&s, v, w), "{} {} {}", t, v, w);
                }
            }
        }
    }

    #[test]
    fn test_modulus_and_display() {
        assert_eq!(Topology::interval().modulus(), None);
        assert_eq!(Topology::cyclic(11).modulus(), Some(11));
        assert!(Topology::cyclic(11).is_cyclic());
        assert_eq!(Topology::cyclic(11).to_string(), "Cyclic(Z_11)");
        assert_eq!(Topology::default(), Topology::Interval);
    }
}
