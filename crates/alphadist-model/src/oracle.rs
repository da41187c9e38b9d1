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

//! Independence checks and an exhaustive α oracle
//!
//! These routines make no use of bound tables and are meant for validating
//! the branch-and-bound engine on small domains. `brute_force_alpha` runs a
//! plain include/exclude recursion over candidate bitsets and is exponential
//! in `n`.

use crate::{generators::GeneratorSet, index::VertexIndex, topology::Topology};
use fixedbitset::FixedBitSet;

/// Returns `true` if no two vertices in `set` are adjacent.
///
/// Every member of `set` must lie in the domain the topology is evaluated on.
pub fn is_independent(generators: &GeneratorSet, topology: Topology, set: &FixedBitSet) -> bool {
    let members: Vec<usize> = set.ones().collect();
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            if topology.is_adjacent(generators, a, b) {
                return false;
            }
        }
    }
    true
}

/// The result of an exhaustive independence number computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleResult {
    alpha: usize,
    witness: FixedBitSet,
}

impl OracleResult {
    #[inline]
    pub fn alpha(&self) -> usize {
        self.alpha
    }

    /// A maximum independent set of size `alpha`.
    #[inline]
    pub fn witness(&self) -> &FixedBitSet {
        &self.witness
    }
}

/// Computes α of the distance graph on [0, `n`) exhaustively.
///
/// # Examples
///
/// ```rust
/// use alphadist_model::{generators::GeneratorSet, oracle::brute_force_alpha, topology::Topology};
///
/// let s = GeneratorSet::new(vec![1]).unwrap();
/// assert_eq!(brute_force_alpha(&s, Topology::interval(), 5).alpha(), 3);
/// assert_eq!(brute_force_alpha(&s, Topology::cyclic(5), 5).alpha(), 2);
/// ```
pub fn brute_force_alpha(generators: &GeneratorSet, topology: Topology, n: usize) -> OracleResult {
    let mut candidates = FixedBitSet::with_capacity(n);
    candidates.insert_range(..);

    let mut best = OracleResult {
        alpha: 0,
        witness: FixedBitSet::with_capacity(n),
    };
    let mut current = FixedBitSet::with_capacity(n);
    recurse(
        generators,
        topology,
        n,
        &candidates,
        &mut current,
        0,
        &mut best,
    );
    best
}

fn recurse(
    generators: &GeneratorSet,
    topology: Topology,
    n: usize,
    candidates: &FixedBitSet,
    current: &mut FixedBitSet,
    size: usize,
    best: &mut OracleResult,
) {
    let remaining = candidates.count_ones(..);
    if size + remaining <= best.alpha {
        return;
    }

    let Some(v) = candidates.ones().next() else {
        // `remaining == 0` and the bound check above imply size > best.
        best.alpha = size;
        best.witness.clone_from(current);
        return;
    };

    let mut rest = candidates.clone();
    rest.set(v, false);

    // Include v.
    let mut included = rest.clone();
    for w in topology.neighbors(generators, VertexIndex::new(v), n) {
        included.set(w.get(), false);
    }
    current.insert(v);
    recurse(generators, topology, n, &included, current, size + 1, best);
    current.set(v, false);

    // Exclude v.
    recurse(generators, topology, n, &rest, current, size, best);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gens(v: &[usize]) -> GeneratorSet {
        GeneratorSet::new(v.to_vec()).unwrap()
    }

    fn set(n: usize, members: &[usize]) -> FixedBitSet {
        let mut s = FixedBitSet::with_capacity(n);
        for &m in members {
            s.insert(m);
        }
        s
    }

    #[test]
    fn test_is_independent() {
        let s = gens(&[1]);
        assert!(is_independent(&s, Topology::interval(), &set(5, &[0, 2, 4])));
        assert!(!is_independent(&s, Topology::interval(), &set(5, &[0, 1])));
        assert!(!is_independent(&s, Topology::cyclic(5), &set(5, &[0, 2, 4])));
        assert!(is_independent(&s, Topology::cyclic(5), &set(5, &[])));
    }

    #[test]
    fn test_unit_generator_interval_values() {
        let s = gens(&[1]);
        let values: Vec<usize> = (1..=5)
            .map(|n| brute_force_alpha(&s, Topology::interval(), n).alpha())
            .collect();
        assert_eq!(values, vec![1, 1, 2, 2, 3]);
    }

    #[test]
    fn test_unit_generator_cycles() {
        let s = gens(&[1]);
        assert_eq!(brute_force_alpha(&s, Topology::cyclic(4), 4).alpha(), 2);
        assert_eq!(brute_force_alpha(&s, Topology::cyclic(5), 5).alpha(), 2);
        // Partial prefix of Z_5 is a path on 3 vertices.
        assert_eq!(brute_force_alpha(&s, Topology::cyclic(5), 3).alpha(), 2);
    }

    #[test]
    fn test_empty_domain() {
        let s = gens(&[1]);
        let r = brute_force_alpha(&s, Topology::interval(), 0);
        assert_eq!(r.alpha(), 0);
        assert_eq!(r.witness().count_ones(..), 0);
    }

    #[test]
    fn test_witness_is_maximum_independent_set() {
        let s = gens(&[1, 4]);
        for n in 1..=14 {
            for t in [Topology::interval(), Topology::cyclic(n)] {
                let r = brute_force_alpha(&s, t, n);
                assert_eq!(r.witness().count_ones(..), r.alpha());
                assert!(is_independent(&s, t, r.witness()));
            }
        }
    }

    #[test]
    fn test_one_four_density() {
        // {1, 4}-avoiding sets have density 2/5: {0, 2} repeated with period 5.
        let s = gens(&[1, 4]);
        assert_eq!(brute_force_alpha(&s, Topology::cyclic(5), 5).alpha(), 2);
        assert_eq!(brute_force_alpha(&s, Topology::interval(), 10).alpha(), 4);
    }
}
