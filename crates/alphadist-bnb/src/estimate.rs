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

//! Interval decomposition estimator
//!
//! The free indices of a prefix [0, m) split into maximal runs of consecutive
//! free indices. Because distance graphs are translation invariant (on the
//! integers, and on Z_N), a run of length L induces a copy of the prefix graph
//! on [0, L), so α of the free part is at most the sum of `upper[L]` over the
//! runs. The sum is cut off once it reaches `upper[m]`, which bounds the whole
//! prefix on its own.

use crate::{blocking::BlockingState, tables::BoundTable};

/// Returns an upper bound on the size of an independent set among the free
/// indices of [0, `prefix_len`).
///
/// The result never exceeds `table.upper(prefix_len)`.
pub fn estimate_upper_bound(
    blocking: &BlockingState,
    table: &BoundTable,
    prefix_len: usize,
) -> usize {
    debug_assert!(
        prefix_len <= blocking.domain_len(),
        "called `estimate_upper_bound` with prefix length {} exceeding domain length {}",
        prefix_len,
        blocking.domain_len()
    );

    let cap = table.upper(prefix_len);
    let mut sum = 0;
    let mut i = 0;

    while sum < cap && i < prefix_len {
        while i < prefix_len && !blocking.is_free(i) {
            i += 1;
        }
        let start = i;
        while i < prefix_len && blocking.is_free(i) {
            i += 1;
        }
        sum += table.upper(i - start);
    }

    sum.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphadist_model::{generators::GeneratorSet, index::VertexIndex, topology::Topology};

    fn unit_table(len: usize) -> BoundTable {
        // α of the path on k vertices is ⌈k / 2⌉.
        let mut t = BoundTable::new(len);
        for k in 1..=len {
            t.set_exact(k, k.div_ceil(2));
        }
        t
    }

    #[test]
    fn test_all_free_returns_table_value() {
        let mut b = BlockingState::new(10, GeneratorSet::new(vec![1]).unwrap());
        b.reset(10, Topology::interval());
        let t = unit_table(10);
        assert_eq!(estimate_upper_bound(&b, &t, 7), 4);
    }

    #[test]
    fn test_runs_are_summed() {
        let mut b = BlockingState::new(10, GeneratorSet::new(vec![1]).unwrap());
        b.reset(10, Topology::interval());
        // Free runs in [0, 9): [0, 1] and [5, 8] after skipping 2, 3 and 4.
        for i in [2, 3, 4] {
            b.skip(VertexIndex::new(i));
        }
        let t = unit_table(10);
        // upper[2] + upper[4] = 1 + 2 = 3 < upper[9] = 5.
        assert_eq!(estimate_upper_bound(&b, &t, 9), 3);
    }

    #[test]
    fn test_sum_is_capped() {
        let mut b = BlockingState::new(8, GeneratorSet::new(vec![1]).unwrap());
        b.reset(8, Topology::interval());
        // Isolated free indices 0, 2, 4, 6 each contribute 1 with trivial upper[1] = 1.
        for i in [1, 3, 5, 7] {
            b.skip(VertexIndex::new(i));
        }
        let mut t = BoundTable::new(8);
        t.set_exact(2, 1);
        t.set_exact(3, 2);
        t.set_exact(4, 2);
        t.set_exact(5, 3);
        t.set_exact(6, 3);
        t.set_exact(7, 3);
        assert_eq!(estimate_upper_bound(&b, &t, 7), 3);
    }

    #[test]
    fn test_no_free_indices() {
        let mut b = BlockingState::new(4, GeneratorSet::new(vec![1]).unwrap());
        b.reset(4, Topology::interval());
        for i in 0..4 {
            b.skip(VertexIndex::new(i));
        }
        assert_eq!(estimate_upper_bound(&b, &unit_table(4), 4), 0);
    }
}
