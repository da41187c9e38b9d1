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

use alphadist_model::{
    generators::GeneratorSet, index::VertexIndex, oracle::brute_force_alpha, topology::Topology,
};
use proptest::prelude::*;

fn generator_set() -> impl Strategy<Value = GeneratorSet> {
    prop::collection::vec(1usize..8, 1..4).prop_map(|v| GeneratorSet::new(v).unwrap())
}

proptest! {
    #[test]
    fn neighbor_relation_is_symmetric(s in generator_set(), n in 1usize..16, cyclic in any::<bool>()) {
        let topology = if cyclic { Topology::cyclic(n) } else { Topology::interval() };
        for v in 0..n {
            for w in topology.neighbors(&s, VertexIndex::new(v), n) {
                let back = topology.neighbors(&s, w, n);
                prop_assert!(back.contains(&VertexIndex::new(v)));
            }
        }
    }

    #[test]
    fn interval_alpha_grows_by_at_most_one(s in generator_set(), n in 1usize..14) {
        let shorter = brute_force_alpha(&s, Topology::interval(), n - 1).alpha();
        let longer = brute_force_alpha(&s, Topology::interval(), n).alpha();
        prop_assert!(longer == shorter || longer == shorter + 1);
    }

    #[test]
    fn cyclic_prefix_never_exceeds_interval(s in generator_set(), modulus in 1usize..14, n in 1usize..14) {
        prop_assume!(n <= modulus);
        // Cyclic adjacency on a prefix contains the interval edges.
        let cyclic = brute_force_alpha(&s, Topology::cyclic(modulus), n).alpha();
        let interval = brute_force_alpha(&s, Topology::interval(), n).alpha();
        prop_assert!(cyclic <= interval);
    }
}
