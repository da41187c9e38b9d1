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

use alphadist_model::{generators::GeneratorSet, oracle::brute_force_alpha, topology::Topology};
use alphadist_solver::{
    report,
    sweep::{Density, DensitySweep, StopReason, SweepConfig, SweepEvent},
};
use std::cmp::Ordering;

fn gens(v: &[usize]) -> GeneratorSet {
    GeneratorSet::new(v.to_vec()).unwrap()
}

#[test]
fn one_four_converges_to_two_fifths() {
    let s = gens(&[1, 4]);
    let mut sweep = DensitySweep::new(SweepConfig::new(s.clone(), 12));
    let mut lines = Vec::new();
    let summary = sweep
        .run(|e| lines.push(report::event_line(&s, e)))
        .unwrap();

    assert_eq!(summary.stop_reason(), &StopReason::Converged);
    assert_eq!(summary.lower(), Density::new(2, 5));
    assert_eq!(summary.upper(), Density::new(2, 5));
    assert_eq!(summary.last_modulus(), 6);

    assert_eq!(lines.first().map(String::as_str), Some("T MAX ALPHA_INT_S_01_04_N_001   1"));
    assert!(lines.contains(&"T MAX ALPHA_CYC_S_01_04_N_005   2".to_string()));
    // 2 and 4 divide the generator 4, so those cycles are skipped.
    assert!(!lines.iter().any(|l| l.contains("ALPHA_CYC_S_01_04_N_002")));
    assert!(!lines.iter().any(|l| l.contains("ALPHA_CYC_S_01_04_N_004")));

    assert_eq!(
        report::upper_density_line(&s, summary.upper()),
        "T MIN DALPHA_INT_S_01_04 0.4000000000 #   2 /   5"
    );
    assert_eq!(
        report::lower_density_line(&s, summary.lower()),
        "T MAX DALPHA_CYC_S_01_04 0.4000000000 #   2 /   5"
    );
}

#[test]
fn reported_values_match_brute_force_and_bounds_are_ordered() {
    for v in [&[2, 3][..], &[1, 3, 8], &[3, 5]] {
        let s = gens(v);
        let mut sweep = DensitySweep::new(SweepConfig::new(s.clone(), 9));
        let mut events = Vec::new();
        let summary = sweep.run(|e| events.push(*e)).unwrap();

        assert_ne!(summary.lower().compare(&summary.upper()), Ordering::Greater);
        for e in events {
            match e {
                SweepEvent::Cycle { modulus, alpha } => {
                    assert!(!s.has_multiple_of(modulus));
                    assert_eq!(
                        alpha,
                        brute_force_alpha(&s, Topology::cyclic(modulus), modulus).alpha()
                    );
                    assert_eq!(sweep.engine().cyclic_alpha(modulus), Some(alpha));
                }
                SweepEvent::Interval { n, alpha } => {
                    assert_eq!(alpha, brute_force_alpha(&s, Topology::interval(), n).alpha());
                }
            }
        }
    }
}
