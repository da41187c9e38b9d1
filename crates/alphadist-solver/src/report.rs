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

//! Line formats of the sweep report
//!
//! Every line starts with `T`, names the quantity, and embeds the generators
//! as two-digit fields, e.g. `ALPHA_INT_S_01_04_N_010` for α(I_10) with
//! S = {1, 4}.

use crate::sweep::{Density, SweepEvent};
use alphadist_model::generators::GeneratorSet;

/// Formats the generators as `_01_04`.
pub fn generator_label(generators: &GeneratorSet) -> String {
    generators.iter().map(|g| format!("_{:02}", g)).collect()
}

/// `T MAX ALPHA_CYC_S_<gens>_N_<NNN> <alpha>`
pub fn cycle_line(generators: &GeneratorSet, modulus: usize, alpha: usize) -> String {
    format!(
        "T MAX ALPHA_CYC_S{}_N_{:03} {:>3}",
        generator_label(generators),
        modulus,
        alpha
    )
}

/// `T MAX ALPHA_INT_S_<gens>_N_<NNN> <alpha>`
pub fn interval_line(generators: &GeneratorSet, n: usize, alpha: usize) -> String {
    format!(
        "T MAX ALPHA_INT_S{}_N_{:03} {:>3}",
        generator_label(generators),
        n,
        alpha
    )
}

/// Formats a single sweep event.
pub fn event_line(generators: &GeneratorSet, event: &SweepEvent) -> String {
    match *event {
        SweepEvent::Cycle { modulus, alpha } => cycle_line(generators, modulus, alpha),
        SweepEvent::Interval { n, alpha } => interval_line(generators, n, alpha),
    }
}

/// `T MIN DALPHA_INT_S_<gens> <ratio> # <a> / <b>`
pub fn upper_density_line(generators: &GeneratorSet, upper: Density) -> String {
    density_line("T MIN DALPHA_INT_S", generators, upper)
}

/// `T MAX DALPHA_CYC_S_<gens> <ratio> # <a> / <b>`
pub fn lower_density_line(generators: &GeneratorSet, lower: Density) -> String {
    density_line("T MAX DALPHA_CYC_S", generators, lower)
}

fn density_line(prefix: &str, generators: &GeneratorSet, density: Density) -> String {
    format!(
        "{}{} {:.10} # {:>3} / {:>3}",
        prefix,
        generator_label(generators),
        density.as_f64(),
        density.numerator(),
        density.denominator()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gens(v: &[usize]) -> GeneratorSet {
        GeneratorSet::new(v.to_vec()).unwrap()
    }

    #[test]
    fn test_generator_label() {
        assert_eq!(generator_label(&gens(&[1, 4])), "_01_04");
        assert_eq!(generator_label(&gens(&[123])), "_123");
    }

    #[test]
    fn test_value_lines() {
        let s = gens(&[1, 4]);
        assert_eq!(cycle_line(&s, 5, 2), "T MAX ALPHA_CYC_S_01_04_N_005   2");
        assert_eq!(interval_line(&s, 10, 4), "T MAX ALPHA_INT_S_01_04_N_010   4");
        assert_eq!(
            event_line(&s, &SweepEvent::Interval { n: 120, alpha: 48 }),
            "T MAX ALPHA_INT_S_01_04_N_120  48"
        );
    }

    #[test]
    fn test_density_lines() {
        let s = gens(&[1, 4]);
        assert_eq!(
            upper_density_line(&s, Density::new(2, 5)),
            "T MIN DALPHA_INT_S_01_04 0.4000000000 #   2 /   5"
        );
        assert_eq!(
            lower_density_line(&s, Density::new(0, 1)),
            "T MAX DALPHA_CYC_S_01_04 0.0000000000 #   0 /   1"
        );
    }
}
