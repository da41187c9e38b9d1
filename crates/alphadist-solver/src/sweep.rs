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

//! # Density sweep
//!
//! Brackets the maximum density of an S-avoiding set of integers between a
//! lower bound from cycles and an upper bound from intervals:
//!
//! - Any independent set of Z_n repeats with period n, so α(Z_n) / n is
//!   achievable and bounds the density from below.
//! - Every window of m consecutive integers holds at most α(I_m) elements of
//!   an S-avoiding set, so α(I_m) / m bounds the density from above.
//!
//! For n = 1, 2, … the sweep computes α(Z_n) (skipping moduli that divide a
//! generator, whose cycles would carry self-loops) and then α(I_{2n-1}) and
//! α(I_{2n}). It stops as soon as the bounds meet, the modulus limit is
//! reached, the time budget is spent, or an answer comes back inconclusive.
//! Ratios are compared exactly.

use alphadist_bnb::{
    engine::{DistanceEngine, EngineConfig},
    error::EngineError,
    result::QueryOutcome,
};
use alphadist_model::{generators::GeneratorSet, topology::Topology};
use std::cmp::Ordering;
use std::time::Duration;

/// A density a / b with b > 0, compared exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Density {
    numerator: usize,
    denominator: usize,
}

impl Density {
    #[inline]
    pub fn new(numerator: usize, denominator: usize) -> Self {
        debug_assert!(
            denominator > 0,
            "called `Density::new` with zero denominator"
        );
        Self {
            numerator,
            denominator,
        }
    }

    #[inline]
    pub fn numerator(&self) -> usize {
        self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> usize {
        self.denominator
    }

    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Compares the values a/b and c/d by cross-multiplication.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use alphadist_solver::sweep::Density;
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(Density::new(1, 2).compare(&Density::new(2, 4)), Ordering::Equal);
    /// assert_eq!(Density::new(2, 5).compare(&Density::new(1, 2)), Ordering::Less);
    /// ```
    #[inline]
    pub fn compare(&self, other: &Density) -> Ordering {
        let lhs = self.numerator as u128 * other.denominator as u128;
        let rhs = other.numerator as u128 * self.denominator as u128;
        lhs.cmp(&rhs)
    }
}

impl std::fmt::Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Configuration for a `DensitySweep`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    generators: GeneratorSet,
    max_modulus: usize,
    min_modulus: usize,
    time_limit: Option<Duration>,
    log_interval: Option<Duration>,
}

impl SweepConfig {
    /// Sweeps moduli n < `max_modulus` and intervals up to length 2n.
    #[inline]
    pub fn new(generators: GeneratorSet, max_modulus: usize) -> Self {
        Self {
            generators,
            max_modulus,
            min_modulus: 1,
            time_limit: None,
            log_interval: None,
        }
    }

    /// Cycles shorter than `min_modulus` are not tested.
    #[inline]
    pub fn with_min_modulus(mut self, min_modulus: usize) -> Self {
        self.min_modulus = min_modulus;
        self
    }

    /// Total wall-clock budget for the whole sweep.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline]
    pub fn with_log_interval(mut self, interval: Duration) -> Self {
        self.log_interval = Some(interval);
        self
    }

    #[inline]
    pub fn generators(&self) -> &GeneratorSet {
        &self.generators
    }

    #[inline]
    pub fn max_modulus(&self) -> usize {
        self.max_modulus
    }

    #[inline]
    pub fn min_modulus(&self) -> usize {
        self.min_modulus
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Engine capacity needed for intervals of length up to 2 * `max_modulus`.
    #[inline]
    pub fn capacity(&self) -> usize {
        2 * self.max_modulus + 2
    }

    fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::new(self.generators.clone(), self.capacity());
        if let Some(limit) = self.time_limit {
            config = config.with_time_limit(limit);
        }
        if let Some(interval) = self.log_interval {
            config = config.with_log_interval(interval);
        }
        config
    }
}

/// An exact value established during the sweep, in the order computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepEvent {
    /// α(Z_modulus).
    Cycle { modulus: usize, alpha: usize },
    /// α(I_n).
    Interval { n: usize, alpha: usize },
}

/// Why the sweep ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The lower bound reached the upper bound.
    Converged,
    /// Every modulus below the limit was processed.
    ModulusLimit,
    /// The time budget was spent between queries.
    TimeLimit,
    /// A query could not be settled.
    Inconclusive {
        topology: Topology,
        n: usize,
        reason: String,
    },
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Converged => write!(f, "Converged"),
            StopReason::ModulusLimit => write!(f, "Modulus limit reached"),
            StopReason::TimeLimit => write!(f, "Time limit reached"),
            StopReason::Inconclusive {
                topology,
                n,
                reason,
            } => write!(f, "Inconclusive at {} n={}: {}", topology, n, reason),
        }
    }
}

/// The density bracket found by a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepSummary {
    lower: Density,
    upper: Density,
    stop_reason: StopReason,
    last_modulus: usize,
}

impl SweepSummary {
    /// Best achievable density α(Z_n) / n found; 0/1 if none.
    #[inline]
    pub fn lower(&self) -> Density {
        self.lower
    }

    /// Smallest interval ratio α(I_m) / m found; 1/1 if none.
    #[inline]
    pub fn upper(&self) -> Density {
        self.upper
    }

    #[inline]
    pub fn stop_reason(&self) -> &StopReason {
        &self.stop_reason
    }

    /// The modulus n the sweep was working on when it stopped.
    #[inline]
    pub fn last_modulus(&self) -> usize {
        self.last_modulus
    }
}

/// Runs the density sweep over a single `DistanceEngine`.
#[derive(Debug)]
pub struct DensitySweep {
    config: SweepConfig,
    engine: DistanceEngine,
}

impl DensitySweep {
    pub fn new(config: SweepConfig) -> Self {
        let engine = DistanceEngine::new(config.engine_config());
        Self { config, engine }
    }

    #[inline]
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    #[inline]
    pub fn engine(&self) -> &DistanceEngine {
        &self.engine
    }

    /// Runs the sweep, passing every established value to `on_event`.
    pub fn run<F>(&mut self, mut on_event: F) -> Result<SweepSummary, EngineError>
    where
        F: FnMut(&SweepEvent),
    {
        let mut lower = Density::new(0, 1);
        let mut upper = Density::new(1, 1);
        let mut n = 1;

        let stop_reason = loop {
            if lower.compare(&upper) != Ordering::Less {
                break StopReason::Converged;
            }
            if n >= self.config.max_modulus {
                break StopReason::ModulusLimit;
            }
            if self.engine.remaining_time() == Some(Duration::ZERO) {
                break StopReason::TimeLimit;
            }

            if n >= self.config.min_modulus && !self.config.generators.has_multiple_of(n) {
                let mut outcome = None;
                for i in 1..=n {
                    let o = self.engine.query_cyclic(n, i)?;
                    if !o.is_exact() {
                        outcome = Some(o);
                        break;
                    }
                    outcome = Some(o);
                }
                let alpha = match outcome.as_ref().and_then(QueryOutcome::value) {
                    Some(alpha) => alpha,
                    None => {
                        break inconclusive(Topology::cyclic(n), n, outcome.as_ref());
                    }
                };

                let density = Density::new(alpha, n);
                if density.compare(&lower) == Ordering::Greater {
                    lower = density;
                }
                tracing::info!(modulus = n, alpha, lower = %lower, "cycle settled");
                on_event(&SweepEvent::Cycle { modulus: n, alpha });
            }

            let mut stopped = None;
            for m in [2 * n - 1, 2 * n] {
                let o = self.engine.query_interval(m)?;
                let Some(alpha) = o.value() else {
                    stopped = Some(inconclusive(Topology::Interval, m, Some(&o)));
                    break;
                };

                let density = Density::new(alpha, m);
                if density.compare(&upper) == Ordering::Less {
                    upper = density;
                }
                tracing::info!(n = m, alpha, upper = %upper, "interval settled");
                on_event(&SweepEvent::Interval { n: m, alpha });
            }
            if let Some(reason) = stopped {
                break reason;
            }

            n += 1;
        };

        tracing::debug!(%stop_reason, %lower, %upper, n, "sweep finished");
        Ok(SweepSummary {
            lower,
            upper,
            stop_reason,
            last_modulus: n,
        })
    }
}

fn inconclusive(topology: Topology, n: usize, outcome: Option<&QueryOutcome>) -> StopReason {
    let reason = outcome
        .map(|o| o.termination_reason().to_string())
        .unwrap_or_default();
    StopReason::Inconclusive {
        topology,
        n,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gens(v: &[usize]) -> GeneratorSet {
        GeneratorSet::new(v.to_vec()).unwrap()
    }

    #[test]
    fn test_density_compare_is_exact() {
        assert_eq!(Density::new(2, 5).compare(&Density::new(4, 10)), Ordering::Equal);
        assert_eq!(Density::new(1, 3).compare(&Density::new(1, 2)), Ordering::Less);
        assert_eq!(Density::new(0, 1).compare(&Density::new(0, 7)), Ordering::Equal);
        assert_eq!(Density::new(3, 7).to_string(), "3/7");
        assert!((Density::new(2, 5).as_f64() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_unit_generator_converges_to_one_half() {
        let mut sweep = DensitySweep::new(SweepConfig::new(gens(&[1]), 10));
        let mut events = Vec::new();
        let summary = sweep.run(|e| events.push(*e)).unwrap();

        assert_eq!(summary.stop_reason(), &StopReason::Converged);
        assert_eq!(summary.lower().compare(&Density::new(1, 2)), Ordering::Equal);
        assert_eq!(summary.upper().compare(&Density::new(1, 2)), Ordering::Equal);
        // n = 1 divides 1 and is skipped; n = 2 gives α(Z_2) = 1.
        assert_eq!(
            &events[..3],
            &[
                SweepEvent::Interval { n: 1, alpha: 1 },
                SweepEvent::Interval { n: 2, alpha: 1 },
                SweepEvent::Cycle {
                    modulus: 2,
                    alpha: 1
                },
            ]
        );
    }

    #[test]
    fn test_modulus_limit() {
        let mut sweep = DensitySweep::new(SweepConfig::new(gens(&[1, 4]), 3));
        let summary = sweep.run(|_| {}).unwrap();
        assert_eq!(summary.stop_reason(), &StopReason::ModulusLimit);
        assert_eq!(summary.last_modulus(), 3);
    }

    #[test]
    fn test_zero_budget_stops_before_any_query() {
        let mut sweep = DensitySweep::new(
            SweepConfig::new(gens(&[1]), 10).with_time_limit(Duration::ZERO),
        );
        let mut count = 0;
        let summary = sweep.run(|_| count += 1).unwrap();
        assert_eq!(count, 0);
        assert_eq!(summary.stop_reason(), &StopReason::TimeLimit);
        assert_eq!(summary.lower(), Density::new(0, 1));
        assert_eq!(summary.upper(), Density::new(1, 1));
    }

    #[test]
    fn test_min_modulus_skips_short_cycles() {
        let mut sweep =
            DensitySweep::new(SweepConfig::new(gens(&[1, 4]), 8).with_min_modulus(5));
        let mut moduli = Vec::new();
        sweep
            .run(|e| {
                if let SweepEvent::Cycle { modulus, .. } = e {
                    moduli.push(*modulus);
                }
            })
            .unwrap();
        assert!(moduli.iter().all(|&m| m >= 5));
    }

    #[test]
    fn test_capacity() {
        assert_eq!(SweepConfig::new(gens(&[1]), 10).capacity(), 22);
    }
}
