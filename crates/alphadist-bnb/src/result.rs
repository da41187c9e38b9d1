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

use crate::stats::SearchStatistics;
use fixedbitset::FixedBitSet;

/// The answer to an α query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alpha {
    /// The independence number is known exactly.
    Exact(usize),
    /// The search was interrupted before the value was proven.
    Inconclusive,
}

impl Alpha {
    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, Alpha::Exact(_))
    }

    /// Returns the exact value, if known.
    #[inline]
    pub fn value(&self) -> Option<usize> {
        match self {
            Alpha::Exact(v) => Some(*v),
            Alpha::Inconclusive => None,
        }
    }
}

impl std::fmt::Display for Alpha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alpha::Exact(v) => write!(f, "Exact({})", v),
            Alpha::Inconclusive => write!(f, "Inconclusive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The value was already exact in the tables; no search ran.
    Cached,
    /// Every required search ran to completion.
    Proven,
    /// A monitor stopped the search. The string says why.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Cached => write!(f, "Cached"),
            TerminationReason::Proven => write!(f, "Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of a single `query_interval` or `query_cyclic` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    alpha: Alpha,
    termination_reason: TerminationReason,
    witness: Option<FixedBitSet>,
    statistics: SearchStatistics,
}

impl QueryOutcome {
    /// A value served from the tables without searching.
    #[inline]
    pub fn cached(value: usize) -> Self {
        Self {
            alpha: Alpha::Exact(value),
            termination_reason: TerminationReason::Cached,
            witness: None,
            statistics: SearchStatistics::default(),
        }
    }

    /// A value established by completed searches.
    ///
    /// `witness` is present when the last search found an independent set
    /// larger than the previous prefix allowed.
    #[inline]
    pub fn proven(
        value: usize,
        witness: Option<FixedBitSet>,
        statistics: SearchStatistics,
    ) -> Self {
        debug_assert!(
            witness
                .as_ref()
                .map_or(true, |w| w.count_ones(..) == value),
            "called `QueryOutcome::proven` with a witness whose size differs from {}",
            value
        );
        Self {
            alpha: Alpha::Exact(value),
            termination_reason: TerminationReason::Proven,
            witness,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(reason: R, statistics: SearchStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            alpha: Alpha::Inconclusive,
            termination_reason: TerminationReason::Aborted(reason.into()),
            witness: None,
            statistics,
        }
    }

    #[inline]
    pub fn alpha(&self) -> Alpha {
        self.alpha
    }

    /// Returns the exact value, if known.
    #[inline]
    pub fn value(&self) -> Option<usize> {
        self.alpha.value()
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        self.alpha.is_exact()
    }

    #[inline]
    pub fn is_cached(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::Cached)
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// An independent set of size `value()` found by the last search, if any.
    #[inline]
    pub fn witness(&self) -> Option<&FixedBitSet> {
        self.witness.as_ref()
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "QueryOutcome(alpha: {}, reason: {}, nodes: {})",
            self.alpha, self.termination_reason, self.statistics.nodes_explored
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_outcome() {
        let o = QueryOutcome::cached(3);
        assert_eq!(o.alpha(), Alpha::Exact(3));
        assert_eq!(o.value(), Some(3));
        assert!(o.is_cached());
        assert!(o.witness().is_none());
        assert_eq!(o.statistics().nodes_explored, 0);
    }

    #[test]
    fn test_aborted_outcome() {
        let o = QueryOutcome::aborted("time limit", SearchStatistics::default());
        assert_eq!(o.alpha(), Alpha::Inconclusive);
        assert_eq!(o.value(), None);
        assert!(!o.is_exact());
        assert_eq!(
            o.termination_reason(),
            &TerminationReason::Aborted("time limit".to_string())
        );
        assert_eq!(o.termination_reason().to_string(), "Aborted: time limit");
    }

    #[test]
    fn test_proven_outcome_with_witness() {
        let mut w = FixedBitSet::with_capacity(5);
        w.insert(0);
        w.insert(4);
        let o = QueryOutcome::proven(2, Some(w), SearchStatistics::default());
        assert!(o.is_exact());
        assert!(!o.is_cached());
        assert_eq!(o.witness().map(|w| w.count_ones(..)), Some(2));
        assert_eq!(
            o.to_string(),
            "QueryOutcome(alpha: Exact(2), reason: Proven, nodes: 0)"
        );
    }

    #[test]
    fn test_alpha_display() {
        assert_eq!(Alpha::Exact(7).to_string(), "Exact(7)");
        assert_eq!(Alpha::Inconclusive.to_string(), "Inconclusive");
    }
}
