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

//! Memoized bound tables
//!
//! A `BoundTable` stores, for every prefix length k in 0..=capacity, a lower
//! and an upper bound on α of the prefix graph on [0, k). Entry 0 is exact
//! and zero. Fresh entries hold the trivial bounds `1 ≤ α(k) ≤ k`; an entry is
//! exact once both bounds coincide.
//!
//! The engine keeps one table per topology. Since α grows by at most one per
//! additional index, the bounds of an entry can always be tightened from its
//! predecessor (`tightened`) before searching for the exact value. Entries
//! are only written once that value is known.

/// Lower and upper bounds on α for every prefix length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundTable {
    lower: Vec<usize>,
    upper: Vec<usize>,
}

impl BoundTable {
    /// Creates a table for prefix lengths up to `capacity` with trivial bounds.
    pub fn new(capacity: usize) -> Self {
        let mut table = Self {
            lower: vec![0; capacity + 1],
            upper: vec![0; capacity + 1],
        };
        table.reset_trivial();
        table
    }

    /// Resets every entry to the trivial bounds.
    pub fn reset_trivial(&mut self) {
        for (k, (lo, hi)) in self.lower.iter_mut().zip(self.upper.iter_mut()).enumerate() {
            *lo = k.min(1);
            *hi = k;
        }
    }

    /// The largest prefix length the table can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.lower.len() - 1
    }

    #[inline]
    pub fn lower(&self, k: usize) -> usize {
        self.lower[k]
    }

    #[inline]
    pub fn upper(&self, k: usize) -> usize {
        self.upper[k]
    }

    /// Returns `(lower, upper)` for prefix length `k`.
    #[inline]
    pub fn bounds(&self, k: usize) -> (usize, usize) {
        (self.lower[k], self.upper[k])
    }

    #[inline]
    pub fn is_exact(&self, k: usize) -> bool {
        self.lower[k] == self.upper[k]
    }

    /// Returns α(k) if the entry is exact.
    #[inline]
    pub fn exact(&self, k: usize) -> Option<usize> {
        self.is_exact(k).then_some(self.lower[k])
    }

    /// Returns the bounds of entry `k` tightened by entry `k - 1`, using
    /// α(k-1) ≤ α(k) ≤ α(k-1) + 1. The table is left unchanged.
    #[inline]
    pub fn tightened(&self, k: usize) -> (usize, usize) {
        debug_assert!(
            k >= 1,
            "called `BoundTable::tightened` with prefix length 0"
        );
        (
            self.lower[k].max(self.lower[k - 1]),
            self.upper[k].min(self.upper[k - 1] + 1),
        )
    }

    /// Records α(k) = `value`.
    #[inline]
    pub fn set_exact(&mut self, k: usize, value: usize) {
        debug_assert!(
            self.lower[k] <= value && value <= self.upper[k],
            "called `BoundTable::set_exact` with value {} outside bounds [{}, {}] at prefix length {}",
            value,
            self.lower[k],
            self.upper[k],
            k
        );
        self.lower[k] = value;
        self.upper[k] = value;
    }

    /// Returns the length of the longest prefix 0..=k whose entries are all exact.
    pub fn exact_prefix_len(&self) -> usize {
        (1..=self.capacity())
            .find(|&k| !self.is_exact(k))
            .map_or(self.capacity(), |k| k - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivial_bounds() {
        let t = BoundTable::new(4);
        assert_eq!(t.capacity(), 4);
        assert_eq!(t.bounds(0), (0, 0));
        assert_eq!(t.bounds(1), (1, 1));
        assert_eq!(t.bounds(3), (1, 3));
        assert_eq!(t.exact(0), Some(0));
        assert_eq!(t.exact(1), Some(1));
        assert_eq!(t.exact(2), None);
        assert_eq!(t.exact_prefix_len(), 1);
    }

    #[test]
    fn test_tightened_uses_previous_entry() {
        let mut t = BoundTable::new(5);
        t.set_exact(2, 1);
        assert_eq!(t.tightened(3), (1, 2));
        // The entry itself is not written.
        assert_eq!(t.bounds(3), (1, 3));
        t.set_exact(3, 2);
        assert_eq!(t.tightened(4), (2, 3));
    }

    #[test]
    fn test_tightened_never_loosens() {
        let mut t = BoundTable::new(4);
        t.set_exact(2, 2);
        t.set_exact(3, 2);
        assert_eq!(t.tightened(3), (2, 2));
    }

    #[test]
    fn test_reset_trivial_discards_exact_entries() {
        let mut t = BoundTable::new(3);
        t.set_exact(2, 1);
        t.set_exact(3, 2);
        assert_eq!(t.exact_prefix_len(), 3);
        t.reset_trivial();
        assert_eq!(t, BoundTable::new(3));
    }
}
