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

//! # Strongly Typed Indices
//!
//! Phantom-tagged wrappers around `usize` so that vertex positions cannot be
//! confused with lengths, counts or generator values. `TypedIndex<T>` carries
//! a tag `T: TypedIndexTag` whose `NAME` shows up in `Debug`/`Display`, and
//! compiles down to a plain `usize` (`#[repr(transparent)]`).
//!
//! Besides the usual conversions the index knows the two pieces of arithmetic
//! a distance graph needs: stepping backwards by a distance inside a finite
//! interval (`checked_sub`) and stepping in either direction around a cycle
//! (`sub_mod` / `add_mod`).
//!
//! ## Usage
//!
//! ```rust
//! use alphadist_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq)]
//! struct SlotTag;
//! impl TypedIndexTag for SlotTag { const NAME: &'static str = "SlotIndex"; }
//!
//! type SlotIndex = TypedIndex<SlotTag>;
//! let s = SlotIndex::new(3);
//! assert_eq!(s.checked_sub(5), None);
//! assert_eq!(s.sub_mod(5, 7).get(), 5);
//! assert_eq!(format!("{}", s), "SlotIndex(3)");
//! ```

/// A tag naming an index space, used for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed index associated with the tag type `T`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` from the given position.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns `true` if this is the first position.
    #[inline(always)]
    pub const fn is_zero(&self) -> bool {
        self.index == 0
    }

    /// Steps `distance` positions towards zero, or `None` if that would
    /// leave the interval.
    ///
    /// ```rust
    /// # use alphadist_core::utils::index::{TypedIndex, TypedIndexTag};
    /// # #[derive(Clone, Copy, PartialEq)] struct Tag;
    /// # impl TypedIndexTag for Tag { const NAME: &'static str = "Idx"; }
    /// assert_eq!(TypedIndex::<Tag>::new(4).checked_sub(4).map(|i| i.get()), Some(0));
    /// assert_eq!(TypedIndex::<Tag>::new(4).checked_sub(5), None);
    /// ```
    #[inline(always)]
    pub const fn checked_sub(self, distance: usize) -> Option<Self> {
        match self.index.checked_sub(distance) {
            Some(index) => Some(Self::new(index)),
            None => None,
        }
    }

    /// Steps `distance` positions backwards around a cycle of length `modulus`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `modulus` is zero or the index does not
    /// lie on the cycle.
    #[inline(always)]
    pub fn sub_mod(self, distance: usize, modulus: usize) -> Self {
        debug_assert!(
            modulus > 0,
            "called `TypedIndex::sub_mod` with a zero modulus"
        );
        debug_assert!(
            self.index < modulus,
            "called `TypedIndex::sub_mod` with index {} outside of the cycle of length {}",
            self.index,
            modulus
        );

        let step = distance % modulus;
        Self::new((self.index + modulus - step) % modulus)
    }

    /// Steps `distance` positions forwards around a cycle of length `modulus`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `modulus` is zero or the index does not
    /// lie on the cycle.
    #[inline(always)]
    pub fn add_mod(self, distance: usize, modulus: usize) -> Self {
        debug_assert!(
            modulus > 0,
            "called `TypedIndex::add_mod` with a zero modulus"
        );
        debug_assert!(
            self.index < modulus,
            "called `TypedIndex::add_mod` with index {} outside of the cycle of length {}",
            self.index,
            modulus
        );

        Self::new((self.index + distance % modulus) % modulus)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

impl<T> std::ops::Add<usize> for TypedIndex<T> {
    type Output = Self;

    fn add(self, rhs: usize) -> Self::Output {
        Self::new(self.index + rhs)
    }
}

impl<T> std::ops::Sub<usize> for TypedIndex<T> {
    type Output = Self;

    fn sub(self, rhs: usize) -> Self::Output {
        Self::new(self.index - rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct TestTag;

    impl TypedIndexTag for TestTag {
        const NAME: &'static str = "TestIdx";
    }

    type TestIndex = TypedIndex<TestTag>;

    #[test]
    fn test_new_and_get() {
        let idx = TestIndex::new(10);
        assert_eq!(idx.get(), 10);
        assert!(!idx.is_zero());
        assert!(TestIndex::new(0).is_zero());
    }

    #[test]
    fn test_conversions() {
        let idx: TestIndex = 42.into();
        assert_eq!(idx.get(), 42);

        let val: usize = idx.into();
        assert_eq!(val, 42);
    }

    #[test]
    fn test_debug_and_display() {
        let idx = TestIndex::new(7);
        assert_eq!(format!("{}", idx), "TestIdx(7)");
        assert_eq!(format!("{:?}", idx), "TestIdx(7)");
    }

    #[test]
    fn test_checked_sub_stays_inside_interval() {
        let idx = TestIndex::new(3);
        assert_eq!(idx.checked_sub(1), Some(TestIndex::new(2)));
        assert_eq!(idx.checked_sub(3), Some(TestIndex::new(0)));
        assert_eq!(idx.checked_sub(4), None);
    }

    #[test]
    fn test_modular_steps_wrap_around_cycle() {
        let idx = TestIndex::new(1);
        assert_eq!(idx.sub_mod(2, 5), TestIndex::new(4));
        assert_eq!(idx.add_mod(4, 5), TestIndex::new(0));

        // Distances larger than the cycle wrap more than once.
        assert_eq!(idx.sub_mod(12, 5), TestIndex::new(4));
        assert_eq!(idx.add_mod(14, 5), TestIndex::new(0));

        // A distance that is a multiple of the modulus is a self loop.
        assert_eq!(idx.sub_mod(10, 5), idx);
        assert_eq!(idx.add_mod(5, 5), idx);
    }

    #[test]
    fn test_arithmetic_ops() {
        let idx = TestIndex::new(10);
        assert_eq!((idx + 5).get(), 15);
        assert_eq!((idx - 5).get(), 5);
    }
}
