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

//! Generator sets
//!
//! A `GeneratorSet` is the ordered list of forbidden distances S. It is fixed
//! for the lifetime of an engine and validated once on construction: the set
//! must be non-empty and every distance must be positive. Duplicates are
//! accepted and preserved, as the order given by the caller is also used for
//! report labels.

use thiserror::Error;

/// Errors returned when constructing a `GeneratorSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeneratorSetError {
    /// No generators were supplied.
    #[error("generator set must contain at least one distance")]
    Empty,
    /// A generator of zero would make every vertex adjacent to itself.
    #[error("generator at position {position} is zero; distances must be positive")]
    ZeroGenerator { position: usize },
}

/// An ordered, validated sequence of positive distances.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratorSet {
    generators: Vec<usize>,
}

impl GeneratorSet {
    /// Creates a new generator set, rejecting empty input and zero distances.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use alphadist_model::generators::{GeneratorSet, GeneratorSetError};
    ///
    /// let s = GeneratorSet::new(vec![1, 4]).unwrap();
    /// assert_eq!(s.as_slice(), &[1, 4]);
    ///
    /// assert_eq!(GeneratorSet::new(vec![]), Err(GeneratorSetError::Empty));
    /// assert_eq!(
    ///     GeneratorSet::new(vec![3, 0]),
    ///     Err(GeneratorSetError::ZeroGenerator { position: 1 })
    /// );
    /// ```
    pub fn new(generators: Vec<usize>) -> Result<Self, GeneratorSetError> {
        if generators.is_empty() {
            return Err(GeneratorSetError::Empty);
        }
        if let Some(position) = generators.iter().position(|&g| g == 0) {
            return Err(GeneratorSetError::ZeroGenerator { position });
        }
        Ok(Self { generators })
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.generators
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.generators.iter()
    }

    /// Returns the largest distance in the set.
    #[inline]
    pub fn max_distance(&self) -> usize {
        self.generators.iter().copied().max().unwrap_or(0)
    }

    /// Returns `true` if `distance` is one of the generators.
    #[inline]
    pub fn contains(&self, distance: usize) -> bool {
        self.generators.contains(&distance)
    }

    /// Returns `true` if some generator is a multiple of `modulus`.
    ///
    /// Such a generator is congruent to zero modulo `modulus`, so the cyclic
    /// graph on Z_modulus would carry a self-loop on every vertex.
    #[inline]
    pub fn has_multiple_of(&self, modulus: usize) -> bool {
        debug_assert!(
            modulus > 0,
            "called `GeneratorSet::has_multiple_of` with zero modulus"
        );
        self.generators.iter().any(|&g| g % modulus == 0)
    }

    /// Returns `true` if `distance` is congruent to some generator modulo `modulus`.
    #[inline]
    pub fn contains_modulo(&self, distance: usize, modulus: usize) -> bool {
        debug_assert!(
            modulus > 0,
            "called `GeneratorSet::contains_modulo` with zero modulus"
        );
        let distance = distance % modulus;
        self.generators.iter().any(|&g| g % modulus == distance)
    }
}

impl<'a> IntoIterator for &'a GeneratorSet {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<Vec<usize>> for GeneratorSet {
    type Error = GeneratorSetError;

    fn try_from(generators: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(generators)
    }
}

impl TryFrom<&[usize]> for GeneratorSet {
    type Error = GeneratorSetError;

    fn try_from(generators: &[usize]) -> Result<Self, Self::Error> {
        Self::new(generators.to_vec())
    }
}

impl std::fmt::Display for GeneratorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, g) in self.generators.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", g)?;
        }
        write!(f, "}}")
    }
}
