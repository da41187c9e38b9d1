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

use thiserror::Error;

/// Errors returned by the query layer for requests the engine cannot serve.
///
/// Running out of time is not an error; it yields an inconclusive answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Queries must cover at least one index.
    #[error("domain size must be at least 1")]
    EmptyDomain,
    /// The domain does not fit into the preallocated tables.
    #[error("domain size {n} exceeds engine capacity {capacity}")]
    DomainExceedsCapacity { n: usize, capacity: usize },
    /// The modulus does not fit into the preallocated cyclic tables.
    #[error("modulus {modulus} exceeds engine capacity {capacity}")]
    ModulusExceedsCapacity { modulus: usize, capacity: usize },
    /// A cyclic prefix cannot be longer than its cycle.
    #[error("cyclic prefix length {n} exceeds modulus {modulus}")]
    PrefixExceedsModulus { n: usize, modulus: usize },
}
