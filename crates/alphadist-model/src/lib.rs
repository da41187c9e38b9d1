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

//! Alphadist model: the graphs the search runs on
//!
//! A distance graph is fully described by a `GeneratorSet` S (the forbidden
//! distances) and a `Topology`: either the finite interval {0, …, n-1} with
//! i ~ j iff |i - j| ∈ S, or the first n residues of Z_N with
//! i ~ j iff (i - j) mod N ∈ S or (j - i) mod N ∈ S.
//!
//! Module map
//! - `index`: the typed `VertexIndex`.
//! - `generators`: validated generator sets.
//! - `topology`: interval/cyclic adjacency and neighbor enumeration.
//! - `oracle`: independence checks and an exhaustive α oracle for small n,
//!   used to validate the branch-and-bound engine.

pub mod generators;
pub mod index;
pub mod oracle;
pub mod topology;
