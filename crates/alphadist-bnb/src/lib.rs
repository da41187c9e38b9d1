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

//! Alphadist branch-and-bound engine
//!
//! Computes independence numbers α of interval and cyclic distance graphs
//! for a fixed generator set, one prefix length at a time, reusing every
//! exact answer as a bound for the next.
//!
//! Module map
//! - `blocking`: per-index selected/excluded/free marks with scoped undo guards.
//! - `tables`: memoized lower/upper bounds per prefix length.
//! - `estimate`: the interval decomposition upper bound.
//! - `bnb`: the recursive decision procedure and its pruning rules.
//! - `engine`: the incremental query layer and its configuration.
//! - `monitor`: observers that log or stop the search.
//! - `result`, `stats`, `error`: outcomes, counters and caller errors.

pub mod blocking;
pub mod bnb;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod monitor;
pub mod result;
pub mod stats;
pub mod tables;
