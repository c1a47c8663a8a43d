// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Build and render hierarchical Markdown test reports in Rust.
//!
//! Test runners typically report one flat record per test case, where each record carries the
//! names of the `describe` blocks enclosing it. This crate folds those records back into a tree of
//! groups ([`GroupTree`]) and serializes a whole run ([`Report`]) as an indented Markdown document:
//!
//! ```text
//! # Test Results
//!
//! ## File: math.test.ts
//!
//!   ✓ top-level test
//! Calculator
//!   ✗ divides by zero
//!   rounding
//!     ? rounds half up
//! ```

mod errors;
mod report;
mod serialize;
mod tree;

pub use errors::*;
pub use report::*;
pub use tree::*;
