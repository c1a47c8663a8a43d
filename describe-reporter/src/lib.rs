// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core logic for describe-md.
//!
//! This crate connects a test runner to [`describe_report`]: it loads configuration, ingests the
//! runner's aggregated JSON results, and writes the Markdown report once the run completes.

pub mod config;
pub mod errors;
pub mod reporter;
pub mod results;
