// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render Jest-style test results as a hierarchical Markdown report.
//!
//! `describe-md report` writes the report to the configured location, and `describe-md render`
//! prints it to standard output. See [`describe_reporter::config`] for configuration.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod exit_codes;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
pub use exit_codes::DescribeMdExitCode;
#[doc(hidden)]
pub use output::{OutputContext, OutputWriter, StderrStyles};
