// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `describe-md` failures.
///
/// A failure to write the Markdown report at the end of `describe-md report` is logged but does
/// not change the exit code.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum DescribeMdExitCode {}

impl DescribeMdExitCode {
    /// No errors occurred and describe-md exited normally.
    pub const OK: i32 = 0;

    /// A user issue happened while setting up a describe-md invocation.
    pub const SETUP_ERROR: i32 = 96;

    /// Reading or parsing the test results produced an error.
    pub const RESULTS_READ_FAILED: i32 = 97;

    /// Writing data to stdout or stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
