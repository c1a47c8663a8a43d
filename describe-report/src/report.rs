// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::SerializeError, serialize::serialize_report, tree::GroupTree};
use camino::{Utf8Path, Utf8PathBuf};
use std::{fmt, io};

/// The name used for a [`Report`] when none is configured.
pub const DEFAULT_REPORT_NAME: &str = "Test Results";

/// The root of a Markdown test report.
///
/// A report holds the results of one complete test run, one [`FileResult`] per test file, in the
/// order the runner reported them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    /// The name of this report, rendered as the top-level heading.
    pub name: String,

    /// The per-file results contained in this report.
    pub files: Vec<FileResult>,
}

impl Report {
    /// Creates a new, empty `Report` with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: vec![],
        }
    }

    /// Adds the results for a single test file.
    pub fn add_file(&mut self, file: FileResult) -> &mut Self {
        self.files.push(file);
        self
    }

    /// Adds the results for several test files, preserving their order.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = FileResult>) -> &mut Self {
        for file in files {
            self.add_file(file);
        }
        self
    }

    /// Returns the total number of assertions across all files.
    pub fn assertion_count(&self) -> usize {
        self.files.iter().map(|file| file.assertions.len()).sum()
    }

    /// Renders this report as a Markdown document.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        serialize_report(self, &mut out);
        out
    }

    /// Serialize this report to the given writer.
    pub fn serialize(&self, mut writer: impl io::Write) -> Result<(), SerializeError> {
        writer.write_all(self.to_markdown().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_NAME)
    }
}

/// The results reported for a single test file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileResult {
    /// The path to the test file, as reported by the runner.
    pub path: Utf8PathBuf,

    /// The assertions in this file, in the order they were reported.
    pub assertions: Vec<AssertionRecord>,
}

impl FileResult {
    /// Creates a new `FileResult` with no assertions.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            assertions: vec![],
        }
    }

    /// Adds an assertion to this file.
    pub fn add_assertion(&mut self, assertion: AssertionRecord) -> &mut Self {
        self.assertions.push(assertion);
        self
    }

    /// Adds several assertions to this file, preserving their order.
    pub fn add_assertions(
        &mut self,
        assertions: impl IntoIterator<Item = AssertionRecord>,
    ) -> &mut Self {
        for assertion in assertions {
            self.add_assertion(assertion);
        }
        self
    }

    /// Returns the name this file is listed under in the report.
    ///
    /// This is the final component of the path, or the whole path if it doesn't have one (for
    /// example, `..`).
    pub fn base_name(&self) -> &str {
        base_name(&self.path)
    }

    /// Builds the group hierarchy for this file's assertions.
    pub fn group_tree(&self) -> GroupTree {
        GroupTree::from_assertions(&self.assertions)
    }
}

fn base_name(path: &Utf8Path) -> &str {
    path.file_name().unwrap_or(path.as_str())
}

/// A single test case outcome, along with the groups it was declared in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssertionRecord {
    /// The names of the enclosing groups, from outermost to innermost.
    ///
    /// Empty if the test was declared at the top level of its file.
    pub ancestor_titles: Vec<String>,

    /// The test's own name.
    pub title: String,

    /// The outcome of the test.
    pub status: TestStatus,
}

impl AssertionRecord {
    /// Creates a record for a test declared outside of any group.
    pub fn new(title: impl Into<String>, status: TestStatus) -> Self {
        Self {
            ancestor_titles: vec![],
            title: title.into(),
            status,
        }
    }

    /// Creates a record for a test nested within the given groups, outermost first.
    pub fn with_ancestors(
        ancestor_titles: impl IntoIterator<Item = impl Into<String>>,
        title: impl Into<String>,
        status: TestStatus,
    ) -> Self {
        Self {
            ancestor_titles: ancestor_titles.into_iter().map(Into::into).collect(),
            title: title.into(),
            status,
        }
    }
}

/// The outcome of a test case.
///
/// Runners report a small set of well-known outcomes. Anything else is preserved as
/// [`TestStatus::Unrecognized`] rather than rejected, so that newer runners don't break report
/// generation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TestStatus {
    /// The test passed.
    Passed,

    /// The test failed.
    Failed,

    /// The test was skipped.
    Skipped,

    /// The test was declared but not run.
    Pending,

    /// The test is a placeholder with no body.
    Todo,

    /// The test was disabled.
    Disabled,

    /// The test was focused, and other tests were filtered out.
    Focused,

    /// A status this crate doesn't know about.
    Unrecognized(String),
}

impl TestStatus {
    /// The icon for [`TestStatus::Passed`].
    pub const PASSED_ICON: char = '✓';

    /// The icon for [`TestStatus::Failed`].
    pub const FAILED_ICON: char = '✗';

    /// The icon for every other status, including unrecognized ones.
    pub const OTHER_ICON: char = '?';

    /// Returns the string form of this status, as reported by the runner.
    pub fn as_str(&self) -> &str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Skipped => "skipped",
            TestStatus::Pending => "pending",
            TestStatus::Todo => "todo",
            TestStatus::Disabled => "disabled",
            TestStatus::Focused => "focused",
            TestStatus::Unrecognized(status) => status,
        }
    }

    /// Returns the icon this status is rendered with.
    pub fn icon(&self) -> char {
        match self {
            TestStatus::Passed => Self::PASSED_ICON,
            TestStatus::Failed => Self::FAILED_ICON,
            TestStatus::Skipped
            | TestStatus::Pending
            | TestStatus::Todo
            | TestStatus::Disabled
            | TestStatus::Focused
            | TestStatus::Unrecognized(_) => Self::OTHER_ICON,
        }
    }
}

impl From<&str> for TestStatus {
    fn from(status: &str) -> Self {
        match status {
            "passed" => TestStatus::Passed,
            "failed" => TestStatus::Failed,
            "skipped" => TestStatus::Skipped,
            "pending" => TestStatus::Pending,
            "todo" => TestStatus::Todo,
            "disabled" => TestStatus::Disabled,
            "focused" => TestStatus::Focused,
            other => TestStatus::Unrecognized(other.to_owned()),
        }
    }
}

impl From<String> for TestStatus {
    fn from(status: String) -> Self {
        match TestStatus::from(status.as_str()) {
            TestStatus::Unrecognized(_) => TestStatus::Unrecognized(status),
            known => known,
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
