// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading aggregated results produced by a Jest-compatible test runner.
//!
//! The input is the JSON document written by `jest --json`. Only the fields needed to build a
//! report are read; everything else is ignored.

use crate::errors::ResultsParseError;
use camino::Utf8PathBuf;
use describe_report::{AssertionRecord, FileResult, TestStatus};
use serde::Deserialize;
use std::io;

/// Aggregated results for a complete test run.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResults {
    /// Results for each test file, in the order the runner reported them.
    #[serde(default)]
    pub test_results: Vec<TestFileResults>,
}

impl AggregatedResults {
    /// Converts these results into per-file results suitable for building a report.
    pub fn into_file_results(self) -> Vec<FileResult> {
        self.test_results
            .into_iter()
            .map(TestFileResults::into_file_result)
            .collect()
    }
}

/// Results for a single test file.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestFileResults {
    /// The path to the test file.
    #[serde(alias = "testFilePath")]
    pub name: Utf8PathBuf,

    /// The assertions in this file.
    #[serde(default)]
    pub assertion_results: Vec<JsonAssertion>,
}

impl TestFileResults {
    fn into_file_result(self) -> FileResult {
        let mut file = FileResult::new(self.name);
        file.add_assertions(self.assertion_results.into_iter().map(|assertion| {
            AssertionRecord::with_ancestors(
                assertion.ancestor_titles,
                assertion.title,
                TestStatus::from(assertion.status),
            )
        }));
        file
    }
}

/// A single assertion as reported by the runner.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAssertion {
    /// The enclosing describe blocks, outermost first.
    #[serde(default)]
    pub ancestor_titles: Vec<String>,

    /// The name of the test.
    pub title: String,

    /// The outcome, for example `passed` or `failed`.
    pub status: String,
}

/// Parses aggregated results from a JSON string.
///
/// `source_name` describes where the input came from and is used in error messages.
pub fn parse_results(
    input: &str,
    source_name: impl Into<String>,
) -> Result<AggregatedResults, ResultsParseError> {
    serde_json::from_str(input).map_err(|error| ResultsParseError::new(source_name, error))
}

/// Reads aggregated results from a reader.
///
/// `source_name` describes where the input came from and is used in error messages.
pub fn read_results(
    reader: impl io::Read,
    source_name: impl Into<String>,
) -> Result<AggregatedResults, ResultsParseError> {
    serde_json::from_reader(io::BufReader::new(reader))
        .map_err(|error| ResultsParseError::new(source_name, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use describe_report::Report;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_jest_output() {
        let input = indoc! {r#"
            {
              "numTotalTests": 3,
              "success": false,
              "testResults": [
                {
                  "name": "/repo/src/tests/math.test.ts",
                  "status": "failed",
                  "assertionResults": [
                    {
                      "ancestorTitles": [],
                      "fullName": "a",
                      "title": "a",
                      "status": "passed",
                      "duration": 3
                    },
                    {
                      "ancestorTitles": ["G"],
                      "title": "b",
                      "status": "failed",
                      "failureMessages": ["expected 1 to be 2"]
                    },
                    {
                      "ancestorTitles": ["G"],
                      "title": "c",
                      "status": "pending"
                    }
                  ]
                }
              ]
            }
        "#};

        let results = parse_results(input, "inline").expect("results are valid");
        let files = results.into_file_results();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "/repo/src/tests/math.test.ts");
        assert_eq!(
            files[0].assertions,
            vec![
                AssertionRecord::new("a", TestStatus::Passed),
                AssertionRecord::with_ancestors(["G"], "b", TestStatus::Failed),
                AssertionRecord::with_ancestors(["G"], "c", TestStatus::Pending),
            ]
        );

        let mut report = Report::default();
        report.add_files(files);
        assert_eq!(
            report.to_markdown(),
            "# Test Results\n\n## File: math.test.ts\n\n  ✓ a\nG\n  ✗ b\n  ? c\n"
        );
    }

    #[test]
    fn test_file_path_alias_and_defaults() {
        let input = indoc! {r#"
            {
              "testResults": [
                {
                  "testFilePath": "src/empty.test.ts"
                },
                {
                  "testFilePath": "src/flat.test.ts",
                  "assertionResults": [
                    { "title": "no ancestors", "status": "weird" }
                  ]
                }
              ]
            }
        "#};

        let files = parse_results(input, "inline")
            .expect("results are valid")
            .into_file_results();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "src/empty.test.ts");
        assert!(files[0].assertions.is_empty());
        assert_eq!(
            files[1].assertions,
            vec![AssertionRecord::new(
                "no ancestors",
                TestStatus::Unrecognized("weird".to_owned())
            )]
        );
    }

    #[test]
    fn missing_test_results_is_empty() {
        let files = parse_results("{}", "inline")
            .expect("results are valid")
            .into_file_results();
        assert!(files.is_empty());
    }

    #[test]
    fn read_from_reader() {
        let input = r#"{"testResults":[{"name":"a.test.ts","assertionResults":[]}]}"#;
        let results = read_results(input.as_bytes(), "<stdin>").expect("results are valid");
        assert_eq!(results.test_results.len(), 1);
        assert_eq!(results.test_results[0].name, "a.test.ts");
    }

    #[test]
    fn invalid_json_reports_source() {
        let error = parse_results("{ not json", "results.json").expect_err("input is invalid");
        assert_eq!(error.source_name(), "results.json");
        assert_eq!(
            error.to_string(),
            "failed to parse test results from results.json"
        );
    }

    #[test]
    fn missing_title_is_an_error() {
        let input = r#"{"testResults":[{"name":"a.test.ts","assertionResults":[{"status":"passed"}]}]}"#;
        parse_results(input, "inline").expect_err("title is required");
    }
}
