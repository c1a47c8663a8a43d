// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writes Markdown reports once a test run completes.

use crate::{
    config::ReporterConfig,
    errors::{DisplayErrorChain, WriteReportError},
};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use camino::{Utf8Path, Utf8PathBuf};
use describe_report::{FileResult, Report};
use tracing::{debug, error};

/// Produces a Markdown report from the results of a completed test run.
#[derive(Clone, Debug)]
pub struct MarkdownReporter {
    output_path: Utf8PathBuf,
    report_name: String,
}

impl MarkdownReporter {
    /// Creates a new reporter that writes to `output_path`.
    pub fn new(output_path: impl Into<Utf8PathBuf>, report_name: impl Into<String>) -> Self {
        Self {
            output_path: output_path.into(),
            report_name: report_name.into(),
        }
    }

    /// Creates a new reporter from the given configuration.
    pub fn from_config(config: &ReporterConfig) -> Self {
        Self::new(config.output_path(), config.markdown().report_name())
    }

    /// Returns the path the report is written to.
    pub fn output_path(&self) -> &Utf8Path {
        &self.output_path
    }

    /// Returns the name of the report, used as its top-level heading.
    pub fn report_name(&self) -> &str {
        &self.report_name
    }

    /// Builds a report out of the given per-file results.
    pub fn build_report(&self, files: impl IntoIterator<Item = FileResult>) -> Report {
        let mut report = Report::new(self.report_name.as_str());
        report.add_files(files);
        report
    }

    /// Called once the test run is complete.
    ///
    /// Builds the report and writes it out. Errors are logged and otherwise ignored, so a failure
    /// to produce the report never affects the outcome of the run.
    pub fn on_run_complete(&self, files: impl IntoIterator<Item = FileResult>) {
        let report = self.build_report(files);
        if let Err(error) = self.write_report(&report) {
            error!(
                "failed to write Markdown report: {}",
                DisplayErrorChain::new(&error)
            );
        }
    }

    /// Writes the report to the output path, replacing any existing file.
    ///
    /// Parent directories are created if necessary.
    pub fn write_report(&self, report: &Report) -> Result<(), WriteReportError> {
        let output_path = &self.output_path;
        if let Some(output_dir) = output_path.parent() {
            // A bare file name has an empty parent, which is the current directory.
            if !output_dir.as_str().is_empty() {
                std::fs::create_dir_all(output_dir).map_err(|error| WriteReportError::Fs {
                    file: output_dir.to_owned(),
                    error,
                })?;
            }
        }

        AtomicFile::new(output_path, OverwriteBehavior::AllowOverwrite)
            .write(|f| report.serialize(f))
            .map_err(|error| match error {
                atomicwrites::Error::Internal(error) => WriteReportError::Fs {
                    file: output_path.clone(),
                    error,
                },
                atomicwrites::Error::User(error) => WriteReportError::Serialize {
                    file: output_path.clone(),
                    error,
                },
            })?;

        debug!(
            "wrote Markdown report with {} files and {} assertions to {}",
            report.files.len(),
            report.assertion_count(),
            output_path,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::tempdir;
    use camino_tempfile_ext::prelude::*;
    use describe_report::{AssertionRecord, TestStatus};
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn sample_file() -> FileResult {
        let mut file = FileResult::new("/repo/src/tests/sample.test.ts");
        file.add_assertions([
            AssertionRecord::new("a", TestStatus::Passed),
            AssertionRecord::with_ancestors(["G"], "b", TestStatus::Failed),
            AssertionRecord::with_ancestors(["G"], "c", TestStatus::Skipped),
        ]);
        file
    }

    #[test]
    fn writes_report_creating_parent_dirs() {
        let temp_dir = tempdir().expect("tempdir created");
        let output_path = temp_dir.path().join("src/tests/testCaseTitles.md");
        let reporter = MarkdownReporter::new(&output_path, "Test Results");

        reporter.on_run_complete([sample_file()]);

        let contents = std::fs::read_to_string(&output_path).expect("report was written");
        assert_eq!(
            contents,
            indoc! {"
                # Test Results

                ## File: sample.test.ts

                  ✓ a
                G
                  ✗ b
                  ? c
            "}
        );
    }

    #[test]
    fn overwrites_existing_report() {
        let temp_dir = tempdir().expect("tempdir created");
        let output = temp_dir.child("report.md");
        output
            .write_str("stale contents that are much longer than the new report\n")
            .expect("stale report written");

        let reporter = MarkdownReporter::new(output.to_path_buf(), "Test Results");
        reporter.on_run_complete([]);

        let contents = std::fs::read_to_string(output.to_path_buf()).expect("report was written");
        assert_eq!(contents, "# Test Results\n");
    }

    #[test]
    fn zero_files_still_written() {
        let temp_dir = tempdir().expect("tempdir created");
        let output_path = temp_dir.path().join("out/empty.md");
        let reporter = MarkdownReporter::new(&output_path, "Empty Run");

        let report = reporter.build_report([]);
        reporter.write_report(&report).expect("write succeeds");

        let contents = std::fs::read_to_string(&output_path).expect("report was written");
        assert_eq!(contents, "# Empty Run\n");
    }

    #[test]
    fn unwritable_destination_is_swallowed() {
        let temp_dir = tempdir().expect("tempdir created");
        // A regular file where the parent directory should be.
        let blocker = temp_dir.child("blocker");
        blocker.write_str("not a directory").expect("blocker written");
        let blocker = blocker.to_path_buf();
        let output_path = blocker.join("report.md");
        let reporter = MarkdownReporter::new(&output_path, "Test Results");

        let report = reporter.build_report([sample_file()]);
        let error = reporter
            .write_report(&report)
            .expect_err("parent is a regular file");
        assert!(
            matches!(&error, WriteReportError::Fs { file, .. } if *file == blocker),
            "unexpected error: {error:?}"
        );

        // The run-completion hook logs the same failure and returns normally.
        reporter.on_run_complete([sample_file()]);
        assert!(!output_path.exists());
    }

    #[test]
    fn from_config_uses_configured_values() {
        let temp_dir = tempdir().expect("tempdir created");
        temp_dir
            .child(ReporterConfig::CONFIG_PATH)
            .write_str(indoc! {r#"
                [markdown]
                path = "reports/titles.md"
                report-name = "Suite Titles"
            "#})
            .expect("config written");

        let config =
            ReporterConfig::from_sources(temp_dir.path(), None).expect("config is valid");
        let reporter = MarkdownReporter::from_config(&config);
        assert_eq!(
            reporter.output_path(),
            temp_dir.path().join("reports/titles.md")
        );
        assert_eq!(reporter.report_name(), "Suite Titles");

        reporter.on_run_complete([sample_file()]);
        let contents = std::fs::read_to_string(reporter.output_path()).expect("report written");
        assert!(contents.starts_with("# Suite Titles\n\n## File: sample.test.ts\n"));
    }
}
