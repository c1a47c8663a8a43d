// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError, Result,
    exit_codes::DescribeMdExitCode,
    output::{OutputContext, OutputOpts, OutputWriter},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use describe_report::FileResult;
use describe_reporter::{config::ReporterConfig, reporter::MarkdownReporter, results};
use std::io::Write;
use tracing::debug;

/// Render Jest-style test results as a hierarchical Markdown report.
///
/// Tests are grouped by file, then nested under the describe blocks that declare them.
#[derive(Debug, Parser)]
#[command(
    version,
    name = "describe-md",
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct DescribeMdApp {
    #[clap(flatten)]
    output: OutputOpts,

    #[clap(subcommand)]
    command: Command,
}

impl DescribeMdApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app.
    ///
    /// Returns the exit code.
    pub fn exec(self, output_writer: &mut OutputWriter) -> Result<i32> {
        match self.command {
            Command::Report(opts) => opts.exec(),
            Command::Render(opts) => opts.exec(output_writer),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a Markdown report for a completed test run
    ///
    /// The report is written to the path configured in `[markdown]`, relative to the workspace
    /// root. A failure to write the report is logged, but doesn't change the exit code.
    Report(ReportOpts),

    /// Print the Markdown report to standard output
    Render(RenderOpts),
}

#[derive(Debug, Args)]
struct ReportOpts {
    #[clap(flatten)]
    common: CommonOpts,

    /// Output path, overriding the configured one [default: src/tests/testCaseTitles.md]
    ///
    /// Relative paths are resolved against the workspace root.
    #[arg(long, short, value_name = "PATH", env = "DESCRIBE_MD_OUTPUT")]
    output: Option<Utf8PathBuf>,
}

impl ReportOpts {
    fn exec(self) -> Result<i32> {
        let mut config = self.common.make_config()?;
        if let Some(output) = self.output {
            config.markdown_mut().set_path(output);
        }
        let files = self.common.read_results()?;

        let reporter = MarkdownReporter::from_config(&config);
        debug!("writing Markdown report to {}", reporter.output_path());
        reporter.on_run_complete(files);

        Ok(DescribeMdExitCode::OK)
    }
}

#[derive(Debug, Args)]
struct RenderOpts {
    #[clap(flatten)]
    common: CommonOpts,
}

impl RenderOpts {
    fn exec(self, output_writer: &mut OutputWriter) -> Result<i32> {
        let config = self.common.make_config()?;
        let files = self.common.read_results()?;

        let reporter = MarkdownReporter::from_config(&config);
        let report = reporter.build_report(files);

        let mut writer = output_writer.stdout_writer();
        writer
            .write_all(report.to_markdown().as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|err| ExpectedError::WriteOutputError { err })?;

        Ok(DescribeMdExitCode::OK)
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Input options")]
struct CommonOpts {
    /// Aggregated test results in Jest JSON format, or `-` for standard input
    #[arg(long, short, value_name = "PATH")]
    results: Utf8PathBuf,

    /// Directory that relative paths are resolved against [default: current directory]
    #[arg(long, value_name = "DIR")]
    workspace_root: Option<Utf8PathBuf>,

    /// Config file [default: workspace-root/.config/describe-md.toml]
    #[arg(long, value_name = "PATH")]
    config_file: Option<Utf8PathBuf>,
}

impl CommonOpts {
    fn workspace_root(&self) -> Result<Utf8PathBuf> {
        match &self.workspace_root {
            Some(workspace_root) => Ok(workspace_root.clone()),
            None => {
                let current_dir = std::env::current_dir()
                    .map_err(|err| ExpectedError::CurrentDirFailed { err })?;
                Utf8PathBuf::try_from(current_dir)
                    .map_err(|err| ExpectedError::CurrentDirInvalidUtf8 { err })
            }
        }
    }

    fn make_config(&self) -> Result<ReporterConfig> {
        let workspace_root = self.workspace_root()?;
        Ok(ReporterConfig::from_sources(
            workspace_root,
            self.config_file.as_deref(),
        )?)
    }

    fn read_results(&self) -> Result<Vec<FileResult>> {
        let results = if self.results == Utf8Path::new("-") {
            results::read_results(std::io::stdin().lock(), "standard input")?
        } else {
            let file = std::fs::File::open(&self.results)
                .map_err(|err| ExpectedError::results_read_error(&self.results, err))?;
            results::read_results(file, self.results.as_str())?
        };

        let files = results.into_file_results();
        debug!("read results for {} test files", files.len());
        Ok(files)
    }
}
