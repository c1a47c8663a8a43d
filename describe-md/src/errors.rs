// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    exit_codes::DescribeMdExitCode,
    output::{NO_HEADING_TARGET, StderrStyles},
};
use camino::{FromPathBufError, Utf8PathBuf};
use describe_reporter::errors::{ConfigParseError, ResultsParseError};
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An expected failure, reported to the user with a documented exit code.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("could not determine current directory")]
    CurrentDirFailed {
        #[source]
        err: std::io::Error,
    },
    #[error("current directory is not valid UTF-8")]
    CurrentDirInvalidUtf8 {
        #[source]
        err: FromPathBufError,
    },
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("results read error")]
    ResultsReadError {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("results parse error")]
    ResultsParseError {
        #[from]
        err: ResultsParseError,
    },
    #[error("error writing to output")]
    WriteOutputError {
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    pub(crate) fn results_read_error(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::ResultsReadError {
            path: path.into(),
            err,
        }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::CurrentDirFailed { .. }
            | Self::CurrentDirInvalidUtf8 { .. }
            | Self::ConfigParseError { .. } => DescribeMdExitCode::SETUP_ERROR,
            Self::ResultsReadError { .. } | Self::ResultsParseError { .. } => {
                DescribeMdExitCode::RESULTS_READ_FAILED
            }
            Self::WriteOutputError { .. } => DescribeMdExitCode::WRITE_OUTPUT_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::CurrentDirFailed { err } => {
                error!("could not determine current directory");
                Some(err as &dyn Error)
            }
            Self::CurrentDirInvalidUtf8 { err } => {
                error!(
                    "current directory `{}` is not valid UTF-8",
                    err.as_path().display().style(styles.bold)
                );
                None
            }
            Self::ConfigParseError { err } => {
                error!(
                    "failed to parse describe-md config at `{}`",
                    err.config_file().style(styles.bold)
                );
                Some(err.kind() as &dyn Error)
            }
            Self::ResultsReadError { path, err } => {
                error!(
                    "failed to read test results from `{}`",
                    path.style(styles.bold)
                );
                Some(err as &dyn Error)
            }
            Self::ResultsParseError { err } => {
                error!(
                    "failed to parse test results from `{}`",
                    err.source_name().style(styles.bold)
                );
                err.source()
            }
            Self::WriteOutputError { err } => {
                error!("error writing to output");
                Some(err as &dyn Error)
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
