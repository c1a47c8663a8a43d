// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by describe-md.

use camino::Utf8PathBuf;
use config::ConfigError;
use describe_report::SerializeError;
use std::{error::Error, fmt};
use thiserror::Error;

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse describe-md config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    kind: ConfigParseErrorKind,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, kind: ConfigParseErrorKind) -> Self {
        Self {
            config_file: config_file.into(),
            kind,
        }
    }

    /// Returns the config file for this error.
    pub fn config_file(&self) -> &Utf8PathBuf {
        &self.config_file
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> &ConfigParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while parsing the config.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigParseErrorKind {
    /// An error occurred while building the config.
    #[error(transparent)]
    BuildError(Box<ConfigError>),

    /// An error occurred while deserializing the config.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<ConfigError>>),
}

/// An error that occurred while parsing the results reported by a test runner.
#[derive(Debug, Error)]
#[error("failed to parse test results from {source_name}")]
pub struct ResultsParseError {
    source_name: String,
    #[source]
    error: serde_json::Error,
}

impl ResultsParseError {
    pub(crate) fn new(source_name: impl Into<String>, error: serde_json::Error) -> Self {
        Self {
            source_name: source_name.into(),
            error,
        }
    }

    /// Returns a description of where the results were read from.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

/// An error that occurred while writing a Markdown report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteReportError {
    /// An error occurred while operating on the file system.
    #[error("error operating on path {file}")]
    Fs {
        /// The file being operated on.
        file: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// An error occurred while serializing the report.
    #[error("error writing Markdown report to {file}")]
    Serialize {
        /// The output file.
        file: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: SerializeError,
    },
}

/// Displays an error along with the chain of errors that caused it.
///
/// ```text
/// error operating on path /tmp/out
///   caused by:
///   - Not a directory (os error 20)
/// ```
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E: Error> fmt::Debug for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayErrorChain")
            .field("error", &self.error.to_string())
            .finish()
    }
}

impl<E: Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        let mut next = self.error.source();
        if next.is_none() {
            return Ok(());
        }

        write!(f, "\n  caused by:")?;
        while let Some(error) = next {
            // Continuation lines line up with the text after the bullet.
            let message = error.to_string().replace('\n', "\n    ");
            write!(f, "\n  - {message}")?;
            next = error.source();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io;

    #[test]
    fn display_error_chain_without_source() {
        let error = io::Error::other("plain error");
        assert_eq!(DisplayErrorChain::new(&error).to_string(), "plain error");
    }

    #[test]
    fn display_error_chain_with_sources() {
        let error = WriteReportError::Fs {
            file: "out/report.md".into(),
            error: io::Error::other("disk full\nretry later"),
        };

        assert_eq!(
            DisplayErrorChain::new(&error).to_string(),
            indoc! {"
                error operating on path out/report.md
                  caused by:
                  - disk full
                    retry later"
            }
        );
    }

    #[test]
    fn display_error_chain_nested() {
        let error = WriteReportError::Serialize {
            file: "report.md".into(),
            error: SerializeError::from(io::Error::other("broken pipe")),
        };

        assert_eq!(
            DisplayErrorChain::new(&error).to_string(),
            indoc! {"
                error writing Markdown report to report.md
                  caused by:
                  - error serializing Markdown report
                  - broken pipe"
            }
        );
    }
}
