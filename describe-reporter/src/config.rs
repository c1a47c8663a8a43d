// Copyright (c) The describe-md Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for describe-md.
//!
//! Configuration is layered: the embedded [default config](ReporterConfig::DEFAULT_CONFIG) comes
//! first, followed by either an explicitly provided config file or `.config/describe-md.toml` in
//! the workspace root.

use crate::errors::{ConfigParseError, ConfigParseErrorKind};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, builder::DefaultState};
use itertools::Itertools;
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::warn;

/// Overall configuration for describe-md.
#[derive(Clone, Debug)]
pub struct ReporterConfig {
    workspace_root: Utf8PathBuf,
    markdown: MarkdownConfig,
}

impl ReporterConfig {
    /// The default location of the config within the workspace root.
    pub const CONFIG_PATH: &'static str = ".config/describe-md.toml";

    /// Contains the default config as a TOML file.
    ///
    /// Repository-specific configuration is layered on top of the default config.
    pub const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

    /// Reads the config from the given file, or if not specified from `.config/describe-md.toml`
    /// in the workspace root.
    ///
    /// If no config file is specified and the workspace root doesn't have
    /// `.config/describe-md.toml`, uses the default config options.
    pub fn from_sources(
        workspace_root: impl Into<Utf8PathBuf>,
        config_file: Option<&Utf8Path>,
    ) -> Result<Self, ConfigParseError> {
        let workspace_root = workspace_root.into();

        let (config_file, source) = match config_file {
            Some(file) => (file.to_owned(), File::new(file.as_str(), FileFormat::Toml)),
            None => {
                let config_file = workspace_root.join(Self::CONFIG_PATH);
                let source = File::new(config_file.as_str(), FileFormat::Toml).required(false);
                (config_file, source)
            }
        };

        let builder = Self::make_default_config().add_source(source);
        let (config, unknown) = Self::build_and_deserialize_config(&builder)
            .map_err(|kind| ConfigParseError::new(&config_file, kind))?;

        if !unknown.is_empty() {
            warn!(
                "in config file {}, ignoring unknown configuration keys: {}",
                config_file,
                unknown.iter().join(", "),
            );
        }

        Ok(Self {
            workspace_root,
            markdown: MarkdownConfig::new(config.markdown),
        })
    }

    /// Returns the workspace root that relative paths are resolved against.
    pub fn workspace_root(&self) -> &Utf8Path {
        &self.workspace_root
    }

    /// Returns the Markdown report configuration.
    pub fn markdown(&self) -> &MarkdownConfig {
        &self.markdown
    }

    /// Returns a mutable reference to the Markdown report configuration.
    pub fn markdown_mut(&mut self) -> &mut MarkdownConfig {
        &mut self.markdown
    }

    /// Returns the absolute path the Markdown report is written to.
    pub fn output_path(&self) -> Utf8PathBuf {
        self.markdown.path(&self.workspace_root)
    }

    fn make_default_config() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(Self::DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// This returns a tuple of (config, ignored paths).
    fn build_and_deserialize_config(
        builder: &ConfigBuilder<DefaultState>,
    ) -> Result<(ReporterConfigDeserialize, BTreeSet<String>), ConfigParseErrorKind> {
        let config = builder
            .build_cloned()
            .map_err(|error| ConfigParseErrorKind::BuildError(Box::new(error)))?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let config: ReporterConfigDeserialize = serde_path_to_error::deserialize(ignored_de)
            .map_err(|error| {
                // The config crate also reports the key; drop it in favor of the serde path.
                let path = error.path().clone();
                let error = match error.into_inner() {
                    ConfigError::At { error, .. } => *error,
                    other => other,
                };
                ConfigParseErrorKind::DeserializeError(Box::new(serde_path_to_error::Error::new(
                    path, error,
                )))
            })?;

        Ok((config, ignored))
    }
}

/// Configuration for the Markdown report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkdownConfig {
    // Stored as given; joined with the workspace root when accessed.
    path: Utf8PathBuf,
    report_name: String,
}

impl MarkdownConfig {
    fn new(data: MarkdownImpl) -> Self {
        Self {
            path: data.path,
            report_name: data.report_name,
        }
    }

    /// Returns the absolute path to the Markdown report.
    ///
    /// Relative paths are resolved against `workspace_root`. Absolute paths are returned as-is.
    pub fn path(&self, workspace_root: &Utf8Path) -> Utf8PathBuf {
        workspace_root.join(&self.path)
    }

    /// Overrides the path to the Markdown report.
    pub fn set_path(&mut self, path: impl Into<Utf8PathBuf>) -> &mut Self {
        self.path = path.into();
        self
    }

    /// Returns the top-level heading of the report.
    pub fn report_name(&self) -> &str {
        &self.report_name
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ReporterConfigDeserialize {
    markdown: MarkdownImpl,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct MarkdownImpl {
    path: Utf8PathBuf,
    report_name: String,
}
