//! Configuration for the adf toolchain.
//!
//! Layers, lowest first: the embedded `defaults/adf.default.toml`, an optional
//! `adf.toml` next to the invocation, an explicit `--config` file, then single
//! key overrides. Every key has a default, so a partial user file is enough.

use adf_babel::template::TemplateDefaults;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/adf.default.toml");

/// Resolved configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AdfConfig {
    pub output: OutputConfig,
    pub template: TemplateConfig,
}

/// How converted documents are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub pretty: bool,
    pub validate: bool,
}

/// Fallbacks for ticket template metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    pub default_project: String,
    pub default_priority: String,
}

impl From<&TemplateConfig> for TemplateDefaults {
    fn from(config: &TemplateConfig) -> Self {
        TemplateDefaults {
            project_key: config.default_project.clone(),
            priority: config.default_priority.clone(),
        }
    }
}

/// Builds an [`AdfConfig`] from the embedded defaults plus user layers.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// A loader holding only the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Adds a TOML file that must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Adds a TOML file that is skipped when absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Overrides one dotted key, e.g. `output.pretty`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merges all layers. Fails on unreadable files or mistyped values.
    pub fn build(self) -> Result<AdfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<AdfConfig, ConfigError> {
    Loader::new().build()
}
