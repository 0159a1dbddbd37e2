#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::export::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_FORMAT: &str = "html";
pub const DEFAULT_TEMPLATE_DIR: &str = "themes";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Export settings that may be left unset. Used for both the command line
/// and the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    pub format: Option<String>,
    pub template_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl ExportOptions {
    /// Fills unset fields from `fallback`.
    pub fn or(self, fallback: &ExportOptions) -> ExportOptions {
        ExportOptions {
            format: self.format.or_else(|| fallback.format.clone()),
            template_dir: self.template_dir.or_else(|| fallback.template_dir.clone()),
            output: self.output.or_else(|| fallback.output.clone()),
        }
    }
}

/// Fully resolved settings for one export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub source: PathBuf,
    pub format: String,
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ExportConfig {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self::from_options(source, ExportOptions::default())
    }

    pub fn from_options(source: impl Into<PathBuf>, options: ExportOptions) -> Self {
        Self {
            source: source.into(),
            format: options.format.unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            template_dir: options
                .template_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR)),
            output_dir: options
                .output
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_template_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.template_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source", &self.source.to_string_lossy())?;
        validate_path("template_dir", &self.template_dir.to_string_lossy())?;
        validate_path("output", &self.output_dir.to_string_lossy())?;
        validate_non_empty_string("format", &self.format)?;
        self.format.parse::<OutputFormat>()?;
        Ok(())
    }
}
