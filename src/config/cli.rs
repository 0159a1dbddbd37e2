use crate::config::toml_config::FileConfig;
use crate::config::{ExportConfig, ExportOptions};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "resume")]
#[command(about = "Converts JSON Resume documents into themed HTML")]
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    /// TOML file with defaults for the export flags
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Converts from JSON-Resume and exports to file
    Export(ExportArgs),
    /// Checks a JSON-Resume file without exporting
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Path to the JSON resume
    #[arg(value_name = "JSON_RESUME")]
    pub source: PathBuf,

    /// Output format (html) [default: html]
    #[arg(short, long)]
    pub format: Option<String>,

    /// Template directory [default: themes]
    #[arg(short, long)]
    pub template_dir: Option<PathBuf>,

    /// Output directory [default: .]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the JSON resume
    #[arg(value_name = "JSON_RESUME")]
    pub source: PathBuf,
}

impl Cli {
    pub fn file_config(&self) -> Result<FileConfig> {
        match &self.config {
            Some(path) => FileConfig::from_file(path),
            None => Ok(FileConfig::default()),
        }
    }
}

impl ExportArgs {
    fn options(&self) -> ExportOptions {
        ExportOptions {
            format: self.format.clone(),
            template_dir: self.template_dir.clone(),
            output: self.output.clone(),
        }
    }

    /// Flags first, then the config file, then built-in defaults.
    pub fn resolve(&self, file: &FileConfig) -> ExportConfig {
        ExportConfig::from_options(self.source.clone(), self.options().or(&file.export))
    }
}
