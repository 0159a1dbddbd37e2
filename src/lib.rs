pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;
pub use config::{toml_config::FileConfig, ExportConfig, ExportOptions};

pub use crate::core::{
    engine::ExportEngine,
    export::{ExportReport, HtmlExporter, OutputFormat},
    helpers::HelperSet,
    loader::load_resume,
    render::TemplateRenderer,
    theme::ThemePlan,
};
pub use domain::model::Resume;
pub use domain::ports::{Clock, FixedClock, SystemClock};
pub use utils::error::{ExportError, Result};
