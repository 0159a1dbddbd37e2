use crate::core::render::TemplateRenderer;
use crate::core::theme::ThemePlan;
use crate::domain::model::Resume;
use crate::utils::error::{ExportError, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const OUTPUT_DIR_NAME: &str = "resume";
pub const INDEX_FILE_NAME: &str = "index.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "html" => Ok(Self::Html),
            other => Err(ExportError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub index_path: PathBuf,
    pub template: PathBuf,
    pub assets_copied: usize,
    pub directories_created: usize,
}

pub struct HtmlExporter {
    renderer: TemplateRenderer,
}

impl HtmlExporter {
    pub fn new(renderer: TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Writes `<output_dir>/resume/index.html` and mirrors the theme's assets
    /// next to it.
    ///
    /// The template is rendered into memory and every destination is checked
    /// before anything is created, so a broken theme or a conflicting file
    /// leaves the output untouched.
    pub fn export(&self, resume: &Resume, theme_dir: &Path, output_dir: &Path) -> Result<ExportReport> {
        let dest_root = output_dir.join(OUTPUT_DIR_NAME);
        let index_path = dest_root.join(INDEX_FILE_NAME);
        if index_path.exists() {
            return Err(ExportError::AlreadyExists { path: index_path });
        }

        let plan = ThemePlan::scan(theme_dir, &dest_root)?;
        plan.check_conflicts(&index_path)?;
        tracing::info!("Using template {}", plan.template.display());

        let mut html = Vec::new();
        self.renderer.render_file(&mut html, resume, &plan.template)?;

        fs::create_dir_all(&dest_root).map_err(|e| ExportError::io(&dest_root, e))?;
        write_new_file(&index_path, &html)?;
        tracing::debug!("Wrote {} ({} bytes)", index_path.display(), html.len());

        let stats = plan.apply()?;
        tracing::info!(
            "Mirrored {} assets and {} directories from {}",
            stats.files_copied,
            stats.directories_created,
            theme_dir.display()
        );

        Ok(ExportReport {
            index_path,
            template: plan.template,
            assets_copied: stats.files_copied,
            directories_created: stats.directories_created,
        })
    }
}

fn write_new_file(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ExportError::AlreadyExists {
                path: path.to_path_buf(),
            },
            _ => ExportError::io(path, e),
        })?;
    file.write_all(data).map_err(|e| ExportError::io(path, e))?;
    file.flush().map_err(|e| ExportError::io(path, e))
}
