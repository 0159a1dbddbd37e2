use crate::config::ExportConfig;
use crate::core::export::{ExportReport, HtmlExporter, OutputFormat};
use crate::core::helpers::HelperSet;
use crate::core::loader::load_resume;
use crate::core::render::TemplateRenderer;
use crate::domain::ports::{Clock, SystemClock};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::sync::Arc;

pub struct ExportEngine {
    config: ExportConfig,
    clock: Arc<dyn Clock>,
}

impl ExportEngine {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn run(&self) -> Result<ExportReport> {
        tracing::info!("Starting export of {}", self.config.source.display());

        // 先檢查設定，再碰檔案
        self.config.validate()?;
        let format: OutputFormat = self.config.format.parse()?;

        let resume = load_resume(&self.config.source)?;
        resume.validate()?;
        tracing::debug!("Resume passed validation");

        let report = match format {
            OutputFormat::Html => {
                let renderer = TemplateRenderer::new(HelperSet::new(Arc::clone(&self.clock)));
                HtmlExporter::new(renderer).export(
                    &resume,
                    &self.config.template_dir,
                    &self.config.output_dir,
                )?
            }
        };

        tracing::info!("Export finished: {}", report.index_path.display());
        Ok(report)
    }
}
