use crate::core::helpers::HelperSet;
use crate::domain::model::Resume;
use crate::utils::error::{ExportError, Result};
use minijinja::value::Value;
use minijinja::{escape_formatter, AutoEscape, Environment, UndefinedBehavior};
use std::io::Write;
use std::path::Path;

/// Renders a single theme template against a resume.
pub struct TemplateRenderer {
    helpers: HelperSet,
}

impl TemplateRenderer {
    pub fn new(helpers: HelperSet) -> Self {
        Self { helpers }
    }

    fn environment<'source>(&self) -> Environment<'source> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        // 輸出一律是 HTML，不看副檔名
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        // 缺少的欄位印成空字串
        env.set_formatter(|out, state, value| {
            if value.is_none() {
                Ok(())
            } else {
                escape_formatter(out, state, value)
            }
        });
        self.helpers.install(&mut env);
        env
    }

    /// Reads `template_path`, renders it with `resume` as the root context and
    /// writes the result to `out`.
    pub fn render_file<W: Write>(
        &self,
        out: &mut W,
        resume: &Resume,
        template_path: &Path,
    ) -> Result<()> {
        let source = std::fs::read_to_string(template_path)
            .map_err(|e| ExportError::io(template_path, e))?;
        let name = template_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());

        let env = self.environment();
        let template = env.template_from_named_str(&name, &source).map_err(|source| {
            ExportError::TemplateSyntax {
                path: template_path.to_path_buf(),
                source,
            }
        })?;

        tracing::debug!("Rendering template {}", template_path.display());
        let rendered = template
            .render(Value::from_serialize(resume))
            .map_err(|source| ExportError::TemplateExecution {
                path: template_path.to_path_buf(),
                source,
            })?;
        out.write_all(rendered.as_bytes())
            .map_err(|e| ExportError::io(template_path, e))
    }
}
