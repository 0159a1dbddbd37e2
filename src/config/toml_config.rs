use crate::config::ExportOptions;
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env pattern is valid"));

/// Optional TOML file supplying defaults for flags left off the command line.
///
/// ```toml
/// [export]
/// format = "html"
/// template_dir = "themes/classic"
/// output = "${HOME}/public"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub export: ExportOptions,
}

impl FileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExportError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ExportError::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded config file {}", path.display());
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let config: Self = toml::from_str(&processed_content).map_err(|e| ExportError::Config {
            message: format!("TOML parsing error: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${HOME})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(format) = &self.export.format {
            crate::utils::validation::validate_non_empty_string("export.format", format)?;
        }
        if let Some(dir) = &self.export.template_dir {
            crate::utils::validation::validate_path(
                "export.template_dir",
                &dir.to_string_lossy(),
            )?;
        }
        if let Some(dir) = &self.export.output {
            crate::utils::validation::validate_path("export.output", &dir.to_string_lossy())?;
        }
        Ok(())
    }
}
