use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{} doesn't exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse resume {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{} already exists", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("{format} is not supported")]
    UnsupportedFormat { format: String },

    #[error("Template syntax error in {}: {source}", .path.display())]
    TemplateSyntax {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error("Template execution failed for {}: {source}", .path.display())]
    TemplateExecution {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },

    #[error("No template file found in {}", .dir.display())]
    MissingTemplate { dir: PathBuf },

    #[error("More than one template file found: {}", join_paths(.paths))]
    AmbiguousTemplate { paths: Vec<PathBuf> },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Filesystem,
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ExportError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } | Self::Parse { .. } | Self::Validation { .. } => {
                ErrorCategory::Input
            }
            Self::UnsupportedFormat { .. } | Self::Config { .. } => ErrorCategory::Configuration,
            Self::NotADirectory { .. } | Self::Io { .. } | Self::AlreadyExists { .. } => {
                ErrorCategory::Filesystem
            }
            Self::TemplateSyntax { .. }
            | Self::TemplateExecution { .. }
            | Self::MissingTemplate { .. }
            | Self::AmbiguousTemplate { .. } => ErrorCategory::Template,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Template => ErrorSeverity::High,
            ErrorCategory::Filesystem => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for this error; never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::NotFound { path } => format!("Check that {} exists", path.display()),
            Self::NotADirectory { path } => {
                format!("Point --template-dir at a theme directory, not {}", path.display())
            }
            Self::Io { .. } => "Check file permissions and free disk space".to_string(),
            Self::Parse { .. } => "Make sure the resume is valid JSON Resume data".to_string(),
            Self::Validation { .. } => "Fix the listed fields and run again".to_string(),
            Self::AlreadyExists { path } => {
                format!("Remove {} or choose another --output directory", path.display())
            }
            Self::UnsupportedFormat { .. } => "Use --format html".to_string(),
            Self::TemplateSyntax { .. } => "Fix the template syntax in the theme".to_string(),
            Self::TemplateExecution { .. } => {
                "Check the template's variable names and helper arguments".to_string()
            }
            Self::MissingTemplate { .. } => {
                "Add a file named like resume.html.tpl to the theme".to_string()
            }
            Self::AmbiguousTemplate { .. } => "Keep exactly one template file per theme".to_string(),
            Self::Config { .. } => "Check the configuration file and command-line flags".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not read the resume: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Filesystem => format!("File system problem: {}", self),
            ErrorCategory::Template => format!("Theme could not be rendered: {}", self),
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_never_zero() {
        let errors = vec![
            ExportError::NotFound {
                path: PathBuf::from("resume.json"),
            },
            ExportError::UnsupportedFormat {
                format: "pdf".to_string(),
            },
            ExportError::AlreadyExists {
                path: PathBuf::from("resume/index.html"),
            },
            ExportError::MissingTemplate {
                dir: PathBuf::from("themes"),
            },
        ];

        let codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        assert_eq!(codes, vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_messages() {
        let err = ExportError::UnsupportedFormat {
            format: "pdf".to_string(),
        };
        assert_eq!(err.to_string(), "pdf is not supported");
        assert_eq!(err.category(), ErrorCategory::Configuration);

        let err = ExportError::AmbiguousTemplate {
            paths: vec![PathBuf::from("a/resume.tpl"), PathBuf::from("b/resume.tpl")],
        };
        assert!(err.to_string().contains("a/resume.tpl, b/resume.tpl"));
    }
}
