use crate::domain::model::Resume;
use crate::utils::error::{ExportError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

// JSON Resume 的 iso8601 日期格式 (YYYY, YYYY-MM, YYYY-MM-DD)
static ISO8601_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([1-2][0-9]{3}-[0-1][0-9]-[0-3][0-9]|[1-2][0-9]{3}-[0-1][0-9]|[1-2][0-9]{3})$")
        .expect("date pattern is valid")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// A single schema violation found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub reason: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ExportError::Config {
            message: format!("{} cannot be empty", field_name),
        });
    }

    if path.contains('\0') {
        return Err(ExportError::Config {
            message: format!("{} contains null bytes", field_name),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExportError::Config {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

fn check_date(out: &mut Vec<Violation>, field: String, value: &Option<String>) {
    if let Some(value) = value {
        if !ISO8601_DATE.is_match(value) {
            out.push(Violation {
                field,
                reason: format!("'{}' is not a YYYY, YYYY-MM or YYYY-MM-DD date", value),
            });
        }
    }
}

fn check_url(out: &mut Vec<Violation>, field: String, value: &Option<String>) {
    if let Some(value) = value {
        if let Err(e) = Url::parse(value) {
            out.push(Violation {
                field,
                reason: format!("'{}' is not a valid URL: {}", value, e),
            });
        }
    }
}

/// Collects every schema violation in `resume`. An empty list means valid.
pub fn resume_violations(resume: &Resume) -> Vec<Violation> {
    let mut out = Vec::new();
    let basics = &resume.basics;

    if let Some(email) = &basics.email {
        if !EMAIL.is_match(email) {
            out.push(Violation {
                field: "basics.email".to_string(),
                reason: format!("'{}' is not a valid email address", email),
            });
        }
    }
    check_url(&mut out, "basics.url".to_string(), &basics.url);
    check_url(&mut out, "basics.image".to_string(), &basics.image);
    for (i, p) in basics.profiles.iter().enumerate() {
        check_url(&mut out, format!("basics.profiles[{}].url", i), &p.url);
    }

    for (i, w) in resume.work.iter().enumerate() {
        check_url(&mut out, format!("work[{}].url", i), &w.url);
        check_date(&mut out, format!("work[{}].startDate", i), &w.start_date);
        check_date(&mut out, format!("work[{}].endDate", i), &w.end_date);
    }
    for (i, v) in resume.volunteer.iter().enumerate() {
        check_url(&mut out, format!("volunteer[{}].url", i), &v.url);
        check_date(&mut out, format!("volunteer[{}].startDate", i), &v.start_date);
        check_date(&mut out, format!("volunteer[{}].endDate", i), &v.end_date);
    }
    for (i, e) in resume.education.iter().enumerate() {
        check_url(&mut out, format!("education[{}].url", i), &e.url);
        check_date(&mut out, format!("education[{}].startDate", i), &e.start_date);
        check_date(&mut out, format!("education[{}].endDate", i), &e.end_date);
    }
    for (i, a) in resume.awards.iter().enumerate() {
        check_date(&mut out, format!("awards[{}].date", i), &a.date);
    }
    for (i, c) in resume.certificates.iter().enumerate() {
        check_url(&mut out, format!("certificates[{}].url", i), &c.url);
        check_date(&mut out, format!("certificates[{}].date", i), &c.date);
    }
    for (i, p) in resume.publications.iter().enumerate() {
        check_url(&mut out, format!("publications[{}].url", i), &p.url);
        check_date(&mut out, format!("publications[{}].releaseDate", i), &p.release_date);
    }
    for (i, p) in resume.projects.iter().enumerate() {
        check_url(&mut out, format!("projects[{}].url", i), &p.url);
        check_date(&mut out, format!("projects[{}].startDate", i), &p.start_date);
        check_date(&mut out, format!("projects[{}].endDate", i), &p.end_date);
    }
    check_url(&mut out, "meta.canonical".to_string(), &resume.meta.canonical);

    out
}

impl Validate for Resume {
    fn validate(&self) -> Result<()> {
        let violations = resume_violations(self);
        if violations.is_empty() {
            return Ok(());
        }

        let message = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(ExportError::Validation { message })
    }
}
