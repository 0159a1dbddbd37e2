use anyhow::Result;
use chrono::NaiveDate;
use resume_export::utils::validation::Validate;
use resume_export::{load_resume, ExportConfig, ExportEngine, FileConfig, FixedClock};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn test_demo_resume_is_valid() -> Result<()> {
    let resume = load_resume(manifest_dir().join("demos/resume.json"))?;
    resume.validate()?;
    assert_eq!(resume.work.len(), 2);
    Ok(())
}

#[test]
fn test_bundled_theme_renders_demo() -> Result<()> {
    let out = TempDir::new()?;
    let config = ExportConfig::new(manifest_dir().join("demos/resume.json"))
        .with_template_dir(manifest_dir().join("themes"))
        .with_output_dir(out.path());

    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let report = ExportEngine::new(config)
        .with_clock(Arc::new(FixedClock(today)))
        .run()?;

    assert_eq!(report.assets_copied, 1);
    assert!(out.path().join("resume/css/style.css").is_file());
    assert!(!out.path().join("resume/resume.html.tpl").exists());

    let html = std::fs::read_to_string(report.index_path)?;
    assert!(html.contains("2024年 6月15日 現在"));
    assert!(html.contains("<ruby>山田<rt>やまだ</rt></ruby>"));
    assert!(html.contains("1990年4月1日生 (満34歳)"));
    assert!(html.contains("Rust,Kubernetes"));
    Ok(())
}

#[test]
fn test_demo_config_file_parses() -> Result<()> {
    let config = FileConfig::from_file(manifest_dir().join("demos/resume-export.toml"))?;
    assert_eq!(config.export.format.as_deref(), Some("html"));
    assert_eq!(config.export.template_dir, Some(PathBuf::from("themes")));
    Ok(())
}
