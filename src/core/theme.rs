//! Theme directory scanning and asset mirroring.
//!
//! Scanning classifies every entry once and produces a [`ThemePlan`]; nothing
//! is written until [`ThemePlan::apply`] runs.

use crate::domain::model::EntryRole;
use crate::utils::error::{ExportError, Result};
use regex::Regex;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static TEMPLATE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^resume(\.html)*\.(template|tpl).*$").expect("template pattern is valid")
});

pub fn is_template_name(file_name: &str) -> bool {
    TEMPLATE_NAME.is_match(file_name)
}

pub fn classify(file_name: &str, is_dir: bool) -> EntryRole {
    if is_dir {
        EntryRole::Directory
    } else if is_template_name(file_name) {
        EntryRole::Template
    } else {
        EntryRole::Asset
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOp {
    CreateDir(PathBuf),
    CopyFile { from: PathBuf, to: PathBuf },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MirrorStats {
    pub directories_created: usize,
    pub files_copied: usize,
}

#[derive(Debug, Clone)]
pub struct ThemePlan {
    pub template: PathBuf,
    pub ops: Vec<MirrorOp>,
}

impl ThemePlan {
    /// Walks `theme_dir` and plans its mirror under `dest_root`.
    ///
    /// Entries are visited in file-name order. Exactly one template file must
    /// exist anywhere in the tree.
    pub fn scan(theme_dir: &Path, dest_root: &Path) -> Result<Self> {
        if !theme_dir.exists() {
            return Err(ExportError::NotFound {
                path: theme_dir.to_path_buf(),
            });
        }
        if !theme_dir.is_dir() {
            return Err(ExportError::NotADirectory {
                path: theme_dir.to_path_buf(),
            });
        }

        let mut templates = Vec::new();
        let mut ops = Vec::new();
        walk(theme_dir, dest_root, &mut templates, &mut ops)?;

        match templates.len() {
            0 => Err(ExportError::MissingTemplate {
                dir: theme_dir.to_path_buf(),
            }),
            1 => Ok(Self {
                template: templates.remove(0),
                ops,
            }),
            _ => Err(ExportError::AmbiguousTemplate { paths: templates }),
        }
    }

    /// Fails if any planned copy would land on an existing file or on
    /// `reserved` (the rendered page).
    pub fn check_conflicts(&self, reserved: &Path) -> Result<()> {
        for op in &self.ops {
            if let MirrorOp::CopyFile { to, .. } = op {
                if to == reserved || to.exists() {
                    return Err(ExportError::AlreadyExists { path: to.clone() });
                }
            }
        }
        Ok(())
    }

    pub fn apply(&self) -> Result<MirrorStats> {
        let mut stats = MirrorStats::default();
        for op in &self.ops {
            match op {
                MirrorOp::CreateDir(dir) => {
                    fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;
                    stats.directories_created += 1;
                }
                MirrorOp::CopyFile { from, to } => {
                    copy_file(from, to)?;
                    stats.files_copied += 1;
                }
            }
        }
        Ok(stats)
    }
}

fn walk(
    src: &Path,
    dst: &Path,
    templates: &mut Vec<PathBuf>,
    ops: &mut Vec<MirrorOp>,
) -> Result<()> {
    let mut entries = fs::read_dir(src)
        .map_err(|e| ExportError::io(src, e))?
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| ExportError::io(src, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        // 跟隨符號連結
        let is_dir = fs::metadata(&path)
            .map_err(|e| ExportError::io(&path, e))?
            .is_dir();

        match classify(&name, is_dir) {
            EntryRole::Directory => {
                let target = dst.join(entry.file_name());
                ops.push(MirrorOp::CreateDir(target.clone()));
                walk(&path, &target, templates, ops)?;
            }
            EntryRole::Template => {
                tracing::debug!("Found template {}", path.display());
                templates.push(path);
            }
            EntryRole::Asset => ops.push(MirrorOp::CopyFile {
                to: dst.join(entry.file_name()),
                from: path,
            }),
        }
    }
    Ok(())
}

/// Copies one file byte-for-byte. Never overwrites an existing destination.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    if !src.exists() {
        return Err(ExportError::NotFound {
            path: src.to_path_buf(),
        });
    }

    let mut reader = File::open(src).map_err(|e| ExportError::io(src, e))?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ExportError::AlreadyExists {
                path: dst.to_path_buf(),
            },
            _ => ExportError::io(dst, e),
        })?;

    let bytes = io::copy(&mut reader, &mut writer).map_err(|e| ExportError::io(dst, e))?;
    tracing::debug!("Copied {} -> {} ({} bytes)", src.display(), dst.display(), bytes);
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_template_names() {
        for name in [
            "resume.tpl",
            "resume.template",
            "resume.html.tpl",
            "resume.html.template",
            "resume.html.html.tpl",
            "resume.tpl.bak",
        ] {
            assert_eq!(classify(name, false), EntryRole::Template, "{}", name);
        }
        for name in ["resume.html", "my-resume.tpl", "index.html", "resume.css", "Resume.tpl"] {
            assert_eq!(classify(name, false), EntryRole::Asset, "{}", name);
        }
        assert_eq!(classify("resume.tpl", true), EntryRole::Directory);
    }

    #[test]
    fn test_scan_plans_without_writing() {
        let theme = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(theme.path().join("resume.html.tpl"), "{{ basics.name }}").unwrap();
        fs::write(theme.path().join("style.css"), "body {}").unwrap();
        fs::create_dir(theme.path().join("img")).unwrap();
        fs::write(theme.path().join("img/logo.svg"), "<svg/>").unwrap();

        let dest = out.path().join("resume");
        let plan = ThemePlan::scan(theme.path(), &dest).unwrap();

        assert_eq!(plan.template, theme.path().join("resume.html.tpl"));
        assert_eq!(
            plan.ops,
            vec![
                MirrorOp::CreateDir(dest.join("img")),
                MirrorOp::CopyFile {
                    from: theme.path().join("img/logo.svg"),
                    to: dest.join("img/logo.svg"),
                },
                MirrorOp::CopyFile {
                    from: theme.path().join("style.css"),
                    to: dest.join("style.css"),
                },
            ]
        );
        assert!(!dest.exists());
    }

    #[test]
    fn test_scan_rejects_missing_and_duplicate_templates() {
        let theme = TempDir::new().unwrap();
        fs::write(theme.path().join("style.css"), "").unwrap();
        assert!(matches!(
            ThemePlan::scan(theme.path(), Path::new("out")).unwrap_err(),
            ExportError::MissingTemplate { .. }
        ));

        fs::write(theme.path().join("resume.tpl"), "").unwrap();
        fs::create_dir(theme.path().join("alt")).unwrap();
        fs::write(theme.path().join("alt/resume.html.template"), "").unwrap();
        match ThemePlan::scan(theme.path(), Path::new("out")).unwrap_err() {
            ExportError::AmbiguousTemplate { paths } => assert_eq!(paths.len(), 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_scan_requires_directory() {
        let theme = TempDir::new().unwrap();
        let file = theme.path().join("resume.tpl");
        fs::write(&file, "").unwrap();

        assert!(matches!(
            ThemePlan::scan(&theme.path().join("missing"), Path::new("out")).unwrap_err(),
            ExportError::NotFound { .. }
        ));
        assert!(matches!(
            ThemePlan::scan(&file, Path::new("out")).unwrap_err(),
            ExportError::NotADirectory { .. }
        ));
    }

    #[test]
    fn test_check_conflicts() {
        let theme = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(theme.path().join("resume.tpl"), "").unwrap();
        fs::write(theme.path().join("style.css"), "").unwrap();

        let dest = out.path().join("resume");
        let index = dest.join("index.html");
        let plan = ThemePlan::scan(theme.path(), &dest).unwrap();
        assert!(plan.check_conflicts(&index).is_ok());

        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("style.css"), "old").unwrap();
        assert!(matches!(
            plan.check_conflicts(&index).unwrap_err(),
            ExportError::AlreadyExists { path } if path == dest.join("style.css")
        ));

        fs::write(theme.path().join("index.html"), "").unwrap();
        let plan = ThemePlan::scan(theme.path(), &out.path().join("other")).unwrap();
        assert!(matches!(
            plan.check_conflicts(&out.path().join("other/index.html")).unwrap_err(),
            ExportError::AlreadyExists { .. }
        ));
    }

    #[test]
    fn test_copy_file_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        let dst = dir.path().join("b.txt");
        fs::write(&src, "hello").unwrap();

        assert_eq!(copy_file(&src, &dst).unwrap(), 5);
        assert_eq!(fs::read(&dst).unwrap(), b"hello");

        fs::write(&src, "changed").unwrap();
        assert!(matches!(
            copy_file(&src, &dst).unwrap_err(),
            ExportError::AlreadyExists { .. }
        ));
        assert_eq!(fs::read(&dst).unwrap(), b"hello");

        assert!(matches!(
            copy_file(&dir.path().join("missing"), &dir.path().join("c.txt")).unwrap_err(),
            ExportError::NotFound { .. }
        ));
    }
}
