use crate::domain::model::Resume;
use crate::utils::error::{ExportError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Opens a JSON file and decodes it as a resume. Nothing is returned on a
/// partial decode.
pub fn load_resume(path: impl AsRef<Path>) -> Result<Resume> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ExportError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|e| ExportError::io(path, e))?;
    let resume: Resume =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            if source.is_io() {
                // 讀取失敗不是格式錯誤
                ExportError::io(path, std::io::Error::from(source))
            } else {
                ExportError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

    tracing::debug!(
        "Loaded resume from {} ({} work entries, {} education entries)",
        path.display(),
        resume.work.len(),
        resume.education.len()
    );
    Ok(resume)
}
