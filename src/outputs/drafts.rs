//! Draft files on disk.
//!
//! # Output Structure
//!
//! ```text
//! drafts/
//! ├── 2025-05-06.md
//! └── 2025-05-06.html
//! ```
//!
//! An existing file is left alone unless the run was started with
//! `--overwrite`. Each file is written to a hidden sibling first and renamed
//! into place.
//!
//! The exists check and the rename are separate steps, so two runs racing on
//! the same date can still both write.

use super::DraftSink;
use crate::models::Draft;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument, warn};

/// Writes drafts into one directory.
#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths and contents of the two artifacts for `draft`.
    pub fn artifacts<'a>(&self, draft: &'a Draft) -> [(PathBuf, &'a str); 2] {
        let stem = draft.date_label();
        [
            (self.dir.join(format!("{}.md", stem)), draft.markdown.as_str()),
            (self.dir.join(format!("{}.html", stem)), draft.html.as_str()),
        ]
    }
}

impl DraftSink for DraftStore {
    #[instrument(level = "info", skip_all, fields(dir = %self.dir.display(), date = %draft.date, overwrite = overwrite))]
    async fn save(&self, draft: &Draft, overwrite: bool) -> Result<Vec<PathBuf>, Box<dyn Error>> {
        if let Err(e) = fs::create_dir_all(&self.dir).await {
            error!(error = %e, "Failed to create drafts dir");
            return Err(e.into());
        }

        let mut saved = Vec::new();
        for (path, content) in self.artifacts(draft) {
            if !overwrite && fs::try_exists(&path).await.unwrap_or(false) {
                warn!(path = %path.display(), "Draft already exists; skipping");
                continue;
            }

            match write_atomic(&path, content).await {
                Ok(()) => {
                    info!(path = %path.display(), bytes = content.len(), "Wrote draft");
                    saved.push(path);
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Failed to write draft");
                }
            }
        }

        Ok(saved)
    }
}

/// Write `content` to a hidden temporary sibling of `path`, then rename it
/// over `path`.
async fn write_atomic(path: &Path, content: &str) -> Result<(), Box<dyn Error>> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("not a file path: {}", path.display()))?;
    let tmp = path.with_file_name(format!(".{}.tmp", name));

    fs::write(&tmp, content.as_bytes()).await?;
    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn draft(markdown: &str, html: &str) -> Draft {
        Draft {
            date: NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
            markdown: markdown.to_string(),
            html: html.to_string(),
        }
    }

    #[tokio::test]
    async fn test_writes_both_files_byte_identical() {
        let tmp = TempDir::new().unwrap();
        let store = DraftStore::new(tmp.path().join("drafts"));
        let draft = draft("# 제목\n\n- 코스피\n", "<!DOCTYPE html>\n<h1>제목</h1>\n");

        let saved = store.save(&draft, false).await.unwrap();
        assert_eq!(
            saved,
            vec![
                tmp.path().join("drafts/2025-05-06.md"),
                tmp.path().join("drafts/2025-05-06.html"),
            ]
        );
        assert_eq!(std::fs::read_to_string(&saved[0]).unwrap(), draft.markdown);
        assert_eq!(std::fs::read_to_string(&saved[1]).unwrap(), draft.html);
    }

    #[tokio::test]
    async fn test_second_run_without_overwrite_saves_nothing() {
        let tmp = TempDir::new().unwrap();
        let store = DraftStore::new(tmp.path());

        assert_eq!(store.save(&draft("first", "first"), false).await.unwrap().len(), 2);
        let again = store.save(&draft("second", "second"), false).await.unwrap();
        assert!(again.is_empty());

        let md = std::fs::read_to_string(tmp.path().join("2025-05-06.md")).unwrap();
        assert_eq!(md, "first");
    }

    #[tokio::test]
    async fn test_overwrite_replaces_existing() {
        let tmp = TempDir::new().unwrap();
        let store = DraftStore::new(tmp.path());

        store.save(&draft("first", "first"), false).await.unwrap();
        let saved = store.save(&draft("second", "second"), true).await.unwrap();
        assert_eq!(saved.len(), 2);

        let html = std::fs::read_to_string(tmp.path().join("2025-05-06.html")).unwrap();
        assert_eq!(html, "second");
    }

    #[tokio::test]
    async fn test_only_missing_file_is_written() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("2025-05-06.md"), "kept").unwrap();
        let store = DraftStore::new(tmp.path());

        let saved = store.save(&draft("new", "new"), false).await.unwrap();
        assert_eq!(saved, vec![tmp.path().join("2025-05-06.html")]);
        assert_eq!(std::fs::read_to_string(tmp.path().join("2025-05-06.md")).unwrap(), "kept");
    }

    #[tokio::test]
    async fn test_no_temporary_files_left_behind() {
        let tmp = TempDir::new().unwrap();
        let store = DraftStore::new(tmp.path());
        store.save(&draft("md", "html"), false).await.unwrap();

        let mut names: Vec<String> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["2025-05-06.html", "2025-05-06.md"]);
    }

    #[tokio::test]
    async fn test_unusable_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let store = DraftStore::new(blocker.join("drafts"));

        assert!(store.save(&draft("md", "html"), false).await.is_err());
    }
}
