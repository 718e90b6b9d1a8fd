// src/output/media.rs
//! Local copies of media library files.
//!
//! Files already on disk are never fetched again, so a repeated run only
//! downloads what is new.

use crate::error::AppError;
use std::fs;
use std::path::{Path, PathBuf};

/// Counts from one media download pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaDownloadReport {
    pub downloaded: usize,
    /// Files that were already present.
    pub skipped: usize,
    pub failed: Vec<MediaFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFailure {
    pub filename: String,
    pub error: String,
}

impl MediaDownloadReport {
    pub fn with_failure(mut self, filename: &str, error: impl ToString) -> Self {
        self.failed.push(MediaFailure {
            filename: filename.to_string(),
            error: error.to_string(),
        });
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Where `filename` is stored below `images_dir`.
///
/// `None` for names that would land outside the directory.
pub fn media_file_path(images_dir: &Path, filename: &str) -> Option<PathBuf> {
    let unsafe_name = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\']);
    if unsafe_name {
        return None;
    }
    Some(images_dir.join(filename))
}

/// Writes a downloaded file, creating its directory as needed.
pub fn store_media_file(path: &Path, bytes: &[u8]) -> Result<usize, AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    log::debug!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn names_cannot_escape_the_images_dir() {
        let dir = Path::new("public/images/wp");
        assert_eq!(
            media_file_path(dir, "hero.jpg"),
            Some(PathBuf::from("public/images/wp/hero.jpg"))
        );
        assert_eq!(media_file_path(dir, ".."), None);
        assert_eq!(media_file_path(dir, ""), None);
        assert_eq!(media_file_path(dir, "a/b.jpg"), None);
        assert_eq!(media_file_path(dir, "..\\b.jpg"), None);
    }

    #[test]
    fn stores_into_a_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("images").join("wp").join("hero.jpg");

        let written = store_media_file(&path, b"\x89PNG").unwrap();

        assert_eq!(written, 4);
        assert_eq!(fs::read(&path).unwrap(), b"\x89PNG".to_vec());
    }

    #[test]
    fn failures_are_listed_by_file() {
        let report = MediaDownloadReport::default().with_failure("a.jpg", "HTTP 404");
        assert!(!report.is_success());
        assert_eq!(report.failed[0].filename, "a.jpg");
        assert_eq!(report.failed[0].error, "HTTP 404");
    }
}
