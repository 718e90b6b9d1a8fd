// src/output/paths.rs
//! Where each snapshot file lives. No I/O.

use crate::types::ContentKind;
use std::path::{Path, PathBuf};

/// Path of the file holding `kind` inside `output_dir`.
pub fn output_path(output_dir: &Path, kind: ContentKind) -> PathBuf {
    output_dir.join(kind.file_name())
}

/// Output directory shown relative to the working directory when possible.
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(&cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
