//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by read_dir.
///
/// `file_type` describes the entry itself: symlinks are never followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

/// Read-only view of the application tree.
///
/// Implementations must return `read_dir` entries sorted by name so that
/// "first match wins" scans are deterministic across platforms.
pub trait FileSystem: Send + Sync {
    /// Check if a path exists (file, directory or anything else).
    ///
    /// Only a "not found" lookup counts as absent; a path that cannot be
    /// inspected, e.g. for lack of permission, is reported as present.
    fn exists(&self, path: &Path) -> bool;

    /// List directory contents, sorted by entry name
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;
}
