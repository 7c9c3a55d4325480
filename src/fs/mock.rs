use super::{DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory tree used by tests.
///
/// Entries live in a `BTreeMap`, so listings come back sorted by name like
/// [`RealFileSystem`](super::RealFileSystem). Directories registered with
/// [`MockFileSystem::deny_read`] fail to list, which simulates permission
/// errors without touching the disk.
pub struct MockFileSystem {
    files: RwLock<BTreeMap<PathBuf, FileType>>,
    unreadable: RwLock<BTreeSet<PathBuf>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let mut files = BTreeMap::new();
        let mut current = PathBuf::new();
        for component in root.components() {
            current.push(component);
            files.insert(current.clone(), FileType::Directory);
        }

        Self {
            files: RwLock::new(files),
            unreadable: RwLock::new(BTreeSet::new()),
            root,
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), FileType::File);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), FileType::Directory);
    }

    /// Adds an entry that lists as a symlink, whatever it points to
    pub fn add_symlink(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), FileType::Symlink);
    }

    pub fn deny_read(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.unreadable.write().unwrap().insert(path);
    }

    fn insert(&self, path: &Path, file_type: FileType) {
        let path = self.normalize_path(path);
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                files.entry(current.clone()).or_insert(FileType::Directory);
            }
        }

        files.insert(path, file_type);
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn file_type(&self, path: &Path) -> Option<FileType> {
        let path = self.normalize_path(path);
        self.files.read().unwrap().get(&path).copied()
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.file_type(path).is_some()
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = self.normalize_path(path);

        if self.unreadable.read().unwrap().contains(&path) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }

        let files = self.files.read().unwrap();
        match files.get(&path) {
            Some(FileType::Directory) => {}
            Some(_) => return Err(anyhow!("Not a directory: {:?}", path)),
            None => return Err(anyhow!("Directory not found: {:?}", path)),
        }

        let entries = files
            .iter()
            .filter(|(file_path, _)| file_path.parent() == Some(path.as_path()))
            .map(|(file_path, file_type)| DirEntry {
                path: file_path.clone(),
                name: file_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                file_type: *file_type,
            })
            .collect();

        Ok(entries)
    }
}
