#![allow(dead_code)]

use std::fs;
use tempfile::TempDir;

/// Creates a temporary app directory containing `files`.
///
/// Parent directories are created as needed; every file gets a one-line body.
pub fn app_dir(files: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");

    for file in files {
        let path = dir.path().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, "# fixture\n").expect("Failed to write fixture file");
    }

    dir
}

pub fn last_line(script: &str) -> &str {
    script
        .trim_end_matches('\n')
        .lines()
        .last()
        .expect("Script is empty")
}
