use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while generating a startup script
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A directory could not be enumerated during framework detection.
    ///
    /// Detection cannot continue on a tree it cannot read, so no script is
    /// produced.
    #[error("Couldn't read directory '{}': {source}", .path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl GeneratorError {
    pub fn list_directory(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        GeneratorError::ListDirectory {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            GeneratorError::ListDirectory { path, .. } => path,
        }
    }
}
