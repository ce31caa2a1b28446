use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::dataset::{SourceFile, SourceKind};
use crate::domain::error::{AppError, Result};

/// Lists loadable files directly inside one directory
#[derive(Debug, Clone)]
pub struct FileDiscoverer {
    root: PathBuf,
}

impl FileDiscoverer {
    /// Fails with `DirectoryNotFound` unless `root` is an existing directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(AppError::DirectoryNotFound(root.display().to_string()));
        }

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Start a fresh pass over the directory.
    ///
    /// Entries are visited in file-name order; sub-directories and
    /// unsupported extensions are skipped. Each call re-reads the directory.
    pub fn iter(&self) -> Result<DiscoveredFiles> {
        let mut entries = fs::read_dir(&self.root)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    AppError::DirectoryNotFound(self.root.display().to_string())
                } else {
                    AppError::from(e)
                }
            })?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;

        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Ok(DiscoveredFiles {
            entries: entries.into_iter(),
        })
    }
}

/// One pass of discovery; classification happens as entries are pulled.
#[derive(Debug)]
pub struct DiscoveredFiles {
    entries: std::vec::IntoIter<PathBuf>,
}

impl Iterator for DiscoveredFiles {
    type Item = SourceFile;

    fn next(&mut self) -> Option<Self::Item> {
        for path in self.entries.by_ref() {
            if !path.is_file() {
                continue;
            }

            let file = SourceFile::new(path);
            if file.kind == SourceKind::Unsupported {
                debug!(path = %file.path.display(), "Skipping unsupported file");
                continue;
            }
            return Some(file);
        }
        None
    }
}
