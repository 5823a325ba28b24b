//! File discovery for finding images in directories.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;
use crate::error::BatchError;

/// Discovers image files in a directory tree.
#[derive(Clone)]
pub struct FileDiscovery {
    config: ProcessingConfig,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes at discovery time
    pub size: u64,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Recursively find all supported image files under `root`.
    ///
    /// Any traversal error (missing root, unreadable subdirectory) aborts the
    /// scan: a partial listing would silently shrink the batch.
    pub fn discover(&self, root: &Path) -> Result<Vec<DiscoveredFile>, BatchError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| BatchError::DirectoryUnreadable {
                path: e.path().unwrap_or(root).to_path_buf(),
                message: e.to_string(),
            })?;

            // Symlinks are not followed into directories. A link to a regular
            // file counts as that file; a dangling link is listed so its job
            // fails at the stat step.
            let entry_path = entry.path();
            let is_file = if entry.path_is_symlink() {
                entry_path.is_file() || !entry_path.exists()
            } else {
                entry.file_type().is_file()
            };
            if !is_file || !self.is_supported(entry_path) {
                continue;
            }

            let size = std::fs::metadata(entry_path).map(|m| m.len()).unwrap_or(0);
            files.push(DiscoveredFile {
                path: entry_path.to_path_buf(),
                size,
            });
        }

        // Sort by path for deterministic ordering
        files.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!("Discovered {} image(s) under {:?}", files.len(), root);
        Ok(files)
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .supported_extensions
                    .iter()
                    .any(|fmt| fmt.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}
