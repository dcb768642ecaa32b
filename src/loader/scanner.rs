// file: src/loader/scanner.rs
// description: Directory walking and markdown file discovery with filtering
// reference: https://docs.rs/walkdir

use crate::config::CorpusConfig;
use crate::error::{CorpusError, Result};
use crate::loader::FileClassifier;
use crate::utils::Validator;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct FileScanner {
    config: CorpusConfig,
    classifier: FileClassifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub size: u64,
    pub modified: u64,
}

impl FileScanner {
    pub fn new(config: CorpusConfig) -> Self {
        Self {
            config,
            classifier: FileClassifier::default(),
        }
    }

    /// Markdown files under `root`, sorted by relative path.
    ///
    /// A root that is not a directory, or a directory entry that cannot be
    /// read, fails the whole scan.
    pub fn scan_directory(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        info!("Scanning directory: {}", root.display());
        Validator::validate_directory(root)?;

        let mut files = Vec::new();
        let max_size = (self.config.max_file_size_mb * 1024 * 1024) as u64;

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                match e.into_io_error() {
                    Some(source) => CorpusError::FileOperation { path, source },
                    None => CorpusError::Validation(format!(
                        "Filesystem loop detected at {}",
                        path.display()
                    )),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative_path = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");

            if Validator::validate_markdown_extension(path).is_err() {
                continue;
            }

            if self.should_skip(&relative_path) {
                debug!("Skipping file: {}", relative_path);
                continue;
            }

            let metadata = entry.metadata().map_err(|e| {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("metadata unavailable"));
                CorpusError::FileOperation {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

            let size = metadata.len();
            if size > max_size {
                debug!(
                    "Skipping large file ({} MB): {}",
                    size / 1024 / 1024,
                    path.display()
                );
                continue;
            }

            let modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);

            files.push(ScannedFile {
                path: path.to_path_buf(),
                relative_path,
                size,
                modified,
            });
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        info!("Found {} markdown files", files.len());
        Ok(files)
    }

    fn should_skip(&self, relative_path: &str) -> bool {
        if self.config.skip_index_files && self.classifier.is_index_file(relative_path) {
            return true;
        }

        for pattern in &self.config.skip_patterns {
            if pattern.contains('*') {
                let pattern_without_star = pattern.replace("*.", ".");
                if relative_path.ends_with(&pattern_without_star) {
                    return true;
                }
            } else if relative_path.contains(pattern.as_str()) {
                return true;
            }
        }

        false
    }
}
