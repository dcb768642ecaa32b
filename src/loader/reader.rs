// file: src/loader/reader.rs
// description: lazy, restartable reading of raw article files
// reference: https://docs.rs/tokio/latest/tokio/fs

use crate::config::CorpusConfig;
use crate::error::{CorpusError, Result};
use crate::loader::scanner::{FileScanner, ScannedFile};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Undecoded file content; decoding and parsing happen downstream.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub bytes: Vec<u8>,
    pub modified: u64,
}

pub struct DocumentLoader {
    scanner: FileScanner,
}

/// Reads one file per `next()`; an unreadable file yields `Err` and the
/// caller decides whether to stop.
pub struct RawFiles {
    files: std::vec::IntoIter<ScannedFile>,
}

impl DocumentLoader {
    pub fn new(config: CorpusConfig) -> Self {
        Self {
            scanner: FileScanner::new(config),
        }
    }

    pub fn scan(&self, root: &Path) -> Result<Vec<ScannedFile>> {
        self.scanner.scan_directory(root)
    }

    /// Each call walks `root` again, so the sequence can be restarted at will.
    pub fn raw_files(&self, root: &Path) -> Result<RawFiles> {
        let files = self.scan(root)?;
        Ok(RawFiles {
            files: files.into_iter(),
        })
    }

    pub fn read_file(file: &ScannedFile) -> Result<RawFile> {
        debug!("Reading {}", file.relative_path);
        let bytes = fs::read(&file.path).map_err(|source| CorpusError::FileOperation {
            path: file.path.clone(),
            source,
        })?;
        Ok(Self::raw(file, bytes))
    }

    pub async fn read_file_async(file: ScannedFile) -> Result<RawFile> {
        debug!("Reading {}", file.relative_path);
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|source| CorpusError::FileOperation {
                path: file.path.clone(),
                source,
            })?;
        Ok(Self::raw(&file, bytes))
    }

    fn raw(file: &ScannedFile, bytes: Vec<u8>) -> RawFile {
        RawFile {
            path: file.path.clone(),
            relative_path: file.relative_path.clone(),
            bytes,
            modified: file.modified,
        }
    }
}

impl Iterator for RawFiles {
    type Item = Result<RawFile>;

    fn next(&mut self) -> Option<Self::Item> {
        self.files.next().map(|file| DocumentLoader::read_file(&file))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.files.size_hint()
    }
}

impl ExactSizeIterator for RawFiles {}
