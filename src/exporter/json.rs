// file: src/exporter/json.rs
// description: json snapshot export and import of a built corpus index

use crate::error::{CorpusError, Result};
use crate::index::CorpusIndex;
use crate::utils::Validator;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;
pub const SNAPSHOT_FILE: &str = "index.json";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub format_version: u32,
    pub exported_at: String,
    pub index: CorpusIndex,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_documents: usize,
    pub total_tokens: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| CorpusError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// Writes `index.json` and `manifest.json` into the output directory.
    pub fn export_index(&self, index: &CorpusIndex, pretty: bool) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let exported_at = Utc::now().to_rfc3339();
        let snapshot = IndexSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            exported_at: exported_at.clone(),
            index: index.clone(),
        };
        self.write_json(SNAPSHOT_FILE, &snapshot, pretty)?;

        let manifest = ExportManifest {
            exported_at,
            total_documents: index.len(),
            total_tokens: index.token_count(),
            files: vec![SNAPSHOT_FILE.to_string()],
        };
        self.write_json(MANIFEST_FILE, &manifest, pretty)?;

        info!(
            "Export complete: {} documents exported",
            manifest.total_documents
        );
        Ok(manifest)
    }

    /// Writes one document as `documents/<id>.json`, with `/` in the id flattened to `__`.
    ///
    /// `id` is matched case-insensitively, as `show` does.
    pub fn export_single(&self, index: &CorpusIndex, id: &str, pretty: bool) -> Result<PathBuf> {
        let document = index
            .lookup(id)
            .ok_or_else(|| CorpusError::Validation(format!("Unknown document id: {}", id)))?;

        let file_name = format!("documents/{}.json", document.id.replace('/', "__"));
        let path = self.write_json(&file_name, document, pretty)?;
        info!("Exported document {} to {}", document.id, path.display());
        Ok(path)
    }

    pub fn load_snapshot(path: &Path) -> Result<CorpusIndex> {
        Validator::validate_file(path)?;

        let content = fs::read_to_string(path).map_err(|source| CorpusError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: IndexSnapshot = serde_json::from_str(&content)?;

        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(CorpusError::Serialization(format!(
                "Unsupported snapshot format version {} (expected {})",
                snapshot.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        info!(
            "Loaded snapshot from {} ({} documents, exported {})",
            path.display(),
            snapshot.index.len(),
            snapshot.exported_at
        );
        Ok(snapshot.index)
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T, pretty: bool) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| CorpusError::FileOperation {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        fs::write(&path, json).map_err(|source| CorpusError::FileOperation {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexBuilder, Tokenizer};
    use crate::models::{Document, Section};
    use crate::query::QueryEngine;
    use tempfile::tempdir;

    fn sample_index() -> CorpusIndex {
        let mut doc = Document::new("nav/mega-menus.md", "# Mega Menus");
        doc.title = "Mega Menus Work Well for Site Navigation".to_string();
        doc.source_url = "https://www.nngroup.com/articles/mega-menus-work-well/".to_string();
        doc.sections = vec![Section::new("", "Menus expose navigation choices.", 0)];

        let mut builder = IndexBuilder::new(Tokenizer::new(3, &["site".to_string()]));
        builder.add(doc);
        builder.build()
    }

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path().join("exports"));
        assert!(exporter.is_ok());
        assert!(dir.path().join("exports").is_dir());
    }

    #[test]
    fn test_snapshot_answers_queries_identically() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let index = sample_index();

        let manifest = exporter.export_index(&index, true).unwrap();
        assert_eq!(manifest.total_documents, 1);
        assert!(dir.path().join(MANIFEST_FILE).is_file());

        let restored = JsonExporter::load_snapshot(&dir.path().join(SNAPSHOT_FILE)).unwrap();
        assert_eq!(restored, index);

        let before: Vec<_> = QueryEngine::new(&index).search("navigation site").collect();
        let after: Vec<_> = QueryEngine::new(&restored).search("navigation site").collect();
        assert_eq!(before, after);
        assert_eq!(after[0].score, 2);
    }

    #[test]
    fn test_export_single() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let index = sample_index();

        let path = exporter.export_single(&index, "nav/mega-menus", false).unwrap();
        assert!(path.ends_with("documents/nav__mega-menus.json"));

        let content = fs::read_to_string(&path).unwrap();
        let document: Document = serde_json::from_str(&content).unwrap();
        assert_eq!(document.id, "nav/mega-menus");

        let typed = exporter.export_single(&index, "Nav/Mega-Menus", false).unwrap();
        assert_eq!(typed, path);

        assert!(exporter.export_single(&index, "missing", false).is_err());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        exporter.export_index(&sample_index(), false).unwrap();

        let path = dir.path().join(SNAPSHOT_FILE);
        let content = fs::read_to_string(&path).unwrap().replacen(
            "\"format_version\":1",
            "\"format_version\":99",
            1,
        );
        fs::write(&path, content).unwrap();

        let err = JsonExporter::load_snapshot(&path).unwrap_err();
        assert!(matches!(err, CorpusError::Serialization(_)));
    }

    #[test]
    fn test_missing_snapshot_is_error() {
        let dir = tempdir().unwrap();
        assert!(JsonExporter::load_snapshot(&dir.path().join("nope.json")).is_err());
    }
}
