// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod exporter;
pub mod index;
pub mod loader;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod query;
pub mod utils;

pub use config::{
    Config, CorpusConfig, IndexConfig, PipelineConfig, QueryConfig, TagRule,
};
pub use error::{CorpusError, Result};
pub use exporter::{ExportManifest, IndexSnapshot, JsonExporter};
pub use index::{CorpusIndex, IndexBuilder, Tokenizer};
pub use loader::{DocumentLoader, FileClassifier, FileScanner, RawFile, ScannedFile};
pub use models::{Document, DocumentSummary, Section};
pub use parser::{DocumentParser, FrontmatterParser, MarkdownNormalizer, MarkdownParser};
pub use pipeline::{CorpusPipeline, LoadReport, PipelineStats, ProgressTracker, SkippedFile};
pub use query::QueryEngine;
pub use utils::{StageTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let pipeline = CorpusPipeline::new(config);
        let index = pipeline.build_index(Vec::new());
        assert_eq!(QueryEngine::new(&index).search("menus").count(), 0);
    }
}
