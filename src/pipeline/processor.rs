// file: src/pipeline/processor.rs
// description: converts raw article files into parsed documents
// reference: decodes, parses and tags markdown files

use crate::config::Config;
use crate::error::Result;
use crate::loader::{FileClassifier, RawFile};
use crate::models::Document;
use crate::parser::DocumentParser;
use tracing::debug;

pub struct FileProcessor {
    parser: DocumentParser,
}

impl FileProcessor {
    pub fn new(config: &Config) -> Self {
        let classifier = FileClassifier::new(config.tags.clone());
        Self {
            parser: DocumentParser::with_classifier(classifier),
        }
    }

    pub fn process(&self, raw: &RawFile) -> Result<Document> {
        debug!(
            "Processing file: {} ({} bytes)",
            raw.relative_path,
            raw.bytes.len()
        );
        self.parser.parse_bytes(&raw.relative_path, &raw.bytes)
    }
}
