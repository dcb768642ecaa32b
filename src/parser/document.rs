// file: src/parser/document.rs
// description: turns raw article markdown into a Document
// reference: composes normalizer, frontmatter, header and section parsers

use crate::error::{CorpusError, Result};
use crate::loader::FileClassifier;
use crate::models::Document;
use crate::parser::frontmatter::{Frontmatter, FrontmatterParser};
use crate::parser::header::HeaderParser;
use crate::parser::markdown::MarkdownParser;
use crate::parser::normalizer::MarkdownNormalizer;
use crate::parser::patterns::{extract_url, normalize_date};
use tracing::debug;

pub struct DocumentParser {
    normalizer: MarkdownNormalizer,
    frontmatter: FrontmatterParser,
    header: HeaderParser,
    markdown: MarkdownParser,
    classifier: FileClassifier,
}

impl DocumentParser {
    pub fn new() -> Self {
        Self::with_classifier(FileClassifier::default())
    }

    pub fn with_classifier(classifier: FileClassifier) -> Self {
        Self {
            normalizer: MarkdownNormalizer::new(),
            frontmatter: FrontmatterParser::new(),
            header: HeaderParser::new(),
            markdown: MarkdownParser::new(),
            classifier,
        }
    }

    /// Decodes `bytes` as UTF-8 before parsing; undecodable files are parse errors.
    pub fn parse_bytes(&self, relative_path: &str, bytes: &[u8]) -> Result<Document> {
        let raw = std::str::from_utf8(bytes).map_err(|e| {
            CorpusError::parse(relative_path, format!("content is not valid UTF-8: {}", e))
        })?;
        self.parse(relative_path, raw)
    }

    /// Missing metadata is not an error; only empty, undecodable or
    /// structurally broken documents are rejected.
    pub fn parse(&self, relative_path: &str, raw: &str) -> Result<Document> {
        if raw.trim().is_empty() {
            return Err(CorpusError::parse(relative_path, "document is empty"));
        }

        let normalized = self.normalizer.normalize(raw);

        let (frontmatter, rest) = match self
            .frontmatter
            .extract(&normalized)
            .map_err(|e| e.with_file(relative_path))?
        {
            Some((frontmatter, rest)) => (frontmatter, rest),
            None => (Frontmatter::default(), normalized),
        };

        let (header, body) = self.header.split(&rest);
        let sections = self.markdown.sections(&body);

        let mut document = Document::new(relative_path, raw);

        document.title = first_of(&frontmatter, &["title"])
            .map(|title| title.split_whitespace().collect::<Vec<_>>().join(" "))
            .unwrap_or(header.title);
        document.source_url = first_of(&frontmatter, &["source", "source_url", "url"])
            .map(|url| extract_url(&url))
            .unwrap_or(header.source_url);
        document.authors = frontmatter_authors(&frontmatter).unwrap_or(header.authors);
        document.published_date = first_of(&frontmatter, &["published", "date"])
            .map(|date| normalize_date(&date))
            .unwrap_or(header.published_date);
        document.updated_date = first_of(&frontmatter, &["updated", "last_updated"])
            .map(|date| normalize_date(&date))
            .unwrap_or(header.updated_date);
        document.sections = sections;
        document.body = body;

        if document.title.is_empty() && document.sections.is_empty() {
            return Err(CorpusError::parse(
                relative_path,
                "no title or body found after the header block",
            ));
        }

        let mut tags = Vec::new();
        let frontmatter_tags = frontmatter
            .get_list("tags")
            .iter()
            .map(|tag| tag.to_lowercase());
        let path_tags = self.classifier.tags_for(relative_path);
        for tag in frontmatter_tags.chain(header.tags).chain(path_tags) {
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        document.tags = tags;

        debug!(
            "Parsed {}: {} sections, {} tags",
            relative_path,
            document.sections.len(),
            document.tags.len()
        );

        Ok(document)
    }
}

fn first_of(frontmatter: &Frontmatter, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| frontmatter.get(key))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn frontmatter_authors(frontmatter: &Frontmatter) -> Option<Vec<String>> {
    ["authors", "author"]
        .iter()
        .map(|key| frontmatter.get_list(key))
        .find(|values| !values.is_empty())
        .map(|values| {
            values
                .iter()
                .flat_map(|value| HeaderParser::parse_authors(value))
                .collect()
        })
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}
