// file: src/models/document.rs
// description: core article model with sections and markdown re-serialization
// reference: internal data structures

use crate::utils::Validator;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One heading-delimited block of an article body.
///
/// Level 0 holds the untitled introduction that precedes the first sub-heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub text: String,
    pub level: u32,
}

impl Section {
    pub fn new(heading: impl Into<String>, text: impl Into<String>, level: u32) -> Self {
        Self {
            heading: heading.into(),
            text: text.into(),
            level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub relative_path: String,
    pub title: String,
    pub source_url: String,
    pub authors: Vec<String>,
    pub published_date: String,
    pub updated_date: String,
    pub sections: Vec<Section>,
    /// Normalized markdown following the header block; `sections` are derived from it.
    pub body: String,
    pub tags: Vec<String>,
    pub content_hash: String,
}

impl Document {
    /// Creates an empty document for `relative_path`; metadata is filled in by the parser.
    pub fn new(relative_path: &str, raw_content: &str) -> Self {
        Self {
            id: Self::id_from_path(relative_path),
            relative_path: relative_path.to_string(),
            title: String::new(),
            source_url: String::new(),
            authors: Vec::new(),
            published_date: String::new(),
            updated_date: String::new(),
            sections: Vec::new(),
            body: String::new(),
            tags: Vec::new(),
            content_hash: Self::compute_hash(raw_content),
        }
    }

    /// `Articles\Ten-Heuristics.md` -> `articles/ten-heuristics`
    pub fn id_from_path(relative_path: &str) -> String {
        let normalized = Self::normalize_id(relative_path);
        if let Some((stem, ext)) = normalized.rsplit_once('.')
            && !stem.is_empty()
            && !stem.ends_with('/')
            && !ext.contains('/')
        {
            return stem.to_string();
        }
        normalized
    }

    /// Separator and case normalization shared by path-derived and user-supplied ids.
    pub fn normalize_id(raw: &str) -> String {
        let sanitized = Validator::sanitize_file_path(raw);
        sanitized
            .trim_start_matches("./")
            .trim_matches('/')
            .to_lowercase()
    }

    pub fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn byline(&self) -> String {
        self.authors.join(", ")
    }

    /// Renders the header block in the conventional article layout followed by
    /// the body markdown, so parsing the output yields the same title, source
    /// and sections.
    pub fn to_markdown(&self) -> String {
        let mut blocks: Vec<String> = Vec::new();

        if !self.title.is_empty() {
            // a trailing `#` would otherwise be read as a closing sequence
            if self.title.ends_with('#') {
                blocks.push(format!("# {} #", self.title));
            } else {
                blocks.push(format!("# {}", self.title));
            }
        }
        if !self.source_url.is_empty() {
            if self.source_url.starts_with(['*', '_']) {
                blocks.push(format!("Source: <{}>", self.source_url));
            } else {
                blocks.push(format!("Source: {}", self.source_url));
            }
        }
        if !self.authors.is_empty() {
            blocks.push(format!("By {}", self.byline()));
        }

        let dates = match (self.published_date.is_empty(), self.updated_date.is_empty()) {
            (false, false) => Some(format!(
                "Published: {}; Updated: {}",
                self.published_date, self.updated_date
            )),
            (false, true) => Some(format!("Published: {}", self.published_date)),
            (true, false) => Some(format!("Updated: {}", self.updated_date)),
            (true, true) => None,
        };
        blocks.extend(dates);

        if !self.tags.is_empty() {
            blocks.push(format!("Tags: {}", self.tags.join(", ")));
        }

        // a leading thematic break would be mistaken for front matter
        if blocks.is_empty() && self.body.lines().next().map(str::trim_end) == Some("---") {
            blocks.push("---\n---".to_string());
        }

        if !self.body.is_empty() {
            blocks.push(self.body.clone());
        }

        let mut rendered = blocks.join("\n\n");
        rendered.push('\n');
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new("articles/ten-usability-heuristics.md", "# Test Content");

        assert_eq!(doc.id, "articles/ten-usability-heuristics");
        assert_eq!(doc.relative_path, "articles/ten-usability-heuristics.md");
        assert!(!doc.content_hash.is_empty());
        assert!(doc.title.is_empty());
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_hash_consistency() {
        let content = "Test content";
        let hash1 = Document::compute_hash(content);
        let hash2 = Document::compute_hash(content);
        assert_eq!(hash1, hash2);
        assert_ne!(hash1, Document::compute_hash("Other content"));
    }

    #[test]
    fn test_id_from_path() {
        assert_eq!(Document::id_from_path("Nav\\Mega-Menus.md"), "nav/mega-menus");
        assert_eq!(Document::id_from_path("./f-shaped.markdown"), "f-shaped");
        assert_eq!(Document::id_from_path("README"), "readme");
        assert_eq!(Document::id_from_path(".hidden"), ".hidden");
        assert_eq!(Document::id_from_path("v1.2/notes"), "v1.2/notes");
        assert_eq!(Document::id_from_path("a.b.md"), "a.b");
    }

    #[test]
    fn test_normalize_id_keeps_dots() {
        assert_eq!(Document::normalize_id("Nav\\Mega-Menus"), "nav/mega-menus");
        assert_eq!(Document::normalize_id("/A.B/"), "a.b");
    }

    #[test]
    fn test_leading_rule_is_not_frontmatter() {
        let mut doc = Document::new("rule.md", "");
        doc.body = "---\nbar\n---\nbody".to_string();

        assert_eq!(doc.to_markdown(), "---\n---\n\n---\nbar\n---\nbody\n");
    }

    #[test]
    fn test_to_markdown_layout() {
        let mut doc = Document::new("breadcrumbs.md", "");
        doc.title = "Breadcrumbs: 11 Design Guidelines".to_string();
        doc.source_url = "https://www.nngroup.com/articles/breadcrumbs/".to_string();
        doc.authors = vec!["Page Laubheimer".to_string()];
        doc.published_date = "2018-12-16".to_string();
        doc.body = "Breadcrumbs are a secondary navigation aid.\n\n\
                    ## Guidelines\n\n\
                    Show the path, not the history."
            .to_string();

        let rendered = doc.to_markdown();
        assert_eq!(
            rendered,
            "# Breadcrumbs: 11 Design Guidelines\n\n\
             Source: https://www.nngroup.com/articles/breadcrumbs/\n\n\
             By Page Laubheimer\n\n\
             Published: 2018-12-16\n\n\
             Breadcrumbs are a secondary navigation aid.\n\n\
             ## Guidelines\n\n\
             Show the path, not the history.\n"
        );
    }
}
