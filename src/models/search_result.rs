// file: src/models/search_result.rs
// description: Document summary returned by keyword and tag queries
// reference: Used for ranked query results

use super::Document;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// Document ID (normalized relative path)
    pub id: String,

    pub title: String,

    /// Original article URL, empty when the article has no `Source:` line
    pub source_url: String,

    /// Summed term frequency of the query tokens
    pub score: u32,
}

impl DocumentSummary {
    pub fn from_document(document: &Document, score: u32) -> Self {
        Self {
            id: document.id.clone(),
            title: document.title.clone(),
            source_url: document.source_url.clone(),
            score,
        }
    }

    /// Format as a two-line summary for terminal display
    pub fn format_summary(&self) -> String {
        let title = if self.title.is_empty() {
            self.id.as_str()
        } else {
            self.title.as_str()
        };

        if self.source_url.is_empty() {
            format!("{} (matches: {})\n  [{}]", title, self.score, self.id)
        } else {
            format!(
                "{} (matches: {})\n  {}",
                title, self.score, self.source_url
            )
        }
    }
}
