// file: src/index/builder.rs
// description: inverted index construction and the read-only corpus index
// reference: term -> document postings with per-document term frequency

use crate::index::tokenizer::Tokenizer;
use crate::models::Document;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

type Postings = BTreeMap<String, u32>;

/// Collects documents; tokenization happens once in [`IndexBuilder::build`].
///
/// Adding and merging are commutative: when two documents share an id the one
/// with the smaller content hash wins, whatever the arrival order.
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    tokenizer: Tokenizer,
    documents: BTreeMap<String, Document>,
}

/// Immutable token -> document lookup. Built once, then only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusIndex {
    tokenizer: Tokenizer,
    documents: BTreeMap<String, Document>,
    postings: BTreeMap<String, Postings>,
}

impl IndexBuilder {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            documents: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, document: Document) {
        let replace = match self.documents.get(&document.id) {
            None => true,
            Some(existing) => {
                let incoming_wins = precedence(&document) < precedence(existing);
                if existing != &document {
                    let (kept, dropped) = if incoming_wins {
                        (&document, existing)
                    } else {
                        (existing, &document)
                    };
                    warn!(
                        "Duplicate document id {}: dropping {}, keeping {}",
                        document.id, dropped.relative_path, kept.relative_path
                    );
                }
                incoming_wins
            }
        };

        if replace {
            self.documents.insert(document.id.clone(), document);
        }
    }

    pub fn extend(&mut self, documents: impl IntoIterator<Item = Document>) {
        for document in documents {
            self.add(document);
        }
    }

    pub fn merge(mut self, other: IndexBuilder) -> Self {
        self.extend(other.documents.into_values());
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn build(self) -> CorpusIndex {
        let mut postings: BTreeMap<String, Postings> = BTreeMap::new();

        for (id, document) in &self.documents {
            for token in indexed_tokens(&self.tokenizer, document) {
                *postings
                    .entry(token)
                    .or_default()
                    .entry(id.clone())
                    .or_insert(0) += 1;
            }
        }

        info!(
            "Built index: {} documents, {} tokens",
            self.documents.len(),
            postings.len()
        );

        CorpusIndex {
            tokenizer: self.tokenizer,
            documents: self.documents,
            postings,
        }
    }
}

/// Smaller wins: content hash first, relative path for identical content.
fn precedence(document: &Document) -> (&str, &str) {
    (document.content_hash.as_str(), document.relative_path.as_str())
}

fn indexed_tokens(tokenizer: &Tokenizer, document: &Document) -> Vec<String> {
    let mut tokens: Vec<String> = tokenizer.tokenize(&document.title).collect();

    for section in &document.sections {
        tokens.extend(tokenizer.tokenize(&section.heading));
        tokens.extend(tokenizer.tokenize(&section.text));
    }

    for tag in &document.tags {
        tokens.extend(tokenizer.tokenize(tag));
    }

    debug!("Document {} contributes {} tokens", document.id, tokens.len());
    tokens
}

impl CorpusIndex {
    pub fn empty(tokenizer: Tokenizer) -> Self {
        IndexBuilder::new(tokenizer).build()
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    /// Like [`CorpusIndex::document`] for user-typed ids: case and separators are normalized.
    pub fn lookup(&self, id: &str) -> Option<&Document> {
        self.documents.get(&Document::normalize_id(id))
    }

    /// Documents in ascending id order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// Document id -> occurrences of `token`, for an already normalized token.
    pub fn postings(&self, token: &str) -> Option<&BTreeMap<String, u32>> {
        self.postings.get(token)
    }

    pub fn document_ids(&self, token: &str) -> impl Iterator<Item = &str> {
        self.postings
            .get(token)
            .into_iter()
            .flat_map(|postings| postings.keys().map(String::as_str))
    }

}
