// file: src/query/engine.rs
// description: keyword and tag queries over a built corpus index
// reference: naive term-frequency ranking over inverted index postings

use crate::index::CorpusIndex;
use crate::models::DocumentSummary;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub struct QueryEngine<'a> {
    index: &'a CorpusIndex,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a CorpusIndex) -> Self {
        Self { index }
    }

    /// Documents containing any query token, by descending summed term
    /// frequency, ties broken by ascending document id.
    ///
    /// Empty, stop-word-only and unmatched queries yield nothing.
    pub fn search(&self, query: &str) -> impl Iterator<Item = DocumentSummary> + 'a {
        let index = self.index;
        let tokens: BTreeSet<String> = index.tokenizer().tokenize(query).collect();

        let mut scores: BTreeMap<&'a str, u32> = BTreeMap::new();
        for token in &tokens {
            if let Some(postings) = index.postings(token) {
                for (id, frequency) in postings {
                    *scores.entry(id.as_str()).or_insert(0) += frequency;
                }
            }
        }

        debug!(
            "Query {:?}: {} tokens, {} matching documents",
            query,
            tokens.len(),
            scores.len()
        );

        let mut ranked: Vec<(&'a str, u32)> = scores.into_iter().collect();
        ranked.sort_by(|(id_a, score_a), (id_b, score_b)| {
            score_b.cmp(score_a).then_with(|| id_a.cmp(id_b))
        });

        ranked.into_iter().filter_map(move |(id, score)| {
            index
                .document(id)
                .map(|document| DocumentSummary::from_document(document, score))
        })
    }

    /// Documents carrying `tag` (case-insensitive), in ascending id order.
    pub fn search_tag(&self, tag: &str) -> impl Iterator<Item = DocumentSummary> + 'a {
        let wanted = tag.trim().to_lowercase();

        self.index.documents().filter_map(move |document| {
            (!wanted.is_empty() && document.tags.iter().any(|t| t.to_lowercase() == wanted))
                .then(|| DocumentSummary::from_document(document, 1))
        })
    }
}
