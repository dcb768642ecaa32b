// file: src/index/mod.rs
// description: keyword index module exports
// reference: internal module structure

pub mod builder;
pub mod tokenizer;

pub use builder::{CorpusIndex, IndexBuilder};
pub use tokenizer::Tokenizer;
