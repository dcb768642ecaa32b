// file: src/query/mod.rs
// description: query engine module exports
// reference: internal module structure

pub mod engine;

pub use engine::QueryEngine;
