// file: src/parser/mod.rs
// description: article parsing module exports
// reference: internal module structure

pub mod document;
pub mod frontmatter;
pub mod header;
pub mod markdown;
pub mod normalizer;
pub mod patterns;

pub use document::DocumentParser;
pub use frontmatter::{Frontmatter, FrontmatterParser};
pub use header::{ArticleHeader, HeaderParser};
pub use markdown::MarkdownParser;
pub use normalizer::MarkdownNormalizer;
