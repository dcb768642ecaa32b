// file: src/loader/mod.rs
// description: corpus discovery and raw file loading module exports
// reference: internal module structure

pub mod classifier;
pub mod reader;
pub mod scanner;

pub use classifier::FileClassifier;
pub use reader::{DocumentLoader, RawFile, RawFiles};
pub use scanner::{FileScanner, ScannedFile};
