// file: src/exporter/mod.rs
// description: index snapshot export module
// reference: internal module structure

pub mod json;

pub use json::{ExportManifest, IndexSnapshot, JsonExporter};
