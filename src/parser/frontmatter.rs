// file: src/parser/frontmatter.rs
// description: YAML frontmatter extraction from markdown
// reference: https://docs.rs/yaml-rust

use crate::error::{CorpusError, Result};
use std::collections::HashMap;
use yaml_rust::{Yaml, YamlLoader};

pub struct FrontmatterParser;

/// Scalar fields hold a single entry; YAML sequences keep every scalar element.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    pub fields: HashMap<String, Vec<String>>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_list(&self, key: &str) -> &[String] {
        self.fields.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl FrontmatterParser {
    pub fn new() -> Self {
        Self
    }

    /// Returns `None` when the content has no leading `---` fence.
    pub fn extract(&self, content: &str) -> Result<Option<(Frontmatter, String)>> {
        let mut lines = content.lines();
        match lines.next() {
            Some(first) if first.trim_end() == "---" => {}
            _ => return Ok(None),
        }

        let mut yaml_lines = Vec::new();
        let mut closed = false;
        for line in lines.by_ref() {
            let marker = line.trim_end();
            if marker == "---" || marker == "..." {
                closed = true;
                break;
            }
            yaml_lines.push(line);
        }

        if !closed {
            return Err(CorpusError::parse(
                "frontmatter",
                "frontmatter block is never closed",
            ));
        }

        let remaining_content = lines.collect::<Vec<_>>().join("\n");
        let yaml_content = yaml_lines.join("\n");

        let docs = YamlLoader::load_from_str(&yaml_content)
            .map_err(|e| CorpusError::parse("frontmatter", format!("YAML parse error: {}", e)))?;

        let mut fields = HashMap::new();

        match docs.first() {
            Some(Yaml::Hash(hash)) => {
                for (key, value) in hash {
                    if let Some(key) = key.as_str() {
                        let values = yaml_values(value);
                        if !values.is_empty() {
                            fields.insert(key.to_lowercase(), values);
                        }
                    }
                }
            }
            Some(Yaml::Null) | None => {}
            Some(_) => {
                return Err(CorpusError::parse(
                    "frontmatter",
                    "frontmatter must be a mapping",
                ));
            }
        }

        Ok(Some((
            Frontmatter { fields },
            remaining_content.trim_start_matches('\n').to_string(),
        )))
    }
}

fn yaml_values(value: &Yaml) -> Vec<String> {
    match value {
        Yaml::Array(items) => items.iter().filter_map(yaml_scalar).collect(),
        other => yaml_scalar(other).into_iter().collect(),
    }
}

fn yaml_scalar(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) | Yaml::Real(s) => Some(s.trim().to_string()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

impl Default for FrontmatterParser {
    fn default() -> Self {
        Self::new()
    }
}
