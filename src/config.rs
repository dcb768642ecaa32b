// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{CorpusError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub pipeline: PipelineConfig,
    pub index: IndexConfig,
    pub query: QueryConfig,
    #[serde(default)]
    pub tags: Vec<TagRule>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    pub root: PathBuf,
    #[serde(default)]
    pub skip_patterns: Vec<String>,
    pub max_file_size_mb: usize,
    #[serde(default = "default_skip_index_files")]
    pub skip_index_files: bool,
}

fn default_skip_index_files() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub parallel_workers: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexConfig {
    pub min_token_len: usize,
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryConfig {
    pub default_limit: usize,
}

/// Assigns `tag` to every document whose relative path contains one of `keywords`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TagRule {
    pub keywords: Vec<String>,
    pub tag: String,
}

impl Config {
    /// Layers built-in defaults, then the TOML file when it exists, then
    /// `CORPUS_SEARCH__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| CorpusError::Config(e.to_string()))?;
        let path = path.unwrap_or_else(|| Path::new("config/default.toml"));

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("CORPUS_SEARCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| CorpusError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| CorpusError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            corpus: CorpusConfig {
                root: PathBuf::from("./articles"),
                skip_patterns: vec![".git/".to_string(), "*.draft.md".to_string()],
                max_file_size_mb: 10,
                skip_index_files: true,
            },
            pipeline: PipelineConfig {
                parallel_workers: 4,
            },
            index: IndexConfig {
                min_token_len: 2,
                extra_stop_words: vec![],
            },
            query: QueryConfig { default_limit: 10 },
            tags: vec![],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(CorpusError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.corpus.max_file_size_mb == 0 {
            return Err(CorpusError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default_config().validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = Config::default_config();
        config.pipeline.parallel_workers = 0;
        assert!(matches!(config.validate(), Err(CorpusError::Config(_))));
    }

    #[test]
    fn test_load_from_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("corpus.toml");
        fs::write(
            &path,
            r#"
[corpus]
root = "./nng"
skip_patterns = ["*.zip"]
max_file_size_mb = 2

[pipeline]
parallel_workers = 8

[index]
min_token_len = 3
extra_stop_words = ["nng"]

[query]
default_limit = 5

[[tags]]
keywords = ["navigation", "menu"]
tag = "navigation"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.corpus.root, PathBuf::from("./nng"));
        assert_eq!(config.pipeline.parallel_workers, 8);
        assert_eq!(config.index.min_token_len, 3);
        assert_eq!(config.index.extra_stop_words, vec!["nng".to_string()]);
        assert_eq!(config.query.default_limit, 5);
        assert_eq!(config.tags.len(), 1);
        assert_eq!(config.tags[0].tag, "navigation");
    }

    #[test]
    fn test_env_applies_without_config_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("absent.toml");

        // SAFETY: no other test asserts on this key
        unsafe { std::env::set_var("CORPUS_SEARCH__CORPUS__MAX_FILE_SIZE_MB", "7") };
        let config = Config::load(Some(&missing));
        unsafe { std::env::remove_var("CORPUS_SEARCH__CORPUS__MAX_FILE_SIZE_MB") };

        let config = config.unwrap();
        assert_eq!(config.corpus.max_file_size_mb, 7);
        assert_eq!(config.query.default_limit, 10);
        assert_eq!(config.corpus.root, PathBuf::from("./articles"));
    }
}
