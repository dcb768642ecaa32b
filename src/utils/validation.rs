// file: src/utils/validation.rs
// description: path validation utilities and helpers
// reference: input validation patterns

use crate::error::{CorpusError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(CorpusError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(CorpusError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_markdown_extension(path: &Path) -> Result<()> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("md") | Some("markdown") => Ok(()),
            _ => Err(CorpusError::Validation(format!(
                "File is not a markdown file: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_file(path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(CorpusError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }
        Ok(())
    }

    pub fn sanitize_file_path(path: &str) -> String {
        let mut sanitized = path.replace('\\', "/").trim().to_string();
        while sanitized.contains("//") {
            sanitized = sanitized.replace("//", "/");
        }
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_corpus_root_must_be_directory() {
        let temp = TempDir::new().unwrap();
        let article = temp.path().join("breadcrumbs.md");
        fs::write(&article, "# Breadcrumbs").unwrap();

        assert!(Validator::validate_directory(temp.path()).is_ok());
        assert!(Validator::validate_directory(&temp.path().join("articles")).is_err());
        assert!(Validator::validate_directory(&article).is_err());
        assert!(Validator::validate_file(&article).is_ok());
        assert!(Validator::validate_file(temp.path()).is_err());
    }

    #[test]
    fn test_article_extensions() {
        for ok in ["mega-menus.md", "F-Shaped.MD", "scanning.markdown"] {
            assert!(Validator::validate_markdown_extension(Path::new(ok)).is_ok(), "{ok}");
        }
        for bad in ["notes.txt", "LICENSE", "index.html"] {
            assert!(Validator::validate_markdown_extension(Path::new(bad)).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_windows_separators_collapse() {
        assert_eq!(
            Validator::sanitize_file_path(" nav\\\\menus\\mega-menus.md "),
            "nav/menus/mega-menus.md"
        );
        assert_eq!(Validator::sanitize_file_path("a//b///c.md"), "a/b/c.md");
    }
}
