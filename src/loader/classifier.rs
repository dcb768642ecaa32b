// file: src/loader/classifier.rs
// description: path-based tag assignment for loaded articles
// reference: configurable path-based classification

use crate::config::TagRule;

pub struct FileClassifier {
    rules: Vec<TagRule>,
}

impl FileClassifier {
    pub fn new(rules: Vec<TagRule>) -> Self {
        Self { rules }
    }

    /// Every rule with a keyword contained in the lowercased path contributes its tag,
    /// in rule order.
    pub fn tags_for(&self, relative_path: &str) -> Vec<String> {
        let path_str = relative_path.replace('\\', "/").to_lowercase();
        let mut tags = Vec::new();

        for rule in &self.rules {
            let tag = rule.tag.trim().to_lowercase();
            if tag.is_empty() || tags.contains(&tag) {
                continue;
            }

            if rule
                .keywords
                .iter()
                .any(|keyword| path_str.contains(&keyword.to_lowercase()))
            {
                tags.push(tag);
            }
        }

        tags
    }

    /// Corpus listing pages (`README.md`, `index.md`, `_index.md`) are not articles.
    pub fn is_index_file(&self, relative_path: &str) -> bool {
        let file_name = relative_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or("")
            .to_lowercase();
        let stem = file_name.split('.').next().unwrap_or("");

        matches!(stem, "readme" | "index" | "_index")
    }
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::new(vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(keywords: &[&str], tag: &str) -> TagRule {
        TagRule {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            tag: tag.to_string(),
        }
    }

    #[test]
    fn test_tags_with_rules() {
        let classifier = FileClassifier::new(vec![
            rule(&["navigation", "menu"], "Navigation"),
            rule(&["heuristic"], "heuristics"),
        ]);

        assert_eq!(
            classifier.tags_for("articles/Mega-Menus.md"),
            vec!["navigation".to_string()]
        );
        assert_eq!(
            classifier.tags_for("heuristics/navigation-heuristic.md"),
            vec!["navigation".to_string(), "heuristics".to_string()]
        );
        assert!(classifier.tags_for("reading/f-shaped.md").is_empty());
    }

    #[test]
    fn test_tags_no_rules() {
        let classifier = FileClassifier::default();
        assert!(classifier.tags_for("anything/file.md").is_empty());
    }

    #[test]
    fn test_duplicate_tags_collapsed() {
        let classifier = FileClassifier::new(vec![
            rule(&["menu"], "navigation"),
            rule(&["mega"], "navigation"),
        ]);

        assert_eq!(
            classifier.tags_for("mega-menus.md"),
            vec!["navigation".to_string()]
        );
    }

    #[test]
    fn test_index_file_detection() {
        let classifier = FileClassifier::default();

        assert!(classifier.is_index_file("README.md"));
        assert!(classifier.is_index_file("articles\\index.md"));
        assert!(classifier.is_index_file("_index.markdown"));
        assert!(!classifier.is_index_file("articles/indexing-guidelines.md"));
        assert!(!classifier.is_index_file("mega-menus.md"));
    }
}
