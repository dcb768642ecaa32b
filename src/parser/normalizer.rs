// file: src/parser/normalizer.rs
// description: Markdown normalization applied before header detection
// reference: CommonMark block syntax

pub struct MarkdownNormalizer;

impl MarkdownNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, content: &str) -> String {
        let mut normalized = content
            .trim_start_matches('\u{feff}')
            .replace("\r\n", "\n")
            .replace('\r', "\n");

        normalized = self.normalize_headings(&normalized);
        normalized = self.normalize_lists(&normalized);
        self.normalize_line_breaks(&normalized)
    }

    /// `#Title` -> `# Title`, outside fenced code only.
    fn normalize_headings(&self, content: &str) -> String {
        let mut result = Vec::new();
        let mut in_code_block = false;

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_code_block = !in_code_block;
                result.push(line.to_string());
                continue;
            }

            // indented `#` lines are code or continuation text, not headings
            if !in_code_block && line.starts_with('#') {
                let depth = line.chars().take_while(|&c| c == '#').count();
                let heading = line[depth..].trim();

                if depth <= 6 && !heading.is_empty() {
                    result.push(format!("{} {}", "#".repeat(depth), heading));
                    continue;
                }
            }

            result.push(line.to_string());
        }

        result.join("\n")
    }

    fn normalize_lists(&self, content: &str) -> String {
        let mut result = Vec::new();
        let mut in_code_block = false;

        for line in content.lines() {
            let trimmed = line.trim_start();

            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_code_block = !in_code_block;
            }

            if !in_code_block
                && let Some(stripped) = trimmed
                    .strip_prefix("* ")
                    .or_else(|| trimmed.strip_prefix("+ "))
            {
                let indent = line.len() - trimmed.len();
                result.push(format!("{}- {}", " ".repeat(indent), stripped.trim()));
            } else {
                result.push(line.to_string());
            }
        }

        result.join("\n")
    }

    fn normalize_line_breaks(&self, content: &str) -> String {
        let mut normalized = content
            .lines()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n");

        while normalized.contains("\n\n\n") {
            normalized = normalized.replace("\n\n\n", "\n\n");
        }

        normalized
    }
}

impl Default for MarkdownNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_get_a_space() {
        let normalizer = MarkdownNormalizer::new();
        let normalized = normalizer.normalize("#Mega Menus\n##  Guidelines  \n    #indented");

        assert_eq!(normalized, "# Mega Menus\n## Guidelines\n    #indented");
    }

    #[test]
    fn test_code_fence_untouched() {
        let normalizer = MarkdownNormalizer::new();
        let content = "```\n#include <stdio.h>\n* ptr\n```";

        assert_eq!(normalizer.normalize(content), content);
    }

    #[test]
    fn test_bullets_become_dashes() {
        let normalizer = MarkdownNormalizer::new();
        let content = "* Match the real world\n+ User control\n  * Undo\n- Consistency";

        assert_eq!(
            normalizer.normalize(content),
            "- Match the real world\n- User control\n  - Undo\n- Consistency"
        );
    }

    #[test]
    fn test_bom_and_crlf_removed() {
        let normalizer = MarkdownNormalizer::new();
        let content = "\u{feff}Source: https://www.nngroup.com/\r\n\r\n\r\n\r\nBody";

        assert_eq!(normalizer.normalize(content), "Source: https://www.nngroup.com/\n\nBody");
    }
}
