// file: src/parser/header.rs
// description: extraction of the title, source, byline, date and tag block of an article
// reference: line-oriented header scan using compiled patterns

use super::patterns::{
    AUTHOR_SEPARATOR, BYLINE, DATE_LINE, PUBLISHED, SOURCE_LINE, SUBHEADING_LINE, TAGS_LINE,
    TITLE_LINE, UPDATED, extract_url, normalize_date, parse_date, strip_links,
};
use regex::Regex;

const MAX_BYLINE_LEN: usize = 160;

/// Metadata found before the first sub-heading. Missing fields stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleHeader {
    pub title: String,
    pub source_url: String,
    pub authors: Vec<String>,
    pub published_date: String,
    pub updated_date: String,
    pub tags: Vec<String>,
}

pub struct HeaderParser;

impl HeaderParser {
    pub fn new() -> Self {
        Self
    }

    /// Splits `content` into the header metadata and the remaining body markdown.
    ///
    /// Header lines are only recognized before the first `##`-or-deeper heading,
    /// and never inside fenced code blocks; each field is taken from its first
    /// occurrence.
    pub fn split(&self, content: &str) -> (ArticleHeader, String) {
        let mut header = ArticleHeader::default();
        let mut body = Vec::new();
        let mut in_header_zone = true;
        let mut in_fence = false;
        // set after a consumed line so the blank lines around it merge into one
        let mut gap = false;

        for line in content.lines() {
            let trimmed = line.trim_start();
            let after_blank = body.last().is_none_or(|last: &&str| last.trim().is_empty());
            if trimmed.is_empty() && gap && after_blank {
                continue;
            }
            if !trimmed.is_empty() {
                gap = false;
            }

            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
                body.push(line);
                continue;
            }

            if in_fence || !in_header_zone {
                body.push(line);
                continue;
            }

            if SUBHEADING_LINE.is_match(trimmed) {
                in_header_zone = false;
                body.push(line);
                continue;
            }

            if self.consume_header_line(&mut header, line) {
                gap = true;
            } else {
                body.push(line);
            }
        }

        // leading indentation is significant (indented code), blank lines are not
        let body = body.join("\n");
        (header, body.trim_start_matches('\n').trim_end().to_string())
    }

    /// A line is consumed only when it yields a non-empty value, so every
    /// consumed line leaves its field set.
    fn consume_header_line(&self, header: &mut ArticleHeader, line: &str) -> bool {
        if header.title.is_empty()
            && let Some(caps) = TITLE_LINE.captures(line)
            && !caps[1].trim().is_empty()
        {
            header.title = caps[1].trim().to_string();
            return true;
        }

        if header.source_url.is_empty()
            && let Some(caps) = SOURCE_LINE.captures(line)
        {
            header.source_url = extract_url(&caps[1]);
            return !header.source_url.is_empty();
        }

        // prose sentences starting with "By" are not bylines
        if header.authors.is_empty()
            && let Some(caps) = BYLINE.captures(line)
            && caps[1].len() <= MAX_BYLINE_LEN
            && !caps[1].trim_end().ends_with('.')
        {
            header.authors = Self::parse_authors(&caps[1]);
            return !header.authors.is_empty();
        }

        if DATE_LINE.is_match(line) && self.consume_dates(header, line) {
            return true;
        }

        if header.tags.is_empty()
            && let Some(caps) = TAGS_LINE.captures(line)
        {
            header.tags = Self::parse_list(&caps[1]);
            return !header.tags.is_empty();
        }

        false
    }

    fn consume_dates(&self, header: &mut ArticleHeader, line: &str) -> bool {
        let mut found = false;

        if header.published_date.is_empty()
            && let Some(date) = date_value(&PUBLISHED, line)
        {
            header.published_date = date;
            found = true;
        }

        if header.updated_date.is_empty()
            && let Some(date) = date_value(&UPDATED, line)
        {
            header.updated_date = date;
            found = true;
        }

        found
    }

    /// `[Kate Moran](...), Raluca Budiu and Jakob Nielsen` -> three authors
    pub fn parse_authors(raw: &str) -> Vec<String> {
        let plain = strip_links(raw);
        AUTHOR_SEPARATOR
            .split(&plain)
            .map(|name| name.trim().trim_matches(|c: char| c == '*' || c == '_').trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn parse_list(raw: &str) -> Vec<String> {
        strip_links(raw)
            .split(',')
            .map(|item| item.trim().to_lowercase())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

/// Date text after a `Published`/`Updated` marker. Without a `:` the text must
/// be a recognizable date, so a sentence like "Published research shows..."
/// stays in the body.
fn date_value(pattern: &Regex, line: &str) -> Option<String> {
    let caps = pattern.captures(line)?;
    let raw = caps.get(2)?.as_str();

    match parse_date(raw) {
        Some(date) => Some(date),
        None if caps.get(1).is_some() => {
            Some(normalize_date(raw)).filter(|date| !date.is_empty())
        }
        None => None,
    }
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new()
    }
}
