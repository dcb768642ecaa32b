// file: src/parser/patterns.rs
// description: compiled regex patterns for article header lines
// reference: https://docs.rs/regex

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref TITLE_LINE: Regex = Regex::new(
        r"^#[ \t]+(.+?)(?:[ \t]+#+)?[ \t]*$"
    ).expect("TITLE_LINE regex is valid");

    pub static ref SUBHEADING_LINE: Regex = Regex::new(
        r"^#{2,6}[ \t]+\S"
    ).expect("SUBHEADING_LINE regex is valid");

    pub static ref SOURCE_LINE: Regex = Regex::new(
        r"(?i)^[ \t]*(?:\*\*|__)?source:(?:\*\*|__)?[ \t]*(.*?)[ \t]*$"
    ).expect("SOURCE_LINE regex is valid");

    pub static ref BYLINE: Regex = Regex::new(
        r"^[ \t]*(?:\*\*|__|\*|_)?By[ \t]+(.+?)(?:\*\*|__|\*|_)?[ \t]*$"
    ).expect("BYLINE regex is valid");

    pub static ref DATE_LINE: Regex = Regex::new(
        r"(?i)^[ \t]*(?:\*\*|__|\*|_)?(?:originally[ \t]+)?(?:published|updated)\b"
    ).expect("DATE_LINE regex is valid");

    /// Group 1 is the `:` marker, group 2 the date text.
    pub static ref PUBLISHED: Regex = Regex::new(
        r"(?i)published(?:[ \t]+on)?[ \t]*(:)?(?:\*\*|__)?[ \t]*([^;|*_]+)"
    ).expect("PUBLISHED regex is valid");

    pub static ref UPDATED: Regex = Regex::new(
        r"(?i)updated(?:[ \t]+on)?[ \t]*(:)?(?:\*\*|__)?[ \t]*([^;|*_]+)"
    ).expect("UPDATED regex is valid");

    pub static ref TAGS_LINE: Regex = Regex::new(
        r"(?i)^[ \t]*(?:\*\*|__)?(?:tags|topics):(?:\*\*|__)?[ \t]*(.+?)[ \t]*$"
    ).expect("TAGS_LINE regex is valid");

    pub static ref MARKDOWN_LINK: Regex = Regex::new(
        r"\[([^\]]*)\]\(([^)\s]*)(?:[ \t]+[^)]*)?\)"
    ).expect("MARKDOWN_LINK regex is valid");

    pub static ref AUTHOR_SEPARATOR: Regex = Regex::new(
        r"(?i)[ \t]*(?:,|&|\band\b)[ \t]*"
    ).expect("AUTHOR_SEPARATOR regex is valid");
}

const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%d %B %Y", "%B %d %Y"];

/// `YYYY-MM-DD` for a date in one of the recognized formats.
pub fn parse_date(raw: &str) -> Option<String> {
    let cleaned = clean_date(raw);

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cleaned, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}

/// Normalizes a recognized date to `YYYY-MM-DD`; unrecognized text is returned trimmed.
pub fn normalize_date(raw: &str) -> String {
    parse_date(raw).unwrap_or_else(|| clean_date(raw).to_string())
}

fn clean_date(raw: &str) -> &str {
    raw.trim().trim_end_matches('.').trim()
}

/// `[Jakob Nielsen](https://...)` -> `Jakob Nielsen`
pub fn strip_links(text: &str) -> String {
    MARKDOWN_LINK.replace_all(text, "$1").into_owned()
}

/// Accepts `<url>`, `[text](url)` or a bare URL.
pub fn extract_url(text: &str) -> String {
    let trimmed = text.trim();

    if let Some(captures) = MARKDOWN_LINK.captures(trimmed)
        && let Some(url) = captures.get(2)
        && !url.as_str().is_empty()
    {
        return url.as_str().to_string();
    }

    trimmed
        .trim_start_matches('<')
        .trim_end_matches('>')
        .trim()
        .to_string()
}
