// file: src/parser/markdown.rs
// description: splits article bodies into heading-delimited sections with pulldown-cmark
// reference: https://docs.rs/pulldown-cmark

use crate::models::Section;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

pub struct MarkdownParser;

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }

    /// Returns the body's sections in document order.
    ///
    /// Text before the first heading becomes a level-0 section with an empty
    /// heading. Sections with neither heading nor text are dropped.
    pub fn sections(&self, body: &str) -> Vec<Section> {
        let parser = Parser::new(body);

        let mut sections = Vec::new();
        let mut current = Section::new("", "", 0);
        let mut text = String::new();
        let mut current_heading: Option<(u32, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    flush(&mut sections, current, &text);
                    current = Section::new("", "", 0);
                    text.clear();
                    current_heading = Some((level as u32, String::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, heading)) = current_heading.take() {
                        current = Section::new(heading.trim(), "", level);
                    }
                }
                Event::Text(chunk) | Event::Code(chunk) => match current_heading {
                    Some((_, ref mut heading)) => heading.push_str(&chunk),
                    None => text.push_str(&chunk),
                },
                Event::SoftBreak => match current_heading {
                    Some((_, ref mut heading)) => heading.push(' '),
                    None => text.push(' '),
                },
                Event::HardBreak => text.push('\n'),
                Event::End(TagEnd::Paragraph)
                | Event::End(TagEnd::CodeBlock)
                | Event::End(TagEnd::List(_)) => {
                    block_break(&mut text);
                }
                Event::End(TagEnd::Item) => {
                    if !text.ends_with('\n') {
                        text.push('\n');
                    }
                }
                _ => {}
            }
        }

        flush(&mut sections, current, &text);
        sections
    }
}

fn block_break(text: &mut String) {
    let trimmed_len = text.trim_end().len();
    text.truncate(trimmed_len);
    if !text.is_empty() {
        text.push_str("\n\n");
    }
}

fn flush(sections: &mut Vec<Section>, mut section: Section, text: &str) {
    section.text = tidy(text);
    if !section.heading.is_empty() || !section.text.is_empty() {
        sections.push(section);
    }
}

/// Trims trailing whitespace per line and collapses blank-line runs.
fn tidy(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut blank_run = 0;

    for line in text.trim().lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        result.push_str(line);
        result.push('\n');
    }

    result.trim_end().to_string()
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}
