//! Transcripts: the sections of tagged notes that follow the tag.
//!
//! A note like
//!
//! ```text
//! ## Standup
//! #project/apollo
//! Shipped the importer.
//! ### Blockers
//! None.
//! ## Lunch
//! Tacos.
//! ```
//!
//! contributes everything from the tagged paragraph down to the next
//! level-1 or level-2 heading to the transcript for `project/apollo`.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use tracing::debug;

use crate::models::NoteRecord;

/// Headings at or above this level end an extracted section.
const SECTION_BREAK_LEVEL: usize = 3;

/// Extracts the tagged sections of a single Markdown document.
pub struct TagExtractor<'a> {
    source: &'a str,
    tag: &'a str,
}

#[derive(Debug)]
struct Block {
    heading_level: Option<usize>,
    lines: Vec<String>,
}

impl Block {
    fn heading(level: usize) -> Self {
        Self {
            heading_level: Some(level),
            lines: vec![String::new()],
        }
    }

    fn paragraph() -> Self {
        Self {
            heading_level: None,
            lines: vec![String::new()],
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(line) = self.lines.last_mut() {
            line.push_str(text);
        }
    }

    fn break_line(&mut self) {
        self.lines.push(String::new());
    }

    fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl<'a> TagExtractor<'a> {
    /// `tag` is the hashtag as written in the note, e.g. `#work/coffee`.
    pub fn new(source: &'a str, tag: &'a str) -> Self {
        Self { source, tag }
    }

    /// Walks headings and paragraphs in document order and returns the text
    /// of every tagged section.
    ///
    /// A paragraph containing the tag starts a section; a heading of level
    /// 1 or 2 ends it. Headings inside a section are re-emitted as Markdown
    /// headings, and lines consisting only of the tag are dropped.
    pub fn extract(&self) -> String {
        let mut out = String::new();
        let mut active = false;
        let mut current: Option<Block> = None;

        for event in Parser::new(self.source) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current = Some(Block::heading(heading_depth(level)));
                }
                Event::Start(Tag::Paragraph) => {
                    current = Some(Block::paragraph());
                }
                Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::Paragraph) => {
                    if let Some(block) = current.take() {
                        active = self.visit(&block, active);
                        if active {
                            self.write_block(&block, &mut out);
                        }
                    }
                }
                Event::Text(text) | Event::Code(text) | Event::InlineHtml(text) => {
                    if let Some(block) = current.as_mut() {
                        block.push_text(&text);
                    }
                }
                Event::SoftBreak | Event::HardBreak => {
                    if let Some(block) = current.as_mut() {
                        block.break_line();
                    }
                }
                _ => {}
            }
        }

        out
    }

    /// Returns whether extraction is active after `block`.
    fn visit(&self, block: &Block, active: bool) -> bool {
        match block.heading_level {
            Some(level) if level < SECTION_BREAK_LEVEL => {
                if active {
                    debug!(level, "section ended by heading");
                }
                false
            }
            Some(_) => active,
            None if block.contains(self.tag) => {
                debug!(tag = self.tag, "found tagged paragraph");
                true
            }
            None => active,
        }
    }

    fn write_block(&self, block: &Block, out: &mut String) {
        for line in &block.lines {
            if line.trim() == self.tag {
                continue;
            }
            if let Some(level) = block.heading_level {
                out.push_str(&"#".repeat(level));
                out.push(' ');
            }
            out.push_str(line);
            out.push('\n');
        }
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Converts a tag name as typed by the user into the database tag name and
/// the hashtag as it appears in note text.
///
/// Accepts `work/coffee` or `#work/coffee`. Tags containing spaces use the
/// closed `#multi word#` form.
pub fn normalize_tag(tag: &str) -> (String, String) {
    let name = tag.trim().trim_start_matches('#').trim_end_matches('#');
    let hashtag = if name.contains(char::is_whitespace) {
        format!("#{name}#")
    } else {
        format!("#{name}")
    };
    (name.to_string(), hashtag)
}

/// Renders a date-headed transcript of `records` for `hashtag`.
pub fn render_transcript(records: &[NoteRecord], hashtag: &str) -> String {
    let mut transcript = String::new();

    for record in records {
        transcript.push_str("## ");
        transcript.push_str(&record.title);
        transcript.push('\n');
        if let Some(modified) = &record.modified {
            transcript.push('`');
            transcript.push_str(modified);
            transcript.push_str("`\n");
        }

        transcript.push_str(&TagExtractor::new(&record.text, hashtag).extract());
        transcript.push('\n');
    }

    transcript
}
