use html_escape::encode_text;

use super::ext;
use crate::models::NoteSummary;
use crate::tags::to_title_case;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
const OPEN_NOTE: &str = "Open note";
const CREATE_NOTE: &str = "Create note";

/// One entry of an XML items document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlItem {
    pub valid: bool,
    pub title: String,
    pub subtitle: Option<String>,
    pub arg: Option<String>,
}

impl XmlItem {
    /// An actionable item passing `arg` to the workflow.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        arg: impl Into<String>,
    ) -> Self {
        Self {
            valid: true,
            title: title.into(),
            subtitle: Some(subtitle.into()),
            arg: Some(arg.into()),
        }
    }

    /// A non-actionable, informational item.
    pub fn message(title: impl Into<String>) -> Self {
        Self {
            valid: false,
            title: title.into(),
            subtitle: None,
            arg: None,
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push_str(if self.valid {
            r#"<item valid="yes">"#
        } else {
            r#"<item valid="no">"#
        });
        write_element(out, "title", &self.title);
        if let Some(subtitle) = &self.subtitle {
            write_element(out, "subtitle", subtitle);
        }
        if let Some(arg) = &self.arg {
            write_element(out, "arg", arg);
        }
        out.push_str("</item>");
    }
}

/// Renders items as an XML document.
pub fn xml_items(items: &[XmlItem]) -> String {
    let mut out = String::from(XML_HEADER);
    out.push_str("<items>");
    for item in items {
        item.write_to(&mut out);
    }
    out.push_str("</items>");
    out
}

/// Items that open each note; the subtitle lists tags when `show_tags` is set.
pub fn open_items(results: &[NoteSummary], show_tags: bool) -> String {
    let items: Vec<XmlItem> = results
        .iter()
        .map(|note| {
            let subtitle = if show_tags {
                note.unique_tags().join(", ")
            } else {
                OPEN_NOTE.to_string()
            };
            XmlItem::new(note.title_case(), subtitle, note.id.as_str())
        })
        .collect();

    xml_items(&items)
}

/// A single item offering to create a note titled after `term`.
pub fn create_item(term: &str) -> String {
    let title = to_title_case(term);
    let arg = ext::key_value("create", &title);
    xml_items(&[XmlItem::new(title, CREATE_NOTE, arg)])
}

/// Items for `(subject, linked)` note pairs, each opening the linked note.
///
/// When there are no pairs a single informational item shows `empty_message`.
pub fn link_items(pairs: &[(&NoteSummary, &NoteSummary)], empty_message: &str) -> String {
    if pairs.is_empty() {
        return xml_items(&[XmlItem::message(empty_message)]);
    }

    let items: Vec<XmlItem> = pairs
        .iter()
        .map(|(subject, linked)| {
            let title = to_title_case(&format!("{} → {}", linked.title, subject.title));
            XmlItem::new(title, linked.unique_tags().join(", "), linked.id.as_str())
        })
        .collect();

    xml_items(&items)
}

fn write_element(out: &mut String, name: &str, text: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&encode_text(text));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
