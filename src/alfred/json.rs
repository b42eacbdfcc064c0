use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::NoteSummary;

/// One entry of a JSON items document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonItem {
    pub title: String,
    pub arg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

#[derive(Serialize)]
struct JsonItems<'a> {
    items: &'a [JsonItem],
}

/// Renders items as a JSON document.
pub fn json_items(items: &[JsonItem]) -> Result<String> {
    serde_json::to_string(&JsonItems { items }).context("Failed to serialize items")
}

/// Items for tag names; selecting one passes the tag itself.
pub fn tag_items(tags: &[String]) -> Result<String> {
    let items: Vec<JsonItem> = tags
        .iter()
        .map(|tag| JsonItem {
            title: tag.clone(),
            arg: tag.clone(),
            subtitle: None,
        })
        .collect();

    json_items(&items)
}

/// Items for note titles, subtitled with their leaf tags.
///
/// `arg_for` chooses what the launcher receives for each note.
pub fn title_items<F>(notes: &[NoteSummary], arg_for: F) -> Result<String>
where
    F: Fn(&NoteSummary) -> String,
{
    let items: Vec<JsonItem> = notes
        .iter()
        .map(|note| JsonItem {
            title: note.title.clone(),
            arg: arg_for(note),
            subtitle: Some(note.unique_tags().join(", ")),
        })
        .collect();

    json_items(&items)
}
