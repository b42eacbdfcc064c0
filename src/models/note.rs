use serde::{Deserialize, Serialize};

use super::ShortId;
use crate::tags::{remove_intermediate_prefixes, to_title_case};

/// Separator between levels of a hierarchical tag.
pub const TAG_SEPARATOR: &str = "/";

/// A reference to a note: its identifier, title, and tags.
///
/// This is what search results, link queries, and title listings return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    /// The note's unique identifier in the note database.
    pub id: String,
    /// The note's title.
    pub title: String,
    /// Every tag attached to the note, including intermediate levels.
    pub tags: Vec<String>,
}

impl NoteSummary {
    /// Creates a summary without tags.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags: Vec::new(),
        }
    }

    /// Sets the tags from a comma-joined list as produced by `GROUP_CONCAT`.
    pub fn with_joined_tags(mut self, joined: Option<&str>) -> Self {
        self.tags = split_joined_tags(joined);
        self
    }

    /// Returns the leaf tags only.
    ///
    /// # Examples
    ///
    /// ```
    /// use freddiebear::NoteSummary;
    ///
    /// let note = NoteSummary::new("id", "title").with_joined_tags(Some("a,a/b,a/b/c,d"));
    /// assert_eq!(note.unique_tags(), vec!["a/b/c", "d"]);
    /// ```
    pub fn unique_tags(&self) -> Vec<String> {
        remove_intermediate_prefixes(&self.tags, TAG_SEPARATOR)
    }

    /// Returns true when any of the note's tags contains `needle`.
    pub fn has_tag_containing(&self, needle: &str) -> bool {
        self.tags.iter().any(|tag| tag.contains(needle))
    }

    /// Returns the title in title case.
    pub fn title_case(&self) -> String {
        to_title_case(&self.title)
    }

    /// Returns the short id used for this note's export filename.
    pub fn short_id(&self) -> ShortId {
        ShortId::from_uuid(&self.id)
    }
}

/// A note with its full text, as exported or transcribed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub short_id: ShortId,
    pub title: String,
    pub text: String,
    /// Local modification time formatted as `YYYY-MM-DD HH:MM:SS`, when queried.
    pub modified: Option<String>,
}

impl NoteRecord {
    /// Creates a record for a note identified by its database uuid.
    pub fn new(uuid: &str, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            short_id: ShortId::from_uuid(uuid),
            title: title.into(),
            text: text.into(),
            modified: None,
        }
    }
}

fn split_joined_tags(joined: Option<&str>) -> Vec<String> {
    joined
        .unwrap_or_default()
        .split(',')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
