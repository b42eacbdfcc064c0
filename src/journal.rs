//! Daily journal helper.
//!
//! The workflow either opens today's journal note or, when there is none
//! yet, creates one from the `title,tag` pair printed here.

use anyhow::Result;
use thiserror::Error;
use time::OffsetDateTime;

use crate::Database;
use crate::dates::journal_date;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("found too many matches for journal note {0}")]
    TooManyMatches(String),
}

/// How to tag a newly created journal note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalTag {
    pub name: Option<String>,
    /// Append `/YYYY/MM` to the tag.
    pub append_date: bool,
}

impl JournalTag {
    /// The tag for a note created at `now`; empty when no tag was asked for.
    pub fn render(&self, now: OffsetDateTime) -> String {
        let name = self.name.as_deref().unwrap_or_default();
        if self.append_date {
            format!("{}/{}/{:02}", name, now.year(), u8::from(now.month()))
        } else {
            name.to_string()
        }
    }
}

/// Returns today's journal note id, or `YYYY-MM-DD,<tag>` for a new one.
pub fn journal_entry(db: &Database, tag: &JournalTag, now: OffsetDateTime) -> Result<String> {
    let title = journal_date(now);
    let matches = db.query_titles(&title, true)?;

    match matches.as_slice() {
        [] => Ok(format!("{},{}", title, tag.render(now))),
        [note] => Ok(note.id.clone()),
        _ => Err(JournalError::TooManyMatches(title).into()),
    }
}
