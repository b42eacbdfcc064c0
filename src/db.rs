mod schema;

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags, Row};
use time::UtcOffset;
use tracing::debug;

use crate::dates;
use crate::models::{Edge, Graph, NoteRecord, NoteSummary, TAG_SEPARATOR};
use crate::tags::remove_intermediate_prefixes;

pub use schema::FIXTURE_SCHEMA;
use schema::{
    READ_ONLY_PRAGMAS, SQL_ALL_TAGS, SQL_ALL_TITLES, SQL_EXPORT, SQL_GRAPH, SQL_NOTES_BY_TAG,
    SQL_TAGS_BY_NOTE, SQL_TEXT, SQL_TITLE,
};

/// Read-only handle on the note application's database.
pub struct Database {
    conn: Connection,
    offset: UtcOffset,
}

impl Database {
    /// Opens an in-memory database carrying the note schema.
    ///
    /// The connection is writable so tests can populate it.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(FIXTURE_SCHEMA)?;
        Ok(Self {
            conn,
            offset: UtcOffset::UTC,
        })
    }

    /// Opens the database file at `path` read-only.
    ///
    /// Modification dates are rendered in the local time zone.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        conn.execute_batch(READ_ONLY_PRAGMAS)
            .context("Failed to configure read-only connection")?;

        debug!(path = %path.display(), "opened note database");

        Ok(Self {
            conn,
            offset: dates::local_offset(),
        })
    }

    /// Overrides the offset modification dates are rendered in.
    pub fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Searches note titles for `term`.
    ///
    /// With `exact` the whole title must match (ignoring case), otherwise
    /// any title containing `term` matches.
    pub fn query_titles(&self, term: &str, exact: bool) -> Result<Vec<NoteSummary>> {
        let pattern = if exact {
            escape_like(term)
        } else {
            substring_pattern(term)
        };

        self.query_summaries(SQL_TITLE, &pattern)
            .context("Failed to search note titles")
    }

    /// Searches note bodies and titles for `term`.
    pub fn query_text(&self, term: &str) -> Result<Vec<NoteSummary>> {
        self.query_summaries(SQL_TEXT, &substring_pattern(term))
            .context("Failed to search note text")
    }

    /// Returns every live note with its tags.
    pub fn query_all_titles(&self) -> Result<Vec<NoteSummary>> {
        let mut stmt = self.conn.prepare(SQL_ALL_TITLES)?;
        let rows = stmt
            .query_map([], summary_from_row)
            .context("Failed to list note titles")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read note title")
    }

    /// Returns the leaf tags of every live note.
    pub fn query_tags(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(SQL_ALL_TAGS)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .context("Failed to list tags")?;

        let tags = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read tag name")?;

        Ok(remove_intermediate_prefixes(&tags, TAG_SEPARATOR))
    }

    /// Returns the notes carrying exactly `tag`, ordered by title descending.
    pub fn query_tag(&self, tag: &str) -> Result<Vec<NoteRecord>> {
        let offset = self.offset;
        let mut stmt = self.conn.prepare(SQL_NOTES_BY_TAG)?;
        let rows = stmt
            .query_map([tag], |row| {
                let uuid: String = row.get(0)?;
                let title: Option<String> = row.get(1)?;
                let modified: Option<f64> = row.get(2)?;
                let text: Option<String> = row.get(3)?;

                let mut record =
                    NoteRecord::new(&uuid, title.unwrap_or_default(), text.unwrap_or_default());
                record.modified = modified.and_then(|m| dates::format_core_data(m, offset));
                Ok(record)
            })
            .with_context(|| format!("Failed to query notes tagged {tag}"))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read tagged note")
    }

    /// Returns every link between two live notes.
    pub fn query_graph(&self) -> Result<Graph> {
        let tags = self.tags_by_note_id()?;

        let mut stmt = self.conn.prepare(SQL_GRAPH)?;
        let rows = stmt
            .query_map([], |row| {
                let source_pk: i64 = row.get(0)?;
                let target_pk: i64 = row.get(3)?;
                let source = NoteSummary::new(
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                )
                .with_joined_tags(tags.get(&source_pk).map(String::as_str));
                let target = NoteSummary::new(
                    row.get::<_, String>(4)?,
                    row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                )
                .with_joined_tags(tags.get(&target_pk).map(String::as_str));

                Ok(Edge::new(source, target))
            })
            .context("Failed to query note links")?;

        let graph = rows
            .collect::<rusqlite::Result<Graph>>()
            .context("Failed to read note link")?;

        debug!(edges = graph.len(), "loaded link graph");
        Ok(graph)
    }

    /// Returns every live note as an exportable record.
    pub fn records(&self) -> Result<Vec<NoteRecord>> {
        let mut stmt = self.conn.prepare(SQL_EXPORT)?;
        let rows = stmt
            .query_map([], |row| {
                let uuid: String = row.get(0)?;
                let title: Option<String> = row.get(1)?;
                let text: Option<String> = row.get(2)?;
                Ok(NoteRecord::new(
                    &uuid,
                    title.unwrap_or_default(),
                    text.unwrap_or_default(),
                ))
            })
            .context("Failed to list notes for export")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read note for export")
    }

    /// Hands every live note to `exporter`, stopping at the first error.
    pub fn export<F>(&self, mut exporter: F) -> Result<()>
    where
        F: FnMut(&NoteRecord) -> Result<()>,
    {
        for record in self.records()? {
            exporter(&record)
                .with_context(|| format!("Failed to export note {}", record.short_id))?;
        }
        Ok(())
    }

    fn query_summaries(&self, sql: &str, pattern: &str) -> Result<Vec<NoteSummary>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([pattern], summary_from_row)?;
        let results = rows.collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(pattern, matches = results.len(), "searched notes");
        Ok(results)
    }

    fn tags_by_note_id(&self) -> Result<HashMap<i64, String>> {
        let mut stmt = self.conn.prepare(SQL_TAGS_BY_NOTE)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?))
            })
            .context("Failed to query tags by note")?;

        let mut tags = HashMap::new();
        for row in rows {
            let (note_pk, joined) = row.context("Failed to read note tags")?;
            if let Some(joined) = joined {
                tags.insert(note_pk, joined);
            }
        }
        Ok(tags)
    }
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<NoteSummary> {
    let id: String = row.get(0)?;
    let title: Option<String> = row.get(1)?;
    let tags: Option<String> = row.get(2)?;

    Ok(NoteSummary::new(id, title.unwrap_or_default()).with_joined_tags(tags.as_deref()))
}

/// Escapes LIKE wildcards so `term` only matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn substring_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

#[cfg(test)]
mod tests;
