//! Shared fixtures: a file-based note database built from the fixture schema.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use anyhow::Result;
use freddiebear::db::FIXTURE_SCHEMA;
use rusqlite::{Connection, params};
use tempfile::TempDir;

/// A writable fixture database on disk; the crate itself only opens it read-only.
pub struct Fixture {
    pub dir: TempDir,
    pub path: PathBuf,
    conn: Connection,
}

impl Fixture {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("database.sqlite");
        let conn = Connection::open(&path)?;
        conn.execute_batch(FIXTURE_SCHEMA)?;
        Ok(Self { dir, path, conn })
    }

    pub fn note(&self, pk: i64, title: &str, text: &str, modified: f64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO ZSFNOTE (Z_PK, ZUNIQUEIDENTIFIER, ZTITLE, ZTEXT, ZMODIFICATIONDATE)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![pk, format!("NOTE-{pk}"), title, text, modified],
        )?;
        Ok(())
    }

    pub fn tag(&self, note_pk: i64, tag: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO ZSFNOTETAG (ZTITLE) SELECT ?1
             WHERE NOT EXISTS (SELECT 1 FROM ZSFNOTETAG WHERE ZTITLE = ?1)",
            [tag],
        )?;
        self.conn.execute(
            "INSERT INTO Z_5TAGS (Z_5NOTES, Z_13TAGS)
             SELECT ?1, Z_PK FROM ZSFNOTETAG WHERE ZTITLE = ?2",
            params![note_pk, tag],
        )?;
        Ok(())
    }

    pub fn link(&self, linked_by: i64, linking_to: i64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO ZSFNOTEBACKLINK (ZLINKEDBY, ZLINKINGTO) VALUES (?1, ?2)",
            [linked_by, linking_to],
        )?;
        Ok(())
    }

    pub fn retitle(&self, pk: i64, title: &str) -> Result<()> {
        self.conn
            .execute("UPDATE ZSFNOTE SET ZTITLE = ?1 WHERE Z_PK = ?2", params![title, pk])?;
        Ok(())
    }

    pub fn trash(&self, pk: i64) -> Result<()> {
        self.conn
            .execute("UPDATE ZSFNOTE SET ZTRASHED = 1 WHERE Z_PK = ?1", [pk])?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
