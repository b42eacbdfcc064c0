//! SQL for the note application's Core Data store.
//!
//! Table and column names are fixed by the application. Every query only
//! returns notes that are neither archived nor trashed.

/// Pragmas applied to every file-backed connection.
pub const READ_ONLY_PRAGMAS: &str = "
PRAGMA query_only = ON;
PRAGMA temp_store = MEMORY;
PRAGMA cache_size = -25000;
";

/// Notes whose title matches `?1` (a LIKE pattern), newest first, with tags.
pub const SQL_TITLE: &str = r"
SELECT
    note.ZUNIQUEIDENTIFIER,
    note.ZTITLE,
    GROUP_CONCAT(COALESCE(tag.ZTITLE, ''))
FROM
    ZSFNOTE note
    LEFT OUTER JOIN Z_5TAGS tags ON note.Z_PK = tags.Z_5NOTES
    LEFT OUTER JOIN ZSFNOTETAG tag ON tags.Z_13TAGS = tag.Z_PK
WHERE
    note.ZARCHIVED = 0
    AND note.ZTRASHED = 0
    AND LOWER(note.ZTITLE) LIKE LOWER(?1) ESCAPE '\'
GROUP BY
    note.ZUNIQUEIDENTIFIER
ORDER BY
    MAX(note.ZMODIFICATIONDATE) DESC
";

/// Notes whose body or title matches `?1` (a LIKE pattern), newest first, with tags.
pub const SQL_TEXT: &str = r"
SELECT
    note.ZUNIQUEIDENTIFIER,
    note.ZTITLE,
    GROUP_CONCAT(COALESCE(tag.ZTITLE, ''))
FROM
    ZSFNOTE note
    LEFT OUTER JOIN Z_5TAGS tags ON note.Z_PK = tags.Z_5NOTES
    LEFT OUTER JOIN ZSFNOTETAG tag ON tags.Z_13TAGS = tag.Z_PK
WHERE
    note.ZARCHIVED = 0
    AND note.ZTRASHED = 0
    AND (
        LOWER(note.ZTEXT) LIKE LOWER(?1) ESCAPE '\'
        OR LOWER(note.ZTITLE) LIKE LOWER(?1) ESCAPE '\'
    )
GROUP BY
    note.ZUNIQUEIDENTIFIER
ORDER BY
    MAX(note.ZMODIFICATIONDATE) DESC
";

/// Every live note with its tags, newest first.
pub const SQL_ALL_TITLES: &str = "
SELECT
    note.ZUNIQUEIDENTIFIER,
    note.ZTITLE,
    GROUP_CONCAT(COALESCE(tag.ZTITLE, ''))
FROM
    ZSFNOTE note
    LEFT OUTER JOIN Z_5TAGS tags ON note.Z_PK = tags.Z_5NOTES
    LEFT OUTER JOIN ZSFNOTETAG tag ON tags.Z_13TAGS = tag.Z_PK
WHERE
    note.ZARCHIVED = 0
    AND note.ZTRASHED = 0
GROUP BY
    note.ZUNIQUEIDENTIFIER
ORDER BY
    MAX(note.ZMODIFICATIONDATE) DESC
";

/// Distinct names of tags attached to at least one live note.
pub const SQL_ALL_TAGS: &str = "
SELECT DISTINCT
    tag.ZTITLE
FROM
    ZSFNOTE note
    JOIN Z_5TAGS tags ON note.Z_PK = tags.Z_5NOTES
    JOIN ZSFNOTETAG tag ON tags.Z_13TAGS = tag.Z_PK
WHERE
    note.ZARCHIVED = 0
    AND note.ZTRASHED = 0
    AND tag.ZTITLE IS NOT NULL
ORDER BY
    tag.ZTITLE
";

/// Live notes carrying exactly the tag `?1`.
pub const SQL_NOTES_BY_TAG: &str = "
SELECT
    note.ZUNIQUEIDENTIFIER,
    note.ZTITLE,
    note.ZMODIFICATIONDATE,
    note.ZTEXT
FROM
    ZSFNOTE note
    JOIN Z_5TAGS tags ON note.Z_PK = tags.Z_5NOTES
    JOIN ZSFNOTETAG tag ON tags.Z_13TAGS = tag.Z_PK
WHERE
    note.ZARCHIVED = 0
    AND note.ZTRASHED = 0
    AND tag.ZTITLE = ?1
ORDER BY
    note.ZTITLE DESC
";

/// Comma-joined tag names keyed by note primary key.
pub const SQL_TAGS_BY_NOTE: &str = "
SELECT
    note.Z_PK,
    GROUP_CONCAT(COALESCE(tag.ZTITLE, ''))
FROM
    ZSFNOTE note
    LEFT OUTER JOIN Z_5TAGS tags ON note.Z_PK = tags.Z_5NOTES
    LEFT OUTER JOIN ZSFNOTETAG tag ON tags.Z_13TAGS = tag.Z_PK
WHERE
    note.ZARCHIVED = 0
    AND note.ZTRASHED = 0
GROUP BY
    note.Z_PK
";

/// Backlink edges between live notes.
pub const SQL_GRAPH: &str = "
SELECT DISTINCT
    src.Z_PK,
    src.ZUNIQUEIDENTIFIER,
    src.ZTITLE,
    target.Z_PK,
    target.ZUNIQUEIDENTIFIER,
    target.ZTITLE
FROM
    ZSFNOTEBACKLINK b
    JOIN ZSFNOTE src ON src.Z_PK = b.ZLINKINGTO
    JOIN ZSFNOTE target ON target.Z_PK = b.ZLINKEDBY
WHERE
    src.ZARCHIVED = 0
    AND src.ZTRASHED = 0
    AND target.ZARCHIVED = 0
    AND target.ZTRASHED = 0
ORDER BY
    src.Z_PK, target.Z_PK
";

/// Every live note's identity and text.
pub const SQL_EXPORT: &str = "
SELECT
    ZUNIQUEIDENTIFIER,
    ZTITLE,
    ZTEXT
FROM
    ZSFNOTE
WHERE
    ZARCHIVED = 0
    AND ZTRASHED = 0
ORDER BY
    Z_PK
";

/// The subset of the application's schema this tool reads.
///
/// Used to build empty databases for tests and demos.
pub const FIXTURE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS ZSFNOTE (
    Z_PK INTEGER PRIMARY KEY,
    ZUNIQUEIDENTIFIER VARCHAR,
    ZTITLE VARCHAR,
    ZTEXT VARCHAR,
    ZARCHIVED INTEGER DEFAULT 0,
    ZTRASHED INTEGER DEFAULT 0,
    ZCREATIONDATE TIMESTAMP,
    ZMODIFICATIONDATE TIMESTAMP
);

CREATE TABLE IF NOT EXISTS ZSFNOTETAG (
    Z_PK INTEGER PRIMARY KEY,
    ZTITLE VARCHAR
);

CREATE TABLE IF NOT EXISTS Z_5TAGS (
    Z_5NOTES INTEGER,
    Z_13TAGS INTEGER,
    PRIMARY KEY (Z_5NOTES, Z_13TAGS)
);

CREATE TABLE IF NOT EXISTS ZSFNOTEBACKLINK (
    Z_PK INTEGER PRIMARY KEY,
    ZLINKEDBY INTEGER,
    ZLINKINGTO INTEGER
);
";
