use super::*;
use tempfile::tempdir;

fn insert_note(db: &Database, pk: i64, title: &str, text: &str, modified: f64) {
    db.connection()
        .execute(
            "INSERT INTO ZSFNOTE (Z_PK, ZUNIQUEIDENTIFIER, ZTITLE, ZTEXT, ZMODIFICATIONDATE)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![pk, format!("uuid-{pk}"), title, text, modified],
        )
        .unwrap();
}

fn tag_note(db: &Database, note_pk: i64, tag: &str) {
    let conn = db.connection();
    conn.execute(
        "INSERT OR IGNORE INTO ZSFNOTETAG (ZTITLE) SELECT ?1
         WHERE NOT EXISTS (SELECT 1 FROM ZSFNOTETAG WHERE ZTITLE = ?1)",
        [tag],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO Z_5TAGS (Z_5NOTES, Z_13TAGS)
         SELECT ?1, Z_PK FROM ZSFNOTETAG WHERE ZTITLE = ?2",
        rusqlite::params![note_pk, tag],
    )
    .unwrap();
}

fn link(db: &Database, linked_by: i64, linking_to: i64) {
    db.connection()
        .execute(
            "INSERT INTO ZSFNOTEBACKLINK (ZLINKEDBY, ZLINKINGTO) VALUES (?1, ?2)",
            [linked_by, linking_to],
        )
        .unwrap();
}

fn archive(db: &Database, pk: i64) {
    db.connection()
        .execute("UPDATE ZSFNOTE SET ZARCHIVED = 1 WHERE Z_PK = ?1", [pk])
        .unwrap();
}

fn trash(db: &Database, pk: i64) {
    db.connection()
        .execute("UPDATE ZSFNOTE SET ZTRASHED = 1 WHERE Z_PK = ?1", [pk])
        .unwrap();
}

fn sample_db() -> Database {
    let db = Database::in_memory().unwrap();
    insert_note(&db, 1, "Coffee origins", "Notes about #work/coffee beans", 100.0);
    insert_note(&db, 2, "Ethiopian roasts", "Light roast, floral", 300.0);
    insert_note(&db, 3, "Reading list", "Books to read", 200.0);
    tag_note(&db, 1, "work");
    tag_note(&db, 1, "work/coffee");
    tag_note(&db, 2, "work/coffee/africa");
    tag_note(&db, 3, "readings");
    db
}

#[test]
fn in_memory_has_note_schema() {
    let db = Database::in_memory().unwrap();

    let tables: Vec<String> = db
        .connection()
        .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .filter_map(|r| r.ok())
        .collect();

    assert!(tables.contains(&"ZSFNOTE".to_string()));
    assert!(tables.contains(&"ZSFNOTETAG".to_string()));
    assert!(tables.contains(&"Z_5TAGS".to_string()));
    assert!(tables.contains(&"ZSFNOTEBACKLINK".to_string()));
}

#[test]
fn title_search_is_case_insensitive_substring() {
    let db = sample_db();

    let results = db.query_titles("COFFEE", false).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "uuid-1");
    assert_eq!(results[0].title, "Coffee origins");
    assert_eq!(results[0].tags.len(), 2);
}

#[test]
fn exact_title_search_requires_whole_title() {
    let db = sample_db();

    assert!(db.query_titles("coffee", true).unwrap().is_empty());

    let results = db.query_titles("coffee ORIGINS", true).unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn like_wildcards_in_term_match_literally() {
    let db = sample_db();
    insert_note(&db, 4, "100% done", "", 50.0);

    assert!(db.query_titles("_", false).unwrap().is_empty());

    let results = db.query_titles("100%", false).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "100% done");
}

#[test]
fn text_search_matches_body_and_title_newest_first() {
    let db = sample_db();

    let results = db.query_text("roast").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Ethiopian roasts");

    insert_note(&db, 5, "Roasting log", "", 400.0);
    let results = db.query_text("roast").unwrap();
    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Roasting log", "Ethiopian roasts"]);
}

#[test]
fn archived_and_trashed_notes_are_hidden() {
    let db = sample_db();
    archive(&db, 1);
    trash(&db, 2);

    assert!(db.query_titles("coffee", false).unwrap().is_empty());
    assert!(db.query_text("roast").unwrap().is_empty());

    let titles = db.query_all_titles().unwrap();
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].title, "Reading list");

    assert_eq!(db.query_tags().unwrap(), vec!["readings"]);
}

#[test]
fn all_titles_are_newest_first() {
    let db = sample_db();

    let titles: Vec<String> = db
        .query_all_titles()
        .unwrap()
        .into_iter()
        .map(|n| n.title)
        .collect();

    assert_eq!(
        titles,
        vec!["Ethiopian roasts", "Reading list", "Coffee origins"]
    );
}

#[test]
fn tags_are_collapsed_to_leaves() {
    let db = sample_db();

    let tags = db.query_tags().unwrap();

    assert_eq!(tags.len(), 2, "{tags:?}");
    assert!(tags.contains(&"work/coffee/africa".to_string()));
    assert!(tags.contains(&"readings".to_string()));
}

#[test]
fn untagged_notes_do_not_produce_empty_tags() {
    let db = Database::in_memory().unwrap();
    insert_note(&db, 1, "Loose", "", 1.0);

    assert!(db.query_tags().unwrap().is_empty());
    assert!(db.query_all_titles().unwrap()[0].tags.is_empty());
}

#[test]
fn query_tag_returns_records_by_title_descending() {
    let db = sample_db();
    tag_note(&db, 3, "work/coffee");

    let records = db.query_tag("work/coffee").unwrap();

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Reading list", "Coffee origins"]);
    assert_eq!(records[1].text, "Notes about #work/coffee beans");
    assert_eq!(records[1].modified.as_deref(), Some("2001-01-01 00:01:40"));
}

#[test]
fn query_tag_requires_exact_tag() {
    let db = sample_db();
    assert!(db.query_tag("work/cof").unwrap().is_empty());
}

#[test]
fn graph_joins_tags_onto_both_ends() {
    let db = sample_db();
    link(&db, 2, 1);
    link(&db, 3, 1);

    let graph = db.query_graph().unwrap();

    assert_eq!(graph.len(), 2);
    let edge = &graph[0];
    assert_eq!(edge.source.title, "Coffee origins");
    assert_eq!(edge.target.title, "Ethiopian roasts");
    assert_eq!(edge.source.unique_tags(), vec!["work/coffee"]);
    assert_eq!(edge.target.unique_tags(), vec!["work/coffee/africa"]);
}

#[test]
fn graph_skips_links_to_hidden_notes() {
    let db = sample_db();
    link(&db, 2, 1);
    link(&db, 3, 1);
    trash(&db, 3);

    let graph = db.query_graph().unwrap();
    assert_eq!(graph.len(), 1);
    assert_eq!(graph[0].target.title, "Ethiopian roasts");
}

#[test]
fn export_visits_every_live_note() {
    let db = sample_db();
    archive(&db, 3);

    let mut seen = Vec::new();
    db.export(|record| {
        seen.push(record.title.clone());
        Ok(())
    })
    .unwrap();

    assert_eq!(seen, vec!["Coffee origins", "Ethiopian roasts"]);
}

#[test]
fn export_stops_at_first_error() {
    let db = sample_db();

    let mut calls = 0;
    let result = db.export(|_| {
        calls += 1;
        anyhow::bail!("disk full")
    });

    assert!(result.is_err());
    assert_eq!(calls, 1);
    assert!(format!("{:#}", result.unwrap_err()).contains("disk full"));
}

#[test]
fn open_is_read_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.sqlite");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(FIXTURE_SCHEMA).unwrap();
        conn.execute(
            "INSERT INTO ZSFNOTE (ZUNIQUEIDENTIFIER, ZTITLE, ZTEXT) VALUES ('u', 'On disk', '')",
            [],
        )
        .unwrap();
    }

    let db = Database::open(&path).unwrap();
    assert_eq!(db.query_titles("disk", false).unwrap().len(), 1);

    let write = db.connection().execute("DELETE FROM ZSFNOTE", []);
    assert!(write.is_err());
}

#[test]
fn open_missing_file_fails() {
    let dir = tempdir().unwrap();
    assert!(Database::open(dir.path().join("absent.sqlite")).is_err());
}

#[test]
fn escape_like_escapes_wildcards() {
    assert_eq!(escape_like(r"a%b_c\d"), r"a\%b\_c\\d");
    assert_eq!(substring_pattern("x"), "%x%");
}
