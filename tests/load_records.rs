use reading_shelf::{ItemKind, Shelf, Store};
use rusqlite::{params, Connection};

fn insert_raw(
    conn: &Connection,
    id: &str,
    kind: &str,
    pages: Option<i64>,
    illustrator: Option<&str>,
) {
    conn.execute(
        "INSERT INTO items (id, kind, title, author, pages, issue, month, illustrator)
         VALUES (?1, ?2, ?3, ?4, ?5, NULL, NULL, ?6)",
        params![id, kind, format!("title {id}"), "author", pages, illustrator],
    )
    .unwrap();
}

#[test]
fn unreadable_rows_are_skipped_individually() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelf.sqlite");
    let store = Store::open(&path).unwrap();

    let conn = Connection::open(&path).unwrap();
    insert_raw(&conn, "a", "Book", Some(100), None);
    insert_raw(&conn, "b", "Pamphlet", None, None);
    insert_raw(&conn, "c", "Book", None, None);
    insert_raw(&conn, "d", "Comic", None, Some("Dave Gibbons"));
    insert_raw(&conn, "e", "Magazine", None, None);
    drop(conn);

    let (shelf, report) = Shelf::open(store).unwrap();
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped, 3);

    let kinds: Vec<(&str, ItemKind)> = shelf
        .list_all()
        .map(|item| (item.id(), item.kind()))
        .collect();
    assert_eq!(kinds, vec![("a", ItemKind::Book), ("d", ItemKind::Comic)]);
}

#[test]
fn wrongly_typed_column_skips_only_that_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelf.sqlite");
    let store = Store::open(&path).unwrap();

    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO items (id, kind, title, author, pages) VALUES (?1, ?2, ?3, ?4, ?5)",
        params!["good", "Book", "Dune", "FH", 412],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO items (id, kind, title, author, pages) VALUES (?1, ?2, ?3, ?4, ?5)",
        params!["bad", "Book", "X", "Y", "lots"],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO items (id, kind, title, illustrator) VALUES (?1, ?2, ?3, ?4)",
        params!["blob", "Comic", "Watchmen", vec![0u8, 1, 2]],
    )
    .unwrap();
    drop(conn);

    let (shelf, report) = Shelf::open(store).unwrap();
    assert_eq!(report.loaded, 1);
    assert_eq!(report.skipped, 2);
    let ids: Vec<&str> = shelf.list_all().map(|item| item.id()).collect();
    assert_eq!(ids, vec!["good"]);
}

#[test]
fn null_author_loads_as_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelf.sqlite");
    let store = Store::open(&path).unwrap();

    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO items (id, kind, title, author, illustrator)
         VALUES ('x', 'Comic', 'Watchmen', NULL, 'DG')",
        [],
    )
    .unwrap();
    drop(conn);

    let (shelf, _) = Shelf::open(store).unwrap();
    let item = shelf.find("x").unwrap();
    assert_eq!(item.author, "");
}

#[test]
fn opening_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("shelf.sqlite");
    let store = Store::open(&path).unwrap();
    assert!(path.exists());

    let (shelf, report) = Shelf::open(store).unwrap();
    assert!(shelf.is_empty());
    assert_eq!(report.loaded, 0);
}
