use item_core::db::migrations::latest_version;
use item_core::db::{open_db_in_memory, DbError};
use item_core::{Item, ItemRepository, ItemUpdateDto, RepoError, SqliteItemRepository};
use rusqlite::Connection;

#[test]
fn save_and_find_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let saved = repo.save(&Item::new("apple", 1000, 10)).unwrap();
    let id = saved.id.expect("saved item should carry an id");

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.item_name, "apple");
    assert_eq!(loaded.price, 1000);
    assert_eq!(loaded.quantity, 10);
}

#[test]
fn save_ignores_caller_supplied_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let mut item = Item::new("banana", 2000, 5);
    item.id = Some(777);
    let saved = repo.save(&item).unwrap();

    assert_ne!(saved.id, Some(777));
    assert!(repo.find_by_id(777).unwrap().is_none());
}

#[test]
fn save_assigns_increasing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let first = repo.save(&Item::new("a", 1, 1)).unwrap().id.unwrap();
    let second = repo.save(&Item::new("b", 2, 2)).unwrap().id.unwrap();
    assert!(second > first);
}

#[test]
fn find_by_unknown_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_id(42).unwrap().is_none());
}

#[test]
fn update_existing_item_overwrites_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let id = repo.save(&Item::new("draft", 10, 1)).unwrap().id.unwrap();
    let affected = repo
        .update(id, &ItemUpdateDto::new("final", 20, 2))
        .unwrap();
    assert_eq!(affected, 1);

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, Some(id));
    assert_eq!(loaded.item_name, "final");
    assert_eq!(loaded.price, 20);
    assert_eq!(loaded.quantity, 2);
}

#[test]
fn update_unknown_id_reports_zero_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let kept = repo.save(&Item::new("kept", 100, 1)).unwrap();
    let affected = repo
        .update(kept.id.unwrap() + 100, &ItemUpdateDto::new("ghost", 0, 0))
        .unwrap();
    assert_eq!(affected, 0);

    let loaded = repo.find_by_id(kept.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded, kept);
}

#[test]
fn duplicate_rows_for_one_id_are_an_integrity_error() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE item (
            id INTEGER NOT NULL,
            item_name TEXT NOT NULL,
            price INTEGER NOT NULL,
            quantity INTEGER NOT NULL
        );
        INSERT INTO item VALUES (1, 'twin', 10, 1), (1, 'twin', 10, 1);",
    )
    .unwrap();
    conn.pragma_update(None, "user_version", latest_version())
        .unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let err = repo.find_by_id(1).unwrap_err();
    assert!(matches!(err, RepoError::Integrity { id: 1, rows: 2 }));
}

#[test]
fn null_column_is_a_persistence_error() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE item (
            id INTEGER PRIMARY KEY,
            item_name TEXT,
            price INTEGER,
            quantity INTEGER
        );
        INSERT INTO item VALUES (1, 'no price', NULL, 1);",
    )
    .unwrap();
    conn.pragma_update(None, "user_version", latest_version())
        .unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let err = repo.find_by_id(1).unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Sqlite(_))));
}

#[test]
fn rejected_insert_surfaces_as_persistence_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER item_reject BEFORE INSERT ON item
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();

    let err = repo.save(&Item::new("apple", 1000, 10)).unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Sqlite(_))));
    assert!(err.to_string().contains("rejected"));
}

#[test]
fn repository_runs_inside_caller_transaction() {
    let mut conn = open_db_in_memory().unwrap();

    let tx = conn.transaction().unwrap();
    {
        let repo = SqliteItemRepository::try_new(&tx).unwrap();
        let id = repo.save(&Item::new("temp", 1, 1)).unwrap().id.unwrap();
        assert!(repo.find_by_id(id).unwrap().is_some());
    }
    tx.rollback().unwrap();

    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    assert!(repo.find_all(&Default::default()).unwrap().is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteItemRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_item_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "user_version", latest_version())
        .unwrap();

    let result = SqliteItemRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("item"))));
}

#[test]
fn repository_rejects_item_table_missing_mapped_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE item (
            id INTEGER PRIMARY KEY,
            item_name TEXT NOT NULL,
            price INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.pragma_update(None, "user_version", latest_version())
        .unwrap();

    let result = SqliteItemRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "item",
            column: "quantity"
        })
    ));
}
