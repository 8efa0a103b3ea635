use photoreport::core::actions::edit_caption;
use photoreport::models::{Document, project};
use photoreport::store::{
    DOCUMENT_PATH, DocumentStore, FileIdentity, IdentityProvider, Snapshot, SqliteStore,
};
use std::fs;

mod common;
use common::{setup_home, setup_test_db};

#[test]
fn sqlite_subscription_starts_with_missing() {
    let db = setup_test_db("store_missing");
    let mut store = SqliteStore::open(&db).expect("open");

    let sub = store.subscribe(DOCUMENT_PATH).expect("subscribe");
    assert_eq!(store.poll(sub).expect("poll"), vec![Snapshot::Missing]);
    // reported once
    assert!(store.poll(sub).expect("poll").is_empty());
}

#[test]
fn sqlite_write_is_seen_by_every_handle() {
    let db = setup_test_db("store_shared");
    let mut writer = SqliteStore::open(&db).expect("open writer");
    let mut reader = SqliteStore::open(&db).expect("open reader");

    let sub = reader.subscribe(DOCUMENT_PATH).expect("subscribe");
    assert_eq!(reader.poll(sub).expect("poll"), vec![Snapshot::Missing]);

    let doc = project(&edit_caption(&Document::default(), 0, 0, "Gate"));
    writer.write(DOCUMENT_PATH, &doc, "anon-w").expect("write");

    assert_eq!(
        reader.poll(sub).expect("poll"),
        vec![Snapshot::Present(doc.clone())]
    );
    assert!(reader.poll(sub).expect("poll").is_empty());

    let (stored, meta) = reader.read(DOCUMENT_PATH).expect("read").expect("row");
    assert_eq!(stored, doc);
    assert_eq!(meta.revision, 1);
    assert_eq!(meta.updated_by, "anon-w");
}

#[test]
fn sqlite_revision_grows_with_every_write() {
    let db = setup_test_db("store_revision");
    let mut store = SqliteStore::open(&db).expect("open");
    let doc = project(&Document::default());

    store.write(DOCUMENT_PATH, &doc, "anon-a").expect("first");
    store.write(DOCUMENT_PATH, &doc, "anon-b").expect("second");

    let (_, meta) = store.read(DOCUMENT_PATH).expect("read").expect("row");
    assert_eq!(meta.revision, 2);
    assert_eq!(meta.updated_by, "anon-b");

    // create + save are logged
    let conn = rusqlite::Connection::open(&db).expect("open conn");
    let ops: Vec<String> = conn
        .prepare("SELECT operation FROM log WHERE target = ?1 ORDER BY id")
        .expect("prepare")
        .query_map([DOCUMENT_PATH], |r| r.get(0))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("rows");
    assert_eq!(ops, ["create", "save"]);
}

#[test]
fn sqlite_unknown_subscription_fails() {
    let db = setup_test_db("store_unknown_sub");
    let mut store = SqliteStore::open(&db).expect("open");
    let sub = store.subscribe(DOCUMENT_PATH).expect("subscribe");
    store.unsubscribe(sub);
    assert!(store.poll(sub).is_err());
}

#[test]
fn migrations_run_once() {
    let db = setup_test_db("store_migrations");
    drop(SqliteStore::open(&db).expect("first open"));
    drop(SqliteStore::open(&db).expect("second open"));

    let conn = rusqlite::Connection::open(&db).expect("open conn");
    let applied: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .expect("count");
    let again: i64 = conn
        .query_row(
            "SELECT COUNT(DISTINCT target) FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .expect("count distinct");
    assert_eq!(applied, again);
}

#[test]
fn file_identity_is_stable() {
    let home = setup_home("identity_stable");
    let path = format!("{home}/nested/identity");

    let first = FileIdentity::new(&path)
        .sign_in_anonymously()
        .expect("sign in");
    assert!(first.starts_with("anon-"));
    assert_eq!(first.len(), "anon-".len() + 16);

    let second = FileIdentity::new(&path)
        .sign_in_anonymously()
        .expect("sign in again");
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&path).expect("read").trim(), first);
}

#[test]
fn file_identity_fails_when_it_cannot_persist() {
    let home = setup_home("identity_blocked");
    // a regular file where the parent directory should be
    let blocker = format!("{home}/blocker");
    fs::write(&blocker, "x").expect("write blocker");

    let err = FileIdentity::new(format!("{blocker}/identity"))
        .sign_in_anonymously()
        .unwrap_err();
    assert!(matches!(err, photoreport::errors::AppError::AuthFailure(_)));
}
