use super::*;
use sw_db::SqliteBackend;

fn db() -> SqliteBackend {
    SqliteBackend::in_memory().unwrap()
}

#[test]
fn test_default_table_name() {
    assert_eq!(VersionStore::default().table(), "schema_migrations");
}

#[test]
fn test_rejects_unsafe_table_name() {
    assert!(VersionStore::new("versions; DROP TABLE users").is_err());
    assert!(VersionStore::new("").is_err());
    assert!(VersionStore::new("app.schema_versions").is_ok());
}

#[test]
fn test_missing_table_is_created_at_version_zero() {
    let db = db();
    let store = VersionStore::default();
    assert!(!db.relation_exists("schema_migrations").unwrap());

    assert_eq!(store.current_version(&db).unwrap(), 0);
    assert!(db.relation_exists("schema_migrations").unwrap());
    assert_eq!(db.query_count("SELECT * FROM schema_migrations").unwrap(), 0);
}

#[test]
fn test_ensure_table_is_idempotent() {
    let db = db();
    let store = VersionStore::default();
    store.ensure_table(&db).unwrap();
    store.record_applied(&db, 1).unwrap();
    store.ensure_table(&db).unwrap();
    assert_eq!(store.current_version(&db).unwrap(), 1);
}

#[test]
fn test_current_version_is_max() {
    let db = db();
    let store = VersionStore::new("versions").unwrap();
    store.ensure_table(&db).unwrap();
    for version in [1, 3, 2] {
        store.record_applied(&db, version).unwrap();
    }
    assert_eq!(store.current_version(&db).unwrap(), 3);
}

#[test]
fn test_applied_at_defaults_to_now() {
    let db = db();
    let store = VersionStore::default();
    store.ensure_table(&db).unwrap();
    store.record_applied(&db, 1).unwrap();
    assert_eq!(
        db.query_count("SELECT * FROM schema_migrations WHERE applied_at IS NOT NULL")
            .unwrap(),
        1
    );
}

#[test]
fn test_recording_same_version_twice_fails() {
    let db = db();
    let store = VersionStore::default();
    store.ensure_table(&db).unwrap();
    store.record_applied(&db, 1).unwrap();
    assert!(store.record_applied(&db, 1).is_err());
}

#[test]
fn test_negative_version_is_internal_error() {
    let db = db();
    let store = VersionStore::default();
    store.ensure_table(&db).unwrap();
    db.execute_batch("INSERT INTO schema_migrations (version) VALUES (-4)")
        .unwrap();
    assert!(matches!(
        store.current_version(&db),
        Err(DbError::Internal(_))
    ));
}

#[test]
fn test_other_failures_are_propagated() {
    let db = db();
    db.execute_batch("CREATE TABLE schema_migrations (id INTEGER)")
        .unwrap();
    match VersionStore::default().current_version(&db) {
        Err(DbError::ExecutionError(msg)) => assert!(msg.contains("version")),
        other => panic!("expected ExecutionError, got {other:?}"),
    }
}
