use super::*;

#[test]
fn test_in_memory() {
    let db = SqliteBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "sqlite");
}

#[test]
fn test_new_memory_special_case() {
    let db = SqliteBackend::new(":memory:").unwrap();
    db.execute_batch("CREATE TABLE t (id INT)").unwrap();
    assert!(db.relation_exists("t").unwrap());
}

#[test]
fn test_from_path_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");

    {
        let db = SqliteBackend::from_path(&path).unwrap();
        db.execute_batch("CREATE TABLE kept (id INT); INSERT INTO kept VALUES (1);")
            .unwrap();
    }

    let db = SqliteBackend::new(path.to_str().unwrap()).unwrap();
    assert_eq!(db.query_count("SELECT * FROM kept").unwrap(), 1);
}

#[test]
fn test_from_path_bad_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("app.db");
    match SqliteBackend::from_path(&path) {
        Err(DbError::ConnectionError(_)) => {}
        other => panic!("expected ConnectionError, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_execute_returns_affected_rows() {
    let db = SqliteBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE t (id INT); INSERT INTO t VALUES (1), (2), (3);")
        .unwrap();
    assert_eq!(db.execute("UPDATE t SET id = id + 10").unwrap(), 3);
}

#[test]
fn test_execute_batch() {
    let db = SqliteBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE t1 (id INT); CREATE TABLE t2 (id INT); INSERT INTO t1 VALUES (1);")
        .unwrap();

    assert!(db.relation_exists("t1").unwrap());
    assert!(db.relation_exists("t2").unwrap());
}

#[test]
fn test_query_count() {
    let db = SqliteBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE nums (n INT); INSERT INTO nums VALUES (1), (2), (3), (4);")
        .unwrap();
    assert_eq!(db.query_count("SELECT * FROM nums WHERE n > 1").unwrap(), 3);
}

#[test]
fn test_query_i64() {
    let db = SqliteBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE v (version INTEGER)").unwrap();

    assert_eq!(db.query_i64("SELECT MAX(version) FROM v").unwrap(), None);
    assert_eq!(db.query_i64("SELECT version FROM v").unwrap(), None);

    db.execute_batch("INSERT INTO v VALUES (3), (7)").unwrap();
    assert_eq!(db.query_i64("SELECT MAX(version) FROM v").unwrap(), Some(7));
}

#[test]
fn test_missing_table_is_table_not_found() {
    let db = SqliteBackend::in_memory().unwrap();
    match db.query_i64("SELECT MAX(version) FROM schema_migrations") {
        Err(DbError::TableNotFound(msg)) => assert!(msg.contains("schema_migrations")),
        other => panic!("expected TableNotFound, got {other:?}"),
    }
}

#[test]
fn test_syntax_error_is_execution_error() {
    let db = SqliteBackend::in_memory().unwrap();
    assert!(matches!(
        db.execute_batch("CREATE TABLEE oops (id INT)"),
        Err(DbError::ExecutionError(_))
    ));
}

#[test]
fn test_relation_exists() {
    let db = SqliteBackend::in_memory().unwrap();
    assert!(!db.relation_exists("nonexistent").unwrap());

    db.execute_batch("CREATE TABLE t (id INT); CREATE VIEW v AS SELECT id FROM t;")
        .unwrap();
    assert!(db.relation_exists("t").unwrap());
    assert!(db.relation_exists("v").unwrap());
    assert!(db.relation_exists("main.t").unwrap());
    assert!(!db.relation_exists("main.nonexistent").unwrap());
}

#[test]
fn test_begin_rollback() {
    let db = SqliteBackend::in_memory().unwrap();
    db.begin().unwrap();
    db.execute_batch("CREATE TABLE t (id INT)").unwrap();
    db.rollback().unwrap();
    assert!(!db.relation_exists("t").unwrap());
}

#[test]
fn test_begin_commit() {
    let db = SqliteBackend::in_memory().unwrap();
    db.begin().unwrap();
    db.execute_batch("CREATE TABLE t (id INT)").unwrap();
    db.commit().unwrap();
    assert!(db.relation_exists("t").unwrap());
}

#[test]
fn test_commit_without_transaction() {
    let db = SqliteBackend::in_memory().unwrap();
    assert!(matches!(db.commit(), Err(DbError::TransactionError(_))));
}

#[test]
fn test_with_conn_and_into_inner() {
    let db = SqliteBackend::in_memory().unwrap();
    db.with_conn(|conn| Ok(conn.execute_batch("CREATE TABLE t (id INT)")?))
        .unwrap();

    let conn = db.into_inner().unwrap();
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 't'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}
