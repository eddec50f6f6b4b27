use super::*;

#[test]
fn test_memory_source_lists_files_and_directories() {
    let source = MemorySource::new()
        .with_file("1_init.sql", "SELECT 1;")
        .with_file("nested/2_more.sql", "SELECT 2;")
        .with_dir("empty");

    let entries = source.entries().unwrap();
    assert_eq!(
        entries,
        vec![
            SourceEntry::file("1_init.sql"),
            SourceEntry::directory("empty"),
            SourceEntry::directory("nested"),
        ]
    );
}

#[test]
fn test_memory_source_read() {
    let source = MemorySource::new().with_file("1_init.sql", "SELECT 1;");
    assert_eq!(source.read("1_init.sql").unwrap(), b"SELECT 1;".to_vec());

    let err = source.read("missing.sql").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn test_memory_source_sub() {
    let source = MemorySource::from_static(&[
        ("migrations/1_init.sql", "SELECT 1;"),
        ("migrations/2_next.sql", "SELECT 2;"),
        ("other/readme.txt", "hello"),
    ]);

    let sub = source.sub("migrations/");
    let names: Vec<String> = sub.entries().unwrap().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["1_init.sql", "2_next.sql"]);
    assert_eq!(sub.read("2_next.sql").unwrap(), b"SELECT 2;".to_vec());
}

#[test]
fn test_dir_source_entries() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("1_init.sql"), "SELECT 1;").unwrap();
    std::fs::create_dir(dir.path().join("archive")).unwrap();

    let source = DirSource::new(dir.path());
    let mut entries = source.entries().unwrap();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(
        entries,
        vec![
            SourceEntry::file("1_init.sql"),
            SourceEntry::directory("archive"),
        ]
    );
    assert_eq!(source.read("1_init.sql").unwrap(), b"SELECT 1;".to_vec());
}

#[test]
fn test_dir_source_sub() {
    let dir = tempfile::tempdir().unwrap();
    let migrations = dir.path().join("migrations");
    std::fs::create_dir(&migrations).unwrap();
    std::fs::write(migrations.join("1_init.sql"), "SELECT 1;").unwrap();

    let source = DirSource::new(dir.path()).sub("migrations");
    assert_eq!(source.root(), migrations.as_path());
    assert_eq!(source.entries().unwrap(), vec![SourceEntry::file("1_init.sql")]);
}

#[test]
fn test_dir_source_missing_root_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirSource::new(dir.path().join("does_not_exist"));
    assert!(source.entries().is_err());
}
