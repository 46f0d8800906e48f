use super::*;
use tempfile::tempdir;

#[test]
fn test_read_list_skips_blank_lines() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("new.list"), "a\n\n  b  \r\n\nc").unwrap();

    let list = FileStore.read_list(dir.path(), "new.list").unwrap();
    assert_eq!(list, vec!["a", "b", "c"]);
}

#[test]
fn test_read_missing_reports_path() {
    let dir = tempdir().unwrap();
    let err = FileStore.read(dir.path(), "absent.sql").unwrap_err();
    assert!(err.to_string().contains("absent.sql"));
}

#[test]
fn test_write_creates_folder_and_overwrites() {
    let dir = tempdir().unwrap();
    let folder = dir.path().join("x/y");

    FileStore.write(&folder, "f.list", "first").unwrap();
    FileStore.write(&folder, "f.list", "").unwrap();

    assert_eq!(fs::read_to_string(folder.join("f.list")).unwrap(), "");
}

#[test]
fn test_copy_is_byte_identical() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src.sql");
    let bytes = b"CREATE FUNCTION f() RETURNS INT RETURN 1;\r\n\xe2\x9c\x93";
    fs::write(&src, bytes).unwrap();

    let dst = dir.path().join("deep/nested/dst.sql");
    FileStore.copy(&src, &dst).unwrap();

    assert_eq!(fs::read(&dst).unwrap(), bytes);
}

#[test]
fn test_ensure_folder_idempotent() {
    let dir = tempdir().unwrap();
    let folder = dir.path().join("a/b/c");
    FileStore.ensure_folder(&folder).unwrap();
    FileStore.ensure_folder(&folder).unwrap();
    assert!(folder.is_dir());
}

#[test]
fn test_copy_new_never_replaces() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src.sql");
    let dst = dir.path().join("backup/dst.sql");
    fs::write(&src, "first").unwrap();

    assert!(FileStore.copy_new(&src, &dst).unwrap());
    fs::write(&src, "second").unwrap();
    assert!(!FileStore.copy_new(&src, &dst).unwrap());

    assert_eq!(fs::read_to_string(&dst).unwrap(), "first");
}
