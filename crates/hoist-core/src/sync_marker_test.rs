use super::*;
use tempfile::tempdir;

fn op(name: &str) -> FileSync {
    FileSync {
        name: name.to_string(),
        source: PathBuf::from(format!("db/UAT/flo_uat/functions/{name}.sql")),
        destination: PathBuf::from(format!("db/STAGE/flo_stage/functions/{name}.sql")),
        backup: None,
    }
}

fn marker() -> SyncMarker {
    SyncMarker::new(
        Environment::Stage,
        ObjectKind::Functions,
        ListStatus::New,
        vec![op("a"), op("b")],
    )
}

#[test]
fn test_new_marker() {
    let m = marker();
    assert_eq!(m.run_id.len(), 8);
    assert_eq!(m.pending.len(), 2);
    assert!(m.applied.is_empty());
    assert!(!m.is_complete());
}

#[test]
fn test_mark_applied() {
    let mut m = marker();
    m.mark_applied("a");
    assert_eq!(m.pending, vec![op("b")]);
    assert_eq!(m.applied, vec![op("a")]);

    m.mark_applied("missing");
    assert_eq!(m.pending.len(), 1);

    m.mark_applied("b");
    assert!(m.is_complete());
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/new.sync.json");

    let m = marker();
    m.save(&path).unwrap();
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = SyncMarker::load(&path).unwrap().unwrap();
    assert_eq!(loaded.run_id, m.run_id);
    assert_eq!(loaded.destination, Environment::Stage);
    assert_eq!(loaded.pending, m.pending);
}

#[test]
fn test_load_missing() {
    let dir = tempdir().unwrap();
    assert!(SyncMarker::load(&dir.path().join("none.json"))
        .unwrap()
        .is_none());
}

#[test]
fn test_remove_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("m.sync.json");
    marker().save(&path).unwrap();

    SyncMarker::remove(&path).unwrap();
    assert!(!path.exists());
    SyncMarker::remove(&path).unwrap();
}
