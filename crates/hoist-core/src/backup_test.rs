use super::*;
use std::fs;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_folder_name_has_no_padding() {
    assert_eq!(RunDate::new(date(2026, 1, 5)).folder_name(), "1_5_2026");
    assert_eq!(RunDate::new(date(2026, 12, 31)).folder_name(), "12_31_2026");
}

#[test]
fn test_run_date_from_fixed_clock() {
    let clock = FixedClock(date(2026, 10, 16));
    assert_eq!(RunDate::from_clock(&clock), RunDate::new(date(2026, 10, 16)));
}

#[test]
fn test_snapshot_copies_existing_definition() {
    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let defs = layout.definitions_dir(Environment::Stage, "flo_stage", ObjectKind::Functions);
    fs::create_dir_all(&defs).unwrap();
    fs::write(defs.join("calc_total.sql"), "old body").unwrap();

    let manager = BackupManager::new(
        layout.clone(),
        FileStore,
        Environment::Stage,
        "flo_stage",
        RunDate::new(date(2026, 10, 16)),
    );
    let name = ObjectName::try_new("calc_total").unwrap();
    let backup = manager
        .snapshot(ObjectKind::Functions, &name)
        .unwrap()
        .unwrap();

    assert_eq!(
        backup,
        dir.path()
            .join("db/STAGE/flo_stage/backup/10_16_2026/functions/calc_total.sql")
    );
    assert_eq!(fs::read_to_string(backup).unwrap(), "old body");
}

#[test]
fn test_snapshot_without_destination_definition() {
    let dir = tempdir().unwrap();
    let manager = BackupManager::new(
        Layout::new(dir.path()),
        FileStore,
        Environment::Prod,
        "flo",
        RunDate::new(date(2026, 10, 16)),
    );
    let name = ObjectName::try_new("new_fn").unwrap();

    assert!(manager
        .snapshot(ObjectKind::Functions, &name)
        .unwrap()
        .is_none());
    assert!(!manager.backup_dir(ObjectKind::Functions).exists());
}

#[test]
fn test_snapshot_keeps_first_backup_of_the_day() {
    let dir = tempdir().unwrap();
    let layout = Layout::new(dir.path());
    let defs = layout.definitions_dir(Environment::Stage, "flo_stage", ObjectKind::Procedures);
    fs::create_dir_all(&defs).unwrap();
    fs::write(defs.join("notify.sql"), "original").unwrap();
    let manager = BackupManager::new(
        layout,
        FileStore,
        Environment::Stage,
        "flo_stage",
        RunDate::new(date(2026, 10, 16)),
    );
    let name = ObjectName::try_new("notify").unwrap();

    let first = manager.snapshot(ObjectKind::Procedures, &name).unwrap();
    fs::write(defs.join("notify.sql"), "promoted").unwrap();
    let second = manager.snapshot(ObjectKind::Procedures, &name).unwrap();

    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(second.unwrap()).unwrap(), "original");
}
