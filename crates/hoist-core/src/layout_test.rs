use super::*;
use chrono::NaiveDate;

fn layout() -> Layout {
    Layout::new("/data")
}

#[test]
fn test_definitions_dir() {
    assert_eq!(
        layout().definitions_dir(Environment::Stage, "flo_stage", ObjectKind::Functions),
        PathBuf::from("/data/db/STAGE/flo_stage/functions")
    );
}

#[test]
fn test_worklist_file() {
    assert_eq!(
        layout().worklist_file(
            Environment::Uat,
            Environment::Stage,
            "flo_uat",
            ObjectKind::Procedures,
            ListStatus::Updated
        ),
        PathBuf::from("/data/map-migrate/UAT-to-STAGE/flo_uat/procedures/updated.list")
    );
}

#[test]
fn test_backup_dir() {
    let date = RunDate::new(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
    assert_eq!(
        layout().backup_dir(Environment::Prod, "flo", &date, ObjectKind::Procedures),
        PathBuf::from("/data/db/PROD/flo/backup/3_7_2026/procedures")
    );
}

#[test]
fn test_alter_paths() {
    let l = layout();
    assert_eq!(
        l.alter_list_file(
            Environment::Stage,
            Environment::Prod,
            "flo_stage",
            AlterKind::Indexes
        ),
        PathBuf::from("/data/map-migrate/STAGE-to-PROD/flo_stage/tables/alter-indexes.list")
    );
    assert_eq!(
        l.alter_statements_dir(
            Environment::Stage,
            Environment::Prod,
            "flo_stage",
            AlterKind::Columns
        ),
        PathBuf::from("/data/map-migrate/STAGE-to-PROD/flo_stage/tables/alters/columns")
    );
}

#[test]
fn test_sync_marker_next_to_list() {
    let marker = layout().sync_marker_file(
        Environment::Dev,
        Environment::Uat,
        "flo_dev",
        ObjectKind::Functions,
        ListStatus::New,
    );
    assert_eq!(
        marker,
        PathBuf::from("/data/map-migrate/DEV-to-UAT/flo_dev/functions/new.sync.json")
    );
}
