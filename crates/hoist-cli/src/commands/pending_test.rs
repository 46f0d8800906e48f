use super::*;
use std::fs;

fn write(path: std::path::PathBuf, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_collect_lists_non_empty_work_lists() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("hoist.yml");
    fs::write(
        &config_path,
        "name: cli\nenvironments:\n  UAT: { host: h, database: flo_uat, user: u }\n  STAGE: { host: h, database: flo_stage, user: u }\n",
    )
    .unwrap();
    let lists = dir.path().join("map-migrate/UAT-to-STAGE/flo_uat");
    write(lists.join("functions/new.list"), "calc_total\ncalc_tax\n");
    write(lists.join("procedures/new.list"), "");
    write(lists.join("tables/alter-indexes.list"), "orders\n");
    let config = Config::load(&config_path).unwrap();

    let pending = collect(&config, Environment::Stage).unwrap();

    assert_eq!(
        rows(&pending),
        vec![
            vec![
                "functions/new.list".to_string(),
                "2".to_string(),
                "calc_total, calc_tax".to_string(),
            ],
            vec![
                "tables/alter-indexes.list".to_string(),
                "1".to_string(),
                "orders".to_string(),
            ],
        ]
    );
}

#[test]
fn test_collect_rejects_chain_head() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("hoist.yml");
    fs::write(&config_path, "name: cli\n").unwrap();
    let config = Config::load(&config_path).unwrap();

    assert!(collect(&config, Environment::Dev).is_err());
}

#[test]
fn test_configured_targets_skip_unconfigured_destinations() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("hoist.yml");
    fs::write(
        &config_path,
        "name: cli\nenvironments:\n  DEV: { host: h, database: flo_dev, user: u }\n  UAT: { host: h, database: flo_uat, user: u }\n  STAGE: { host: h, database: flo_stage, user: u }\n",
    )
    .unwrap();
    let config = Config::load(&config_path).unwrap();

    assert_eq!(
        configured_targets(&config),
        vec![Environment::Uat, Environment::Stage]
    );
}
