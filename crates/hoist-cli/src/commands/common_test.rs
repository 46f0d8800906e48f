use super::*;

#[test]
fn test_calculate_column_widths() {
    let rows = vec![
        vec!["functions/new.list".to_string(), "2".to_string()],
        vec!["tables/alter-columns.list".to_string(), "10".to_string()],
    ];
    assert_eq!(calculate_column_widths(&["LIST", "COUNT"], &rows), vec![25, 5]);
}

#[test]
fn test_load_config_from_project_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("hoist.yml"),
        "name: cli\nenvironments:\n  UAT: { host: h, database: flo_uat, user: u }\n",
    )
    .unwrap();
    let global = GlobalArgs {
        verbose: false,
        project_dir: dir.path().display().to_string(),
        config: None,
        experimental: None,
    };

    let config = load_config(&global).unwrap();
    assert_eq!(config.name, "cli");
}

#[test]
fn test_load_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let global = GlobalArgs {
        verbose: false,
        project_dir: ".".to_string(),
        config: Some(dir.path().join("absent.yml").display().to_string()),
        experimental: None,
    };

    assert!(load_config(&global).is_err());
}
