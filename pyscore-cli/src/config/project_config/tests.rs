use super::*;

#[test]
fn test_empty_config_uses_defaults() {
    let config = parse_config("").unwrap();
    assert_eq!(config.rules.long_function_warn, 50);
    assert_eq!(config.rules.long_function_max, 100);
    assert_eq!(config.rules.duplicate_min_chars, 20);
    assert_eq!(config.rules.duplicate_max_repeats, 2);
    assert_eq!(config.rules.min_doc_coverage, 50.0);
    assert_eq!(config.rules.min_type_hint_coverage, 30.0);
    assert!(config.exclude.paths.is_empty());
    assert_eq!(config.report.max_issues_per_severity, 5);
    assert!(config.report.format.is_none());
}

#[test]
fn test_partial_override() {
    let config = parse_config(
        r#"
[rules]
long_function_warn = 30

[exclude]
paths = ["build/**"]

[report]
format = "json"
"#,
    )
    .unwrap();
    assert_eq!(config.rules.long_function_warn, 30);
    assert_eq!(config.rules.long_function_max, 100);
    assert_eq!(config.exclude.paths, vec!["build/**".to_string()]);
    assert_eq!(config.report.format.as_deref(), Some("json"));
}

#[test]
fn test_unknown_key_rejected() {
    assert!(parse_config("[rules]\nmax_lines = 10\n").is_err());
}

#[test]
fn test_inverted_thresholds_rejected() {
    let err = parse_config("[rules]\nlong_function_warn = 200\n").unwrap_err();
    assert!(err.contains("long_function_warn"));
}

#[test]
fn test_coverage_out_of_range_rejected() {
    assert!(parse_config("[rules]\nmin_doc_coverage = 150.0\n").is_err());
}

#[test]
fn test_load_project_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_project_config(dir.path());
    assert_eq!(config.rules.long_function_max, 100);
}

#[test]
fn test_load_project_config_invalid_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[rules\n").unwrap();
    let config = load_project_config(dir.path());
    assert_eq!(config.report.max_issues_per_severity, 5);
}

#[test]
fn test_unknown_report_format_rejected() {
    let err = parse_config("[report]\nformat = \"xml\"\n").unwrap_err();
    assert!(err.contains("report.format"), "{err}");
    assert!(err.contains("xml"), "{err}");

    let config = parse_config("[report]\nformat = \"TXT\"\n").unwrap();
    assert_eq!(config.report.format.as_deref(), Some("TXT"));
}

#[test]
fn test_discovered_config_with_unknown_format_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[rules]\nlong_function_warn = 10\n\n[report]\nformat = \"xml\"\n",
    )
    .unwrap();
    let config = load_project_config(dir.path());
    assert!(config.report.format.is_none());
    assert_eq!(config.rules.long_function_warn, 50);
}

#[test]
fn test_load_config_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[report]\nmax_issues_per_severity = \"many\"\n").unwrap();
    match load_config_file(&path) {
        Err(AnalysisError::Config { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected config error, got {other:?}"),
    }
}
