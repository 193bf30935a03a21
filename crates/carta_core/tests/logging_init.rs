use carta_core::{default_log_level, init_logging, logging_status};

// Logging state is process-global, so every scenario lives in one test fn.
#[test]
fn init_is_idempotent_for_same_config_and_rejects_conflicts() {
    let log_dir = tempfile::tempdir().unwrap();
    let other_dir = tempfile::tempdir().unwrap();
    let log_dir_str = log_dir.path().to_str().unwrap();

    assert!(logging_status().is_none());

    init_logging("info", log_dir_str).unwrap();
    init_logging("INFO", log_dir_str).unwrap();

    let level_err = init_logging("debug", log_dir_str).unwrap_err();
    assert!(level_err.contains("refusing to switch"));

    let dir_err = init_logging("info", other_dir.path().to_str().unwrap()).unwrap_err();
    assert!(dir_err.contains("refusing to switch"));

    let (level, dir) = logging_status().unwrap();
    assert_eq!(level, "info");
    assert_eq!(dir, log_dir.path());

    // The rolling log file exists in the chosen directory.
    let has_log_file = std::fs::read_dir(log_dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .any(|entry| entry.file_name().to_string_lossy().starts_with("carta"));
    assert!(has_log_file);

    assert!(matches!(default_log_level(), "debug" | "info"));
}
