use hostscope::core::config::{Config, RefreshIntervals};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.gpu_enabled);
    assert_eq!(config.history_capacity, 60);
    assert_eq!(config.intervals.disk(), Duration::from_secs(60));
    assert_eq!(config.intervals.memory(), Duration::from_secs(1));
}

#[test]
fn test_config_load_missing_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_empty_file_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "  \n").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_config_load_invalid_json_returns_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_config_partial_file_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"gpu_enabled": false, "intervals": {"disk_ms": 5000}}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert!(!config.gpu_enabled);
    assert_eq!(config.intervals.disk(), Duration::from_secs(5));
    assert_eq!(config.intervals.cpu_load_ms, RefreshIntervals::default().cpu_load_ms);
    assert_eq!(config.history_capacity, 60);
}

#[test]
fn test_config_save_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.history_capacity = 120;
    config.intervals.gpu_ms = 2_500;
    config.save_to(&path).unwrap();

    assert!(path.exists());
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_config_path_is_under_app_dir() {
    if let Ok(path) = Config::get_config_path() {
        assert!(path.ends_with("hostscope/config.json") || path.ends_with("hostscope\\config.json"));
    }
}
