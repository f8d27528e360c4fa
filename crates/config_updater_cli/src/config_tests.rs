use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_app_config_default_uses_default_options() {
    let config = AppConfig::default();

    assert_eq!(config.options, UpdateOptions::default());
}

#[test]
fn test_app_config_load_partial_options() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config-updater.toml");
    fs::write(&config_path, "[options]\ndeep_merge = false\n").unwrap();

    let config = AppConfig::load(&config_path).expect("Failed to load settings");

    assert!(!config.options.deep_merge);
    assert!(!config.options.replace_config);
    assert_eq!(config.options.default_content.as_deref(), Some(""));
}

#[test]
fn test_app_config_load_without_options_table() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config-updater.toml");
    fs::write(&config_path, "").unwrap();

    let config = AppConfig::load(&config_path).expect("Failed to load settings");

    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_app_config_load_invalid_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("invalid.toml");
    fs::write(&config_path, "invalid = toml = syntax").unwrap();

    let result = AppConfig::load(&config_path);

    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("Failed to parse settings file")),
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_app_config_load_nonexistent_file() {
    let result = AppConfig::load(Path::new("nonexistent-settings.toml"));

    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("Settings file not found")),
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_resolve_requires_explicit_file_to_exist() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing.toml");

    let result = AppConfig::resolve(missing.to_str());

    assert!(result.is_err());
}

#[test]
fn test_resolve_loads_explicit_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("settings.toml");
    fs::write(
        &config_path,
        "[options]\nreplace_config = true\ndefault_content = \"{}\"\n",
    )
    .unwrap();

    let loaded = AppConfig::resolve(config_path.to_str()).expect("Failed to load settings");

    assert_eq!(
        loaded.options,
        UpdateOptions {
            replace_config: true,
            default_content: Some("{}".to_string()),
            ..Default::default()
        }
    );
}

#[test]
fn test_get_config_path_with_none() {
    let result = get_config_path(None);
    let expected = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_CONFIG_FILENAME);
    assert_eq!(result, expected);
}

#[test]
fn test_get_config_path_with_provided_path() {
    let result = get_config_path(Some("/custom/path/settings.toml"));
    assert_eq!(result, PathBuf::from("/custom/path/settings.toml"));
}
