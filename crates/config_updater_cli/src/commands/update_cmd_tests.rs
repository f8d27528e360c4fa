use super::*;
use std::fs;
use tempfile::TempDir;

const YAML: &str = "# listener\nport: 8080\nhost: localhost\n";

fn args_for(path: PathBuf) -> UpdateArgs {
    UpdateArgs {
        path,
        ..Default::default()
    }
}

fn write_settings(dir: &TempDir, body: &str) -> String {
    let path = dir.path().join("config-updater.toml");
    fs::write(&path, body).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_flags_override_settings() {
    let args = UpdateArgs {
        shallow: true,
        check: true,
        default_content: Some("{}".to_string()),
        ..Default::default()
    };

    let options = args.options(UpdateOptions::default());

    assert!(!options.deep_merge);
    assert!(options.check);
    assert_eq!(options.default_content.as_deref(), Some("{}"));
}

#[test]
fn test_no_default_clears_default_content() {
    let args = UpdateArgs {
        no_default: true,
        ..Default::default()
    };

    let options = args.options(UpdateOptions::default());

    assert!(options.default_content.is_none());
}

#[test]
fn test_unset_flags_keep_settings() {
    let base = UpdateOptions {
        replace_config: true,
        ..Default::default()
    };

    let options = UpdateArgs::default().options(base.clone());

    assert_eq!(options, base);
}

#[tokio::test]
async fn test_preview_does_not_write() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("app.yml");
    fs::write(&path, YAML).unwrap();
    let args = UpdateArgs {
        set: vec![("port".to_string(), "9090".to_string())],
        ..args_for(path.clone())
    };

    let preview = preview(&args).await.unwrap();

    assert_eq!(
        preview.as_deref(),
        Some("# listener\nport: 9090\nhost: localhost\n")
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), YAML);
}

#[tokio::test]
async fn test_check_reports_needed_update() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("app.yml");
    fs::write(&path, YAML).unwrap();

    let up_to_date = check(&UpdateArgs {
        json: Some(r#"{"port": "8080"}"#.to_string()),
        ..args_for(path.clone())
    })
    .await
    .unwrap();
    let needed = check(&UpdateArgs {
        json: Some(r#"{"port": 1}"#.to_string()),
        ..args_for(path)
    })
    .await
    .unwrap();

    assert!(!up_to_date);
    assert!(needed);
}

#[tokio::test]
async fn test_ensure_writes_and_backs_up_once() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("app.yml");
    fs::write(&path, YAML).unwrap();
    let args = UpdateArgs {
        set: vec![("port".to_string(), "9090".to_string())],
        ..args_for(path.clone())
    };

    let first = ensure(&args).await.unwrap();
    let second = ensure(&args).await.unwrap();

    let update = first.expect("first ensure should update");
    assert!(update.backup.is_some());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# listener\nport: 9090\nhost: localhost\n"
    );
    assert!(second.is_none());
}

#[tokio::test]
async fn test_ensure_respects_settings_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("app.json");
    fs::write(&path, r#"{"a": 1, "b": {"c": 2}}"#).unwrap();
    let settings = write_settings(&temp_dir, "[options]\nreplace_config = true\n");

    ensure(&UpdateArgs {
        json: Some(r#"{"b": {"d": 3}}"#.to_string()),
        settings: Some(settings),
        ..args_for(path.clone())
    })
    .await
    .unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, serde_json::json!({"b": {"d": 3}}));
}

#[tokio::test]
async fn test_ensure_missing_file_with_no_default_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("absent.yml");

    let result = ensure(&UpdateArgs {
        set: vec![("a".to_string(), "1".to_string())],
        no_default: true,
        ..args_for(path.clone())
    })
    .await;

    assert!(matches!(result, Err(Error::Update(_))));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_ensure_without_proposal_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let result = ensure(&args_for(temp_dir.path().join("app.yml"))).await;

    assert!(matches!(result, Err(Error::InvalidArguments(_))));
}

#[tokio::test]
async fn test_backup_missing_file_returns_none() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("app.yml");

    assert!(backup(&path).await.unwrap().is_none());

    fs::write(&path, YAML).unwrap();
    let record = backup(&path).await.unwrap().unwrap();
    assert_eq!(fs::read_to_string(&record.path).unwrap(), YAML);
}
