//! Tests for the local file-system store.

use super::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_write_then_read_round_trips_text() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("app.json");

    LocalFileSystem.write(&path, "{\"a\": 1}\n").await.unwrap();
    let text = LocalFileSystem.read_to_string(&path).await.unwrap();

    assert_eq!(text, "{\"a\": 1}\n");
}

#[tokio::test]
async fn test_read_missing_file_reports_not_found() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let error = LocalFileSystem
        .read_to_string(&temp_dir.path().join("missing.yml"))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), io::ErrorKind::NotFound);
}

#[tokio::test]
async fn test_list_dir_returns_entry_names() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(temp_dir.path().join("a.ini"), "").unwrap();
    std::fs::write(temp_dir.path().join("b.xml"), "").unwrap();

    let mut names = LocalFileSystem.list_dir(temp_dir.path()).await.unwrap();
    names.sort();

    assert_eq!(names, vec!["a.ini".to_string(), "b.xml".to_string()]);
}

#[tokio::test]
async fn test_copy_streams_bytes_to_new_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let source = temp_dir.path().join("cfg.yml");
    let target = temp_dir.path().join("cfg.yml.bak");
    std::fs::write(&source, "# comment\nkey: value\n").unwrap();

    let copied = LocalFileSystem.copy(&source, &target).await.unwrap();

    assert_eq!(copied, 21);
    assert_eq!(
        std::fs::read_to_string(&target).unwrap(),
        "# comment\nkey: value\n"
    );
}

#[test]
fn test_parent_dir_defaults_to_current_directory() {
    assert_eq!(parent_dir(Path::new("cfg.json")), PathBuf::from("."));
    assert_eq!(
        parent_dir(Path::new("/etc/app/cfg.json")),
        PathBuf::from("/etc/app")
    );
}
