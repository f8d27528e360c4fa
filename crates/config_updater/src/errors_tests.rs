//! Tests for configuration update error types.

use super::*;
use std::error::Error as _;
use std::io;

#[test]
fn test_io_error_keeps_source_and_path() {
    let error = ConfigUpdateError::io(
        "/etc/app/config.json",
        io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    );

    assert_eq!(error.path(), &PathBuf::from("/etc/app/config.json"));
    assert!(error.source().is_some());
    assert!(error.to_string().contains("/etc/app/config.json"));
    assert!(error.to_string().contains("denied"));

    match error {
        ConfigUpdateError::Io { source, .. } => {
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied)
        }
        _ => panic!("Expected Io"),
    }
}

#[test]
fn test_unsupported_format_message_names_file() {
    let error = ConfigUpdateError::UnsupportedFormat {
        path: PathBuf::from("settings.conf"),
        format: "conf".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Could not find suitable handler for settings.conf (format 'conf')"
    );
}

#[test]
fn test_parse_error_includes_format_and_reason() {
    let error = ConfigUpdateError::Parse {
        path: PathBuf::from("app.yml"),
        format: "yaml".to_string(),
        reason: "mapping values are not allowed here".to_string(),
    };

    let message = error.to_string();
    assert!(message.contains("app.yml"));
    assert!(message.contains("yaml"));
    assert!(message.contains("mapping values are not allowed here"));
    assert!(error.source().is_none());
}

#[test]
fn test_serialize_error_reports_path() {
    let error = ConfigUpdateError::Serialize {
        path: PathBuf::from("app.ini"),
        format: "properties".to_string(),
        reason: "nested too deeply".to_string(),
    };

    assert_eq!(error.path(), &PathBuf::from("app.ini"));
    assert!(error.to_string().starts_with("Failed to serialize app.ini"));
}
