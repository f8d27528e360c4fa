use super::*;
use std::path::PathBuf;

#[test]
fn test_config_error_display() {
    let error = Error::Config("Missing table 'options'".to_string());
    assert_eq!(
        error.to_string(),
        "Configuration error: Missing table 'options'"
    );
}

#[test]
fn test_invalid_arguments_error_display() {
    let error = Error::InvalidArguments("--json must be an object".to_string());
    assert_eq!(
        error.to_string(),
        "Invalid arguments: --json must be an object"
    );
}

#[test]
fn test_update_error_is_transparent() {
    let inner = ConfigUpdateError::UnsupportedFormat {
        path: PathBuf::from("app.conf"),
        format: "conf".to_string(),
    };
    let expected = inner.to_string();

    let error: Error = inner.into();

    assert_eq!(error.to_string(), expected);
    assert!(matches!(error, Error::Update(_)));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
