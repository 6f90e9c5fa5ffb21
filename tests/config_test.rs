use std::env;

use spotidal::TransferError;
use spotidal::config::load_env_file;
use tempfile::tempdir;

#[test]
fn test_load_env_file_missing_is_skipped() {
    let dir = tempdir().unwrap();
    let loaded = load_env_file(&dir.path().join(".env")).unwrap();
    assert!(!loaded);
}

#[test]
fn test_load_env_file_applies_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(
        &path,
        "# comment\nSPOTIDAL_TEST_FIRST_FILE=from-file\nSPOTIDAL_TEST_QUOTED=\"with spaces\"\n",
    )
    .unwrap();

    assert!(load_env_file(&path).unwrap());
    assert_eq!(env::var("SPOTIDAL_TEST_FIRST_FILE").unwrap(), "from-file");
    assert_eq!(env::var("SPOTIDAL_TEST_QUOTED").unwrap(), "with spaces");
}

#[test]
fn test_load_env_file_never_overwrites() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.env");
    let second = dir.path().join("second.env");
    std::fs::write(&first, "SPOTIDAL_TEST_PRECEDENCE=data-dir\n").unwrap();
    std::fs::write(&second, "SPOTIDAL_TEST_PRECEDENCE=working-dir\n").unwrap();

    assert!(load_env_file(&first).unwrap());
    assert!(load_env_file(&second).unwrap());
    assert_eq!(env::var("SPOTIDAL_TEST_PRECEDENCE").unwrap(), "data-dir");
}

#[test]
fn test_load_env_file_reports_malformed_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "THIS IS NOT VALID\nSPOTIDAL_TEST_AFTER_BAD_LINE=abc\n").unwrap();

    let err = load_env_file(&path).unwrap_err();
    match err {
        TransferError::InvalidConfiguration(message) => {
            assert!(message.contains(&path.display().to_string()));
            assert!(message.contains("THIS IS NOT VALID"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
