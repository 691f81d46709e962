//! Integration tests for applying marker blocks to files on disk.

use aip_blocks::{Error, Marker, Placement, ensure_and_replace, preview};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn block(body: &str) -> String {
    format!(
        "### AIPHELPER_MARKER_START ###\n{body}\n### AIPHELPER_MARKER_END ###\n"
    )
}

#[test]
fn test_creates_missing_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".steampipe").join("config").join("aws.spc");

    let placement = ensure_and_replace(&path, &Marker::default(), &block("connection")).unwrap();

    assert_eq!(placement, Placement::Appended);
    assert_eq!(fs::read_to_string(&path).unwrap(), block("connection"));
}

#[test]
fn test_replaces_existing_block_and_keeps_user_content() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    fs::write(
        &path,
        format!("[default]\nregion = us-east-1\n\n{}[profile mine]\n", block("old")),
    )
    .unwrap();

    let placement = ensure_and_replace(&path, &Marker::default(), &block("new")).unwrap();

    assert!(matches!(placement, Placement::Replaced(_)));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("[default]\nregion = us-east-1\n\n{}[profile mine]\n", block("new"))
    );
}

#[test]
fn test_second_run_is_a_no_op() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, "[default]\noutput = json\n").unwrap();
    let marker = Marker::default();

    ensure_and_replace(&path, &marker, &block("a")).unwrap();
    let first = fs::read_to_string(&path).unwrap();
    ensure_and_replace(&path, &marker, &block("a")).unwrap();
    let second = fs::read_to_string(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unreadable_target_is_an_error() {
    let temp = TempDir::new().unwrap();
    // A directory can be "ensured" but never read as text
    let path = temp.path().join("config");
    fs::create_dir(&path).unwrap();

    let result = ensure_and_replace(&path, &Marker::default(), &block("x"));

    assert!(matches!(result, Err(Error::Fs(aip_fs::Error::Io { .. }))));
}

#[test]
fn test_invalid_utf8_is_an_error_and_file_is_untouched() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

    let result = ensure_and_replace(&path, &Marker::default(), &block("x"));

    assert!(result.is_err());
    assert_eq!(fs::read(&path).unwrap(), vec![0xff, 0xfe, 0x00]);
}

#[test]
fn test_preview_does_not_write() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing").join("config");

    let contents = preview(&path, &Marker::default(), &block("x")).unwrap();

    assert_eq!(contents, block("x"));
    assert!(!path.exists());
    assert!(!temp.path().join("missing").exists());
}

#[test]
fn test_preview_matches_written_result() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, format!("top\n{}bottom", block("old"))).unwrap();
    let marker = Marker::default();

    let previewed = preview(&path, &marker, &block("new")).unwrap();
    ensure_and_replace(&path, &marker, &block("new")).unwrap();

    assert_eq!(previewed, fs::read_to_string(&path).unwrap());
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_updated_through_the_link() {
    let temp = TempDir::new().unwrap();
    let real = temp.path().join("dotfiles_config");
    let link = temp.path().join("config");
    fs::write(&real, "[default]\n").unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let placement = ensure_and_replace(&link, &Marker::default(), &block("profile")).unwrap();

    assert_eq!(placement, Placement::Appended);
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    let expected = format!("[default]\n\n{}", block("profile"));
    assert_eq!(fs::read_to_string(&real).unwrap(), expected);
    assert_eq!(fs::read_to_string(&link).unwrap(), expected);
}
