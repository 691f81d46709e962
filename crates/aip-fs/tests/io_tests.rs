use aip_fs::io;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.txt");

    io::write_atomic(&path, b"hello world", None).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("test.txt");
    fs::write(&path, "original content that is longer").unwrap();

    io::write_atomic(&path, b"updated", None).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_text_creates_missing_parents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("a").join("b").join("c").join("file.txt");

    io::write_text(&path, "deep content").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "deep content");
}

#[test]
fn test_read_text_nonexistent_file() {
    let temp = TempDir::new().unwrap();
    let result = io::read_text(&temp.path().join("missing.txt"));

    assert!(matches!(result, Err(aip_fs::Error::Io { .. })));
}

#[test]
fn test_ensure_file_keeps_existing_content() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, "[profile keep]\n").unwrap();

    let created = io::ensure_file(&path).unwrap();

    assert!(!created);
    assert_eq!(fs::read_to_string(&path).unwrap(), "[profile keep]\n");
}

#[cfg(unix)]
#[test]
fn test_write_text_applies_fixed_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config");
    fs::write(&path, "x").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

    io::write_text(&path, "y").unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, aip_fs::MANAGED_FILE_MODE);
}

#[cfg(unix)]
#[test]
fn test_write_atomic_with_cache_mode() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("token.json");

    io::write_atomic(&path, b"{}", Some(aip_fs::CACHE_FILE_MODE)).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}
