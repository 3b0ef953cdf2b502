//! Path traversal attack integration tests.
//!
//! Replays the classic escape attempts against both stages: the sanitizer
//! must defuse them, and the resolver must refuse them when handed raw.

#![allow(clippy::unwrap_used)]

use pathvault_core::Root;
use pathvault_core::VaultConfig;
use pathvault_core::VaultError;
use pathvault_core::ingest::UploadItem;
use pathvault_core::ingest::ingest;
use pathvault_core::sanitize;
use pathvault_core::security::resolve;
use pathvault_core::security::resolve_components;
use pathvault_core::security::resolve_for_read;
use std::fs;
use tempfile::TempDir;

const MALICIOUS_NAMES: &[&str] = &[
    "../etc/passwd",
    "../../etc/passwd",
    "foo/../../etc/passwd",
    "foo/../../../etc/passwd",
    "..\\..\\windows\\system32\\config\\sam",
    "....//....//etc/passwd",
    "/etc/passwd",
    "//etc/passwd",
    "\\\\server\\share\\file",
    "C:\\Windows\\System32",
];

#[test]
fn test_raw_parent_traversal_rejected() {
    let temp = TempDir::new().unwrap();
    let root = Root::new(temp.path()).unwrap();

    for path in ["../etc/passwd", "../../etc/passwd", "foo/../../etc/passwd", ".."] {
        let result = resolve(&root, path);
        assert!(
            matches!(result, Err(VaultError::PathTraversal { .. })),
            "Path should be rejected: {path}"
        );
    }
}

#[cfg(unix)]
#[test]
fn test_absolute_path_injection_rejected() {
    let temp = TempDir::new().unwrap();
    let root = Root::new(temp.path()).unwrap();

    for path in ["/etc/passwd", "/tmp/malicious"] {
        let err = resolve(&root, path).unwrap_err();
        assert!(err.is_security_violation(), "Absolute path should be rejected: {path}");
    }

    let err = resolve_components(&root, ["uploads", "/etc/passwd"]).unwrap_err();
    assert!(err.is_security_violation());
}

#[cfg(unix)]
#[test]
fn test_null_byte_injection() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp = TempDir::new().unwrap();
    let root = Root::new(temp.path()).unwrap();

    let path = OsStr::from_bytes(b"file.txt\0.jpg");
    let err = resolve(&root, path).unwrap_err();
    assert!(matches!(err, VaultError::PathTraversal { .. }));

    assert_eq!(sanitize("file.txt\0.jpg").as_str(), "file.txt.jpg");
}

#[test]
fn test_sanitized_names_stay_inside_root() {
    let temp = TempDir::new().unwrap();
    let root = Root::new(temp.path()).unwrap();

    for name in MALICIOUS_NAMES {
        let sanitized = sanitize(name);
        assert!(
            sanitized.segments().all(|s| s != ".."),
            "Traversal segment survived in {name:?}"
        );
        let resolved = resolve(&root, sanitized.as_path()).unwrap();
        assert!(
            resolved.as_path().starts_with(root.as_path()),
            "Escaped root: {name:?}"
        );
    }
}

#[test]
fn test_sibling_prefix_is_not_inside() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("vault")).unwrap();
    fs::create_dir(temp.path().join("vault-evil")).unwrap();
    let root = Root::new(temp.path().join("vault")).unwrap();

    let err = resolve(&root, "../vault-evil/file.txt").unwrap_err();
    assert!(matches!(err, VaultError::PathTraversal { .. }));
}

#[cfg(unix)]
#[test]
fn test_symlink_escape_on_read() {
    let temp = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    fs::write(outside.path().join("secret.txt"), "secret").unwrap();
    std::os::unix::fs::symlink(
        outside.path().join("secret.txt"),
        temp.path().join("innocent.txt"),
    )
    .unwrap();
    let root = Root::new(temp.path()).unwrap();

    let err = resolve_for_read(&root, "innocent.txt").unwrap_err();
    assert!(err.is_security_violation());
}

#[test]
fn test_malicious_batch_lands_inside_root() {
    let temp = TempDir::new().unwrap();
    let root_dir = temp.path().join("root");
    fs::create_dir(&root_dir).unwrap();
    let root = Root::new(&root_dir).unwrap();

    let items = MALICIOUS_NAMES
        .iter()
        .map(|name| UploadItem::new(*name, b"payload".to_vec()));
    let report = ingest(&root, items, &VaultConfig::default());

    assert_eq!(report.rejected_count() + report.saved_count(), MALICIOUS_NAMES.len());
    for saved in &report.saved {
        assert!(root_dir.join(&saved.relative_path).is_file());
    }
    // Nothing may appear next to the root
    let siblings: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(siblings.len(), 1);
}

#[test]
fn test_error_messages_do_not_leak_root() {
    let temp = TempDir::new().unwrap();
    let root = Root::new(temp.path()).unwrap();

    let err = resolve(&root, "../../etc/passwd").unwrap_err();
    let message = err.to_string();
    assert!(!message.contains(&*root.as_path().to_string_lossy()));
    assert!(message.contains("etc/passwd"));
}
