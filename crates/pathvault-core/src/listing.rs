//! On-demand listing and removal of stored files.
//!
//! There is no index. Listing walks the root every time.

use crate::Result;
use crate::archive::walker::EntryKind;
use crate::archive::walker::SubtreeWalker;
use crate::ingest::sha256_hex;
use crate::mime::IconCategory;
use crate::mime::guess_mime;
use crate::security::resolve_for_read;
use crate::types::Root;
use sha2::Digest;
use sha2::Sha256;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::SystemTime;

/// A regular file found under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path relative to the root, `/`-separated.
    pub relative_path: String,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time, where the platform reports one.
    pub modified: Option<SystemTime>,

    /// MIME type guessed from the extension.
    pub mime: String,
}

impl StoredFile {
    /// Icon category for this file.
    #[must_use]
    pub fn icon(&self) -> IconCategory {
        IconCategory::from_mime(&self.mime)
    }
}

/// Lists every regular file under the root, sorted by relative path.
///
/// Symlinks are neither followed nor listed.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn list_files(root: &Root) -> Result<Vec<StoredFile>> {
    let mut files = Vec::new();

    for entry in SubtreeWalker::new(root, root.as_path()).walk() {
        let entry = entry?;
        if entry.kind != EntryKind::File {
            continue;
        }
        let modified = fs::symlink_metadata(&entry.path)
            .and_then(|m| m.modified())
            .ok();
        files.push(StoredFile {
            mime: guess_mime(&entry.archive_name),
            relative_path: entry.archive_name,
            size: entry.size,
            modified,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(files)
}

/// Computes the lowercase hex SHA-256 of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn file_digest(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Digest of in-memory content, same format as [`file_digest`].
#[must_use]
pub fn content_digest(data: &[u8]) -> String {
    sha256_hex(data)
}

/// Deletes a stored file and prunes directories it leaves empty.
///
/// The root itself is never removed.
///
/// # Errors
///
/// - `VaultError::PathTraversal` if the name resolves outside the root
/// - `VaultError::NotFound` if no regular file exists there
pub fn delete_file(root: &Root, relative: &str) -> Result<()> {
    let target = resolve_for_read(root, relative)?;
    fs::remove_file(target.as_path())?;

    tracing::debug!(path = %target.relative_display(), "deleted file");

    let mut dir = target.as_path().parent();
    while let Some(current) = dir {
        if current == root.as_path() || !root.contains(current) {
            break;
        }
        match fs::remove_dir(current) {
            Ok(()) => dir = current.parent(),
            // Not empty, or raced with another writer
            Err(_) => break,
        }
    }
    Ok(())
}
