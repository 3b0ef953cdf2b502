//! Batch upload ingestion.
//!
//! A folder upload arrives as a list of `(name, bytes)` pairs. Each pair is
//! sanitized, checked against the [`VaultConfig`] policy, resolved under the
//! root and written, overwriting whatever was there. One bad item never
//! aborts the batch; it is recorded as rejected and the rest carry on.

use crate::VaultConfig;
use crate::VaultError;
use crate::sanitize::sanitize;
use crate::security::resolve_for_write;
use crate::types::Root;
use sha2::Digest;
use sha2::Sha256;
use std::fmt;
use std::fs;

/// One file of an upload batch, as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadItem {
    /// Client-supplied relative name, untrusted.
    pub name: String,

    /// File contents.
    pub data: Vec<u8>,
}

impl UploadItem {
    /// Creates an upload item.
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// A file written to the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    /// Name as supplied by the client.
    pub original_name: String,

    /// Stored location relative to the root, `/`-separated.
    pub relative_path: String,

    /// Number of bytes written.
    pub size: u64,

    /// Lowercase hex SHA-256 of the contents.
    pub sha256: String,
}

/// Why an upload item was not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Nothing was left of the name after sanitization.
    EmptyName,
    /// The file extension is not in the allow-list.
    ExtensionNotAllowed,
    /// Zero-byte content while empty files are refused.
    EmptyContent,
    /// Content exceeds the configured size limit.
    TooLarge,
    /// More path segments than the configured depth limit.
    TooDeep,
    /// The name resolved outside the root.
    PathTraversal,
    /// The name resolved to the root or to an existing directory.
    NotAFile,
    /// Creating directories or writing the file failed.
    Io,
}

impl RejectReason {
    /// Stable snake_case code for machine-readable output.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::ExtensionNotAllowed => "extension_not_allowed",
            Self::EmptyContent => "empty_content",
            Self::TooLarge => "too_large",
            Self::TooDeep => "too_deep",
            Self::PathTraversal => "path_traversal",
            Self::NotAFile => "not_a_file",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::EmptyName => "name is empty after sanitization",
            Self::ExtensionNotAllowed => "file type not allowed",
            Self::EmptyContent => "file is empty",
            Self::TooLarge => "file exceeds size limit",
            Self::TooDeep => "path is nested too deeply",
            Self::PathTraversal => "path escapes the vault root",
            Self::NotAFile => "path names a directory",
            Self::Io => "failed to write file",
        };
        f.write_str(text)
    }
}

/// An upload item that was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedUpload {
    /// Name as supplied by the client.
    pub name: String,

    /// Why it was refused.
    pub reason: RejectReason,
}

/// Outcome of a batch upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Items written to disk, in batch order.
    pub saved: Vec<SavedFile>,

    /// Items refused, in batch order.
    pub rejected: Vec<RejectedUpload>,
}

impl IngestReport {
    /// Number of files written.
    #[must_use]
    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    /// Number of items refused.
    #[must_use]
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Client-supplied names of the refused items.
    #[must_use]
    pub fn rejected_names(&self) -> Vec<&str> {
        self.rejected.iter().map(|r| r.name.as_str()).collect()
    }

    /// Total bytes written across all saved files.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.saved.iter().map(|s| s.size).sum()
    }

    /// Returns `true` if every item was stored.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Stores a batch of uploads under the root.
///
/// Items are processed in order. When two items sanitize to the same path
/// the later one wins.
///
/// # Examples
///
/// ```no_run
/// use pathvault_core::Root;
/// use pathvault_core::VaultConfig;
/// use pathvault_core::ingest::UploadItem;
/// use pathvault_core::ingest::ingest;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = Root::new("/srv/uploads")?;
/// let items = vec![
///     UploadItem::new("photos/a.jpg", b"...".to_vec()),
///     UploadItem::new("../../etc/passwd", b"root".to_vec()),
/// ];
/// let report = ingest(&root, items, &VaultConfig::default());
/// println!("saved {}, rejected {}", report.saved_count(), report.rejected_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest<I>(root: &Root, items: I, config: &VaultConfig) -> IngestReport
where
    I: IntoIterator<Item = UploadItem>,
{
    let mut report = IngestReport::default();

    for item in items {
        match store_item(root, &item, config) {
            Ok(saved) => {
                tracing::debug!(
                    path = %saved.relative_path,
                    size = saved.size,
                    "stored upload"
                );
                report.saved.push(saved);
            }
            Err(reason) => {
                if reason == RejectReason::PathTraversal {
                    tracing::warn!(
                        target: "pathvault::security",
                        name = %item.name,
                        "upload rejected: {reason}"
                    );
                } else {
                    tracing::warn!(name = %item.name, code = reason.code(), "upload rejected: {reason}");
                }
                report.rejected.push(RejectedUpload {
                    name: item.name,
                    reason,
                });
            }
        }
    }

    report
}

fn store_item(
    root: &Root,
    item: &UploadItem,
    config: &VaultConfig,
) -> std::result::Result<SavedFile, RejectReason> {
    let sanitized = sanitize(&item.name);
    let Some(file_name) = sanitized.file_name() else {
        return Err(RejectReason::EmptyName);
    };

    if !config.is_name_allowed(file_name) {
        return Err(RejectReason::ExtensionNotAllowed);
    }
    if item.data.is_empty() && !config.allow_empty_files {
        return Err(RejectReason::EmptyContent);
    }
    if item.data.len() as u64 > config.max_file_size {
        return Err(RejectReason::TooLarge);
    }
    if sanitized.depth() > config.max_path_depth {
        return Err(RejectReason::TooDeep);
    }

    let target = resolve_for_write(root, sanitized.as_str()).map_err(|e| match e {
        VaultError::PathTraversal { .. } | VaultError::SecurityViolation { .. } => {
            RejectReason::PathTraversal
        }
        VaultError::NotAFile { .. } => RejectReason::NotAFile,
        _ => RejectReason::Io,
    })?;

    if let Some(parent) = target.as_path().parent() {
        fs::create_dir_all(parent).map_err(|e| io_rejection(&item.name, &e))?;
    }
    fs::write(target.as_path(), &item.data).map_err(|e| io_rejection(&item.name, &e))?;

    Ok(SavedFile {
        original_name: item.name.clone(),
        relative_path: target.relative_display(),
        size: item.data.len() as u64,
        sha256: sha256_hex(&item.data),
    })
}

fn io_rejection(name: &str, err: &std::io::Error) -> RejectReason {
    tracing::error!(name = %name, error = %err, "failed to store upload");
    RejectReason::Io
}

pub(crate) fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
