//! The `PathVault` facade.

use crate::ProgressCallback;
use crate::Result;
use crate::VaultConfig;
use crate::archive::ArchiveReport;
use crate::archive::SubtreeArchive;
use crate::ingest::IngestReport;
use crate::ingest::UploadItem;
use crate::listing::StoredFile;
use crate::types::ResolvedPath;
use crate::types::Root;
use crate::types::SanitizedPath;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// A root directory plus the policy applied to everything stored in it.
///
/// This is the handle a server or CLI holds for its lifetime. It is cheap
/// to clone and carries no interior state, so concurrent requests may share
/// it freely.
///
/// # Examples
///
/// ```no_run
/// use pathvault_core::PathVault;
/// use pathvault_core::VaultConfig;
/// use pathvault_core::ingest::UploadItem;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let vault = PathVault::open("/srv/uploads", VaultConfig::default())?;
/// let report = vault.ingest(vec![UploadItem::new("notes/todo.txt", b"milk".to_vec())]);
/// assert_eq!(report.saved_count(), 1);
///
/// let archive = vault.archive_subtree("notes")?;
/// assert_eq!(archive.file_name, "notes.zip");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PathVault {
    root: Root,
    config: VaultConfig,
}

impl PathVault {
    /// Opens a vault over an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidRoot` if the directory is unusable, or a
    /// configuration error if `config` fails validation.
    pub fn open(root: impl Into<PathBuf>, config: VaultConfig) -> Result<Self> {
        config.validate()?;
        let root = Root::new(root)?;
        tracing::debug!(root = %root.as_path().display(), "opened vault");
        Ok(Self { root, config })
    }

    /// Like [`PathVault::open`], creating the directory first if missing.
    ///
    /// # Errors
    ///
    /// Same as [`PathVault::open`], plus I/O errors from directory creation.
    pub fn create(root: impl Into<PathBuf>, config: VaultConfig) -> Result<Self> {
        config.validate()?;
        let root = Root::create(root)?;
        Ok(Self { root, config })
    }

    /// Returns the canonical root.
    #[must_use]
    pub fn root(&self) -> &Root {
        &self.root
    }

    /// Returns the active policy.
    #[must_use]
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// See [`crate::sanitize::sanitize`].
    #[must_use]
    pub fn sanitize(&self, input: &str) -> SanitizedPath {
        crate::sanitize::sanitize(input)
    }

    /// See [`crate::security::resolve`].
    ///
    /// # Errors
    ///
    /// `VaultError::PathTraversal` if the path leaves the root.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> Result<ResolvedPath> {
        crate::security::resolve(&self.root, relative)
    }

    /// See [`crate::security::resolve_for_read`].
    ///
    /// # Errors
    ///
    /// `VaultError::PathTraversal` or `VaultError::NotFound`.
    pub fn resolve_for_read(&self, relative: &str) -> Result<ResolvedPath> {
        crate::security::resolve_for_read(&self.root, relative)
    }

    /// See [`crate::security::resolve_for_write`].
    ///
    /// # Errors
    ///
    /// `VaultError::PathTraversal` or `VaultError::NotAFile`.
    pub fn resolve_for_write(&self, relative: &str) -> Result<ResolvedPath> {
        crate::security::resolve_for_write(&self.root, relative)
    }

    /// See [`crate::archive::archive_subtree`].
    ///
    /// # Errors
    ///
    /// `VaultError::PathTraversal`, `VaultError::NotFound`, or I/O errors.
    pub fn archive_subtree(&self, folder: &str) -> Result<SubtreeArchive> {
        crate::archive::archive_subtree(&self.root, folder, &self.config)
    }

    /// See [`crate::archive::write_subtree_archive`].
    ///
    /// # Errors
    ///
    /// Same as [`PathVault::archive_subtree`].
    pub fn write_subtree_archive<W: Write + Seek>(
        &self,
        folder: &str,
        writer: W,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ArchiveReport> {
        crate::archive::write_subtree_archive(&self.root, folder, writer, &self.config, progress)
    }

    /// See [`crate::ingest::ingest`].
    pub fn ingest<I>(&self, items: I) -> IngestReport
    where
        I: IntoIterator<Item = UploadItem>,
    {
        crate::ingest::ingest(&self.root, items, &self.config)
    }

    /// See [`crate::listing::list_files`].
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read.
    pub fn list(&self) -> Result<Vec<StoredFile>> {
        crate::listing::list_files(&self.root)
    }

    /// See [`crate::listing::delete_file`].
    ///
    /// # Errors
    ///
    /// `VaultError::PathTraversal` or `VaultError::NotFound`.
    pub fn delete(&self, relative: &str) -> Result<()> {
        crate::listing::delete_file(&self.root, relative)
    }
}
