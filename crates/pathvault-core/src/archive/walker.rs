//! Directory tree walking under the vault root.
//!
//! Symlinks are never followed. A link planted inside an uploaded folder is
//! reported as [`EntryKind::Symlink`] and left to the caller to skip, so
//! neither archives nor listings can reach outside the root through one.

use crate::Result;
use crate::VaultError;
use crate::types::Root;
use crate::types::resolved_path::to_slash;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Walks a directory below the root, naming entries relative to the root.
///
/// # Examples
///
/// ```no_run
/// use pathvault_core::Root;
/// use pathvault_core::archive::walker::SubtreeWalker;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = Root::new("/srv/uploads")?;
/// let dir = root.as_path().join("photos");
/// for entry in SubtreeWalker::new(&root, &dir).walk() {
///     let entry = entry?;
///     println!("{}", entry.archive_name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SubtreeWalker<'a> {
    root: &'a Root,
    dir: &'a Path,
}

impl<'a> SubtreeWalker<'a> {
    /// Creates a walker over `dir`, which must lie under `root`.
    #[must_use]
    pub fn new(root: &'a Root, dir: &'a Path) -> Self {
        Self { root, dir }
    }

    /// Returns an iterator over every entry below the directory.
    ///
    /// The directory itself is not yielded. Entries are sorted by file name
    /// within each directory so archives are reproducible.
    ///
    /// # Errors
    ///
    /// Entries may error if metadata cannot be read or an entry turns out
    /// not to lie under the root.
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkEntry>> + '_ {
        WalkDir::new(self.dir)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(move |entry| self.build_entry(&entry?))
    }

    fn build_entry(&self, entry: &walkdir::DirEntry) -> Result<WalkEntry> {
        let path = entry.path().to_path_buf();
        let file_type = entry.file_type();

        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };

        let size = if kind == EntryKind::File {
            entry.metadata().map_err(VaultError::from)?.len()
        } else {
            0
        };

        let relative = path
            .strip_prefix(self.root.as_path())
            .map_err(|_| VaultError::SecurityViolation {
                reason: "walked entry outside vault root".to_string(),
            })?;
        let archive_name = to_slash(relative);

        Ok(WalkEntry {
            path,
            archive_name,
            kind,
            size,
        })
    }
}

/// A walked entry with its root-relative name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Full filesystem path to the entry.
    pub path: PathBuf,

    /// Root-relative name with `/` separators.
    pub archive_name: String,

    /// What the entry is, without following symlinks.
    pub kind: EntryKind,

    /// Size in bytes (0 for anything but regular files).
    pub size: u64,
}

/// Type of a walked entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link (never followed).
    Symlink,
    /// FIFO, socket, device node.
    Other,
}
