//! Result of containment resolution.

use std::path::Path;
use std::path::PathBuf;

/// An absolute path proven to lie inside a [`crate::Root`].
///
/// # Security Properties
///
/// - Can ONLY be constructed by [`crate::security::resolve`]
/// - NO `From<PathBuf>` implementation
/// - Always the root itself or a descendant of it
/// - Never cached: resolve again for every request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath {
    absolute: PathBuf,
    relative: PathBuf,
}

impl ResolvedPath {
    /// Creates a `ResolvedPath` without validation (INTERNAL USE ONLY).
    ///
    /// The caller MUST have verified that `absolute` is `root.join(relative)`
    /// and that it lies inside the root.
    pub(crate) fn new_unchecked(absolute: PathBuf, relative: PathBuf) -> Self {
        Self { absolute, relative }
    }

    /// Returns the absolute filesystem path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.absolute
    }

    /// Returns the normalized path relative to the root.
    #[inline]
    #[must_use]
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Returns `true` if this resolves to the root itself.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.relative.as_os_str().is_empty()
    }

    /// Relative part with `/` separators, as stored in archives and listings.
    #[must_use]
    pub fn relative_display(&self) -> String {
        to_slash(&self.relative)
    }

    /// Converts into the absolute `PathBuf`.
    #[inline]
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.absolute
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.absolute
    }
}

/// Joins the normal components of `path` with `/`, regardless of platform.
pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
