//! Validated vault root directory.

use crate::Result;
use crate::VaultError;
use std::path::Path;
use std::path::PathBuf;

/// The single trusted directory every vault operation is confined to.
///
/// Constructed once from trusted configuration. The stored path is
/// canonical (absolute, symlinks resolved), so containment checks compare
/// like with like.
///
/// # Security Considerations
///
/// **TOCTOU Warning**: there is a window between the existence check and
/// canonicalization in which the directory could be swapped for a symlink.
/// Resolution re-canonicalizes the deepest existing ancestor of every
/// target, which narrows but does not close that window.
///
/// # Examples
///
/// ```no_run
/// use pathvault_core::Root;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = Root::new("/srv/uploads")?;
/// println!("Serving from {}", root.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root(PathBuf);

impl Root {
    /// Creates a new `Root` after validating the path.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidRoot` if the path does not exist, is not
    /// a directory, or cannot be canonicalized.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let metadata = std::fs::metadata(&path).map_err(|e| VaultError::InvalidRoot {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if !metadata.is_dir() {
            return Err(VaultError::InvalidRoot {
                path,
                reason: "not a directory".to_string(),
            });
        }

        let canonical = path.canonicalize().map_err(|e| VaultError::InvalidRoot {
            path: path.clone(),
            reason: format!("failed to canonicalize: {e}"),
        })?;

        Ok(Self(canonical))
    }

    /// Creates the directory (and parents) if missing, then validates it.
    ///
    /// Mirrors the usual server bootstrap of "make sure the upload folder
    /// exists".
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or validated.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        std::fs::create_dir_all(&path)?;
        Self::new(path)
    }

    /// Returns the canonical root path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `true` if `path` is the root itself or lies beneath it.
    ///
    /// Comparison is component-wise, so a root of `/a/b` never matches
    /// `/a/bc`.
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.0)
    }

    /// Base name of the root directory, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.file_name().and_then(|n| n.to_str())
    }
}

impl AsRef<Path> for Root {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_root_valid_directory() {
        let temp = TempDir::new().unwrap();
        let root = Root::new(temp.path()).unwrap();
        assert!(root.as_path().is_absolute());
        assert_eq!(root.as_path(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_root_missing() {
        let temp = TempDir::new().unwrap();
        let result = Root::new(temp.path().join("missing"));
        assert!(matches!(result, Err(VaultError::InvalidRoot { .. })));
    }

    #[test]
    fn test_root_is_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let result = Root::new(&file);
        assert!(matches!(result, Err(VaultError::InvalidRoot { .. })));
    }

    #[test]
    fn test_root_create_missing() {
        let temp = TempDir::new().unwrap();
        let root = Root::create(temp.path().join("uploads/nested")).unwrap();
        assert!(root.as_path().is_dir());
        assert_eq!(root.name(), Some("nested"));
    }

    #[test]
    fn test_contains_is_component_wise() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("b")).unwrap();
        let root = Root::new(temp.path().join("b")).unwrap();
        let base = root.as_path().to_path_buf();

        assert!(root.contains(&base));
        assert!(root.contains(&base.join("file")));
        let sibling = base.with_file_name("bc");
        assert!(!root.contains(&sibling));
    }

    #[test]
    fn test_relative_root_is_canonicalized() {
        let temp = TempDir::new().unwrap();
        let dotted = temp.path().join(".");
        let root = Root::new(dotted).unwrap();
        assert_eq!(root.as_path(), temp.path().canonicalize().unwrap());
    }
}
