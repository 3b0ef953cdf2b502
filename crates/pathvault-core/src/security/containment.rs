//! Root containment ("safe join").
//!
//! This is the single gate between caller-supplied names and the
//! filesystem. It does not trust its input to have been sanitized.

use crate::Result;
use crate::VaultError;
use crate::sanitize::sanitize;
use crate::types::ResolvedPath;
use crate::types::Root;
use std::io::ErrorKind;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Resolves a relative path against the root.
///
/// Equivalent to [`resolve_components`] with a single component. An empty
/// path resolves to the root itself.
///
/// # Errors
///
/// Returns `VaultError::PathTraversal` if the result is not the root or a
/// descendant of it, and `VaultError::Io` if probing an existing ancestor
/// fails for a reason other than absence.
///
/// # Examples
///
/// ```no_run
/// use pathvault_core::Root;
/// use pathvault_core::security::resolve;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = Root::new("/srv/uploads")?;
///
/// let resolved = resolve(&root, "a/b/c.txt")?;
/// assert!(resolved.as_path().ends_with("a/b/c.txt"));
///
/// assert!(resolve(&root, "../outside").is_err());
/// assert!(resolve(&root, "/etc/passwd").is_err());
/// # Ok(())
/// # }
/// ```
pub fn resolve<P: AsRef<Path>>(root: &Root, relative: P) -> Result<ResolvedPath> {
    resolve_components(root, std::iter::once(relative))
}

/// Joins one or more components onto the root and proves containment.
///
/// # Validation Steps
///
/// 1. Reject NUL bytes in any component
/// 2. Join with `Path::push` semantics (an absolute component replaces
///    everything before it, which is exactly the injection to catch)
/// 3. Normalize lexically: drop `.`, let `..` pop
/// 4. Component-wise prefix check against the canonical root
/// 5. Canonicalize the deepest existing ancestor and re-check, so a symlink
///    planted inside the root cannot redirect the target outside it
///
/// # Errors
///
/// Returns `VaultError::PathTraversal` on any containment failure.
pub fn resolve_components<I, P>(root: &Root, components: I) -> Result<ResolvedPath>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut joined = root.as_path().to_path_buf();
    let mut requested = PathBuf::new();

    for component in components {
        let component = component.as_ref();
        requested.push(component);
        if has_null_bytes(component) {
            return Err(traversal(requested));
        }
        joined.push(component);
    }

    let normalized = normalize_lexically(&joined);
    if !root.contains(&normalized) {
        return Err(traversal(requested));
    }

    verify_existing_ancestor(root, &normalized, &requested)?;

    let relative = normalized
        .strip_prefix(root.as_path())
        .map(Path::to_path_buf)
        .map_err(|_| traversal(requested.clone()))?;

    Ok(ResolvedPath::new_unchecked(normalized, relative))
}

/// Sanitizes and resolves a caller-supplied name for reading.
///
/// # Errors
///
/// - `VaultError::PathTraversal` if containment fails
/// - `VaultError::NotFound` if the target is not an existing regular file
pub fn resolve_for_read(root: &Root, relative: &str) -> Result<ResolvedPath> {
    let sanitized = sanitize(relative);
    let resolved = resolve(root, sanitized.as_path())?;

    match std::fs::metadata(resolved.as_path()) {
        Ok(metadata) if metadata.is_file() => Ok(resolved),
        Ok(_) => Err(VaultError::NotFound {
            path: sanitized.as_path().to_path_buf(),
        }),
        Err(e) if is_absent(&e) => Err(VaultError::NotFound {
            path: sanitized.as_path().to_path_buf(),
        }),
        Err(e) => Err(VaultError::Io(e)),
    }
}

/// Sanitizes and resolves a caller-supplied name for writing.
///
/// The target may or may not exist yet; missing parent directories are the
/// caller's to create.
///
/// # Errors
///
/// - `VaultError::PathTraversal` if containment fails
/// - `VaultError::NotAFile` if the name resolves to the root itself or to an
///   existing directory
pub fn resolve_for_write(root: &Root, relative: &str) -> Result<ResolvedPath> {
    let sanitized = sanitize(relative);
    let resolved = resolve(root, sanitized.as_path())?;

    if resolved.is_root() || resolved.as_path().is_dir() {
        return Err(VaultError::NotAFile {
            path: sanitized.as_path().to_path_buf(),
        });
    }
    Ok(resolved)
}

fn traversal(path: PathBuf) -> VaultError {
    tracing::warn!(
        target: "pathvault::security",
        path = %path.display(),
        "rejected path resolving outside the vault root"
    );
    VaultError::PathTraversal { path }
}

/// Lexical normalization. Never touches the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
        }
    }
    normalized
}

/// Walks up from `target` to the first path that exists and checks where it
/// really lives. Dangling symlinks are refused outright since writing
/// through one would create a file wherever it points.
fn verify_existing_ancestor(root: &Root, target: &Path, requested: &Path) -> Result<()> {
    let mut probe = Some(target);

    while let Some(current) = probe {
        match current.canonicalize() {
            Ok(canonical) => {
                if root.contains(&canonical) {
                    return Ok(());
                }
                return Err(traversal(requested.to_path_buf()));
            }
            Err(e) if is_absent(&e) => {
                if current
                    .symlink_metadata()
                    .is_ok_and(|m| m.file_type().is_symlink())
                {
                    return Err(traversal(requested.to_path_buf()));
                }
                probe = current.parent();
            }
            Err(e) => {
                return Err(VaultError::Io(std::io::Error::new(
                    e.kind(),
                    format!("failed to canonicalize {}: {e}", requested.display()),
                )));
            }
        }
    }

    Ok(())
}

fn is_absent(err: &std::io::Error) -> bool {
    matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

/// Checks if a path contains null bytes.
#[cfg(unix)]
fn has_null_bytes(path: &Path) -> bool {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().contains(&b'\0')
}

/// Checks if a path contains null bytes.
#[cfg(not(unix))]
fn has_null_bytes(path: &Path) -> bool {
    path.to_str().is_none_or(|s| s.contains('\0'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_root() -> (TempDir, Root) {
        let temp = TempDir::new().unwrap();
        let root = Root::new(temp.path()).unwrap();
        (temp, root)
    }

    #[test]
    fn test_resolve_simple() {
        let (_temp, root) = create_test_root();
        let resolved = resolve(&root, "a/b/c.txt").unwrap();
        assert_eq!(resolved.as_path(), root.as_path().join("a/b/c.txt"));
        assert_eq!(resolved.relative(), Path::new("a/b/c.txt"));
    }

    #[test]
    fn test_resolve_empty_is_root() {
        let (_temp, root) = create_test_root();
        let resolved = resolve(&root, "").unwrap();
        assert!(resolved.is_root());
        assert_eq!(resolved.as_path(), root.as_path());
    }

    #[test]
    fn test_resolve_parent_escape() {
        let (_temp, root) = create_test_root();
        assert!(matches!(
            resolve(&root, "../etc/passwd"),
            Err(VaultError::PathTraversal { .. })
        ));
        assert!(matches!(
            resolve(&root, "a/../../b"),
            Err(VaultError::PathTraversal { .. })
        ));
    }

    #[test]
    fn test_resolve_parent_inside_root_allowed() {
        let (_temp, root) = create_test_root();
        let resolved = resolve(&root, "a/../b.txt").unwrap();
        assert_eq!(resolved.relative(), Path::new("b.txt"));
    }

    #[test]
    fn test_resolve_dot_back_to_root() {
        let (_temp, root) = create_test_root();
        let resolved = resolve(&root, "a/..").unwrap();
        assert!(resolved.is_root());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_absolute_injection() {
        let (_temp, root) = create_test_root();
        assert!(matches!(
            resolve(&root, "/etc/passwd"),
            Err(VaultError::PathTraversal { .. })
        ));
        assert!(matches!(
            resolve_components(&root, ["photos", "/etc", "passwd"]),
            Err(VaultError::PathTraversal { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_absolute_inside_root_allowed() {
        let (_temp, root) = create_test_root();
        let inside = root.as_path().join("x.txt");
        let resolved = resolve(&root, &inside).unwrap();
        assert_eq!(resolved.relative(), Path::new("x.txt"));
    }

    #[test]
    fn test_resolve_sibling_prefix_not_confused() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("b")).unwrap();
        fs::create_dir(temp.path().join("bc")).unwrap();
        let root = Root::new(temp.path().join("b")).unwrap();

        assert!(matches!(
            resolve(&root, "../bc/file"),
            Err(VaultError::PathTraversal { .. })
        ));
    }

    #[test]
    fn test_resolve_multiple_components() {
        let (_temp, root) = create_test_root();
        let resolved = resolve_components(&root, ["photos", "vacation", "img1.jpg"]).unwrap();
        assert_eq!(resolved.relative_display(), "photos/vacation/img1.jpg");
    }

    #[test]
    fn test_resolve_null_byte() {
        let (_temp, root) = create_test_root();
        assert!(matches!(
            resolve(&root, "a\0b"),
            Err(VaultError::PathTraversal { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_symlinked_dir_escape() {
        let (temp, root) = create_test_root();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("escape")).unwrap();

        assert!(matches!(
            resolve(&root, "escape/new.txt"),
            Err(VaultError::PathTraversal { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_dangling_symlink_refused() {
        let (temp, root) = create_test_root();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("not-yet"),
            temp.path().join("dangling"),
        )
        .unwrap();

        assert!(matches!(
            resolve(&root, "dangling"),
            Err(VaultError::PathTraversal { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_internal_symlink_allowed() {
        let (temp, root) = create_test_root();
        fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("alias")).unwrap();

        assert!(resolve(&root, "alias/file.txt").is_ok());
    }

    #[test]
    fn test_resolve_below_existing_file() {
        let (temp, root) = create_test_root();
        fs::write(temp.path().join("file.txt"), "x").unwrap();
        // Walks past the ENOTDIR and finds the file itself inside root.
        assert!(resolve(&root, "file.txt/child").is_ok());
    }

    #[test]
    fn test_resolve_for_read_existing() {
        let (temp, root) = create_test_root();
        fs::create_dir_all(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/a.txt"), "hello").unwrap();

        let resolved = resolve_for_read(&root, "docs/a.txt").unwrap();
        assert_eq!(fs::read_to_string(resolved.as_path()).unwrap(), "hello");
    }

    #[test]
    fn test_resolve_for_read_missing() {
        let (_temp, root) = create_test_root();
        let err = resolve_for_read(&root, "nope.txt").unwrap_err();
        assert!(err.is_not_found());
        // Error carries the relative path only
        assert!(!err.to_string().contains(&root.as_path().display().to_string()));
    }

    #[test]
    fn test_resolve_for_read_directory_is_not_found() {
        let (temp, root) = create_test_root();
        fs::create_dir(temp.path().join("docs")).unwrap();
        assert!(resolve_for_read(&root, "docs").unwrap_err().is_not_found());
    }

    #[test]
    fn test_resolve_for_read_sanitizes_first() {
        let (temp, root) = create_test_root();
        fs::create_dir_all(temp.path().join("etc")).unwrap();
        fs::write(temp.path().join("etc/passwd"), "inside").unwrap();

        let resolved = resolve_for_read(&root, "../../etc/passwd").unwrap();
        assert!(root.contains(resolved.as_path()));
        assert_eq!(fs::read_to_string(resolved.as_path()).unwrap(), "inside");
    }

    #[test]
    fn test_resolve_for_write_root_refused() {
        let (_temp, root) = create_test_root();
        assert!(matches!(
            resolve_for_write(&root, ""),
            Err(VaultError::NotAFile { .. })
        ));
        assert!(matches!(
            resolve_for_write(&root, "../.."),
            Err(VaultError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_resolve_for_write_directory_refused() {
        let (temp, root) = create_test_root();
        fs::create_dir(temp.path().join("docs")).unwrap();
        assert!(matches!(
            resolve_for_write(&root, "docs"),
            Err(VaultError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_resolve_for_write_new_file() {
        let (_temp, root) = create_test_root();
        let resolved = resolve_for_write(&root, "new/dir/file.bin").unwrap();
        assert!(!resolved.as_path().exists());
        assert_eq!(resolved.relative_display(), "new/dir/file.bin");
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_lexically(Path::new("/../..")), PathBuf::from("/"));
    }
}
