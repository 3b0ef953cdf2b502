//! Error conversion utilities for CLI.
//!
//! Converts pathvault-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use pathvault_core::VaultError;
use std::path::Path;

/// Converts `VaultError` to a user-friendly anyhow error with context.
///
/// `subject` is the caller-supplied name the operation was about.
pub fn convert_vault_error(err: VaultError, subject: &str) -> anyhow::Error {
    match err {
        VaultError::PathTraversal { path } => {
            anyhow!(
                "Security violation: '{}' resolves outside the vault root\n\
                 HINT: Names must stay inside the vault. Remove '..' segments and symlinks \
                 that point elsewhere.",
                path.display()
            )
        }
        VaultError::SecurityViolation { reason } => {
            anyhow!("Security violation while handling '{subject}': {reason}")
        }
        VaultError::NotFound { path } => {
            anyhow!(
                "Not found in vault: '{}'\n\
                 HINT: Run 'pathvault list' to see stored files.",
                path.display()
            )
        }
        VaultError::NotAFile { path } => {
            anyhow!(
                "'{}' is a folder, not a file\n\
                 HINT: Use 'pathvault archive {}' to download a whole folder.",
                path.display(),
                path.display()
            )
        }
        VaultError::InvalidRoot { path, reason } => {
            anyhow!(
                "Invalid vault root '{}': {reason}\n\
                 HINT: Pass an existing directory with --root or PATHVAULT_ROOT.",
                path.display()
            )
        }
        VaultError::InvalidCompressionLevel { level } => {
            anyhow!("Invalid compression level {level}\nHINT: Use a level between 1 and 9.")
        }
        VaultError::Io(io_err) => {
            anyhow!("I/O error while processing '{subject}': {io_err}")
        }
        VaultError::Archive(_) => {
            anyhow::Error::from(err).context(format!("Error archiving '{subject}'"))
        }
    }
}

/// Adds vault context to a core result.
pub fn add_vault_context<T>(result: Result<T, VaultError>, subject: &str) -> anyhow::Result<T> {
    result.map_err(|e| convert_vault_error(e, subject))
}

/// Error for commands that need a vault root but got none.
pub fn missing_root() -> anyhow::Error {
    anyhow!(
        "No vault root configured\n\
         HINT: Pass --root <DIR> or set PATHVAULT_ROOT."
    )
}

/// Error for refusing to clobber an existing output file.
pub fn output_exists(path: &Path) -> anyhow::Error {
    anyhow!(
        "Output file '{}' already exists\n\
         HINT: Use --force to overwrite.",
        path.display()
    )
}

/// Error for an output file that would land inside the folder being archived.
pub fn output_inside_folder(path: &Path) -> anyhow::Error {
    anyhow!(
        "Output file '{}' is inside the archived folder\n\
         HINT: Write the archive outside the vault with -o/--output.",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_path_traversal_error() {
        let err = VaultError::PathTraversal {
            path: PathBuf::from("../../../etc/passwd"),
        };
        let converted = convert_vault_error(err, "../../../etc/passwd");
        let msg = format!("{converted:?}");
        assert!(msg.contains("outside the vault root"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_not_found_error() {
        let err = VaultError::NotFound {
            path: PathBuf::from("photos"),
        };
        let msg = format!("{:?}", convert_vault_error(err, "photos"));
        assert!(msg.contains("Not found in vault: 'photos'"));
        assert!(msg.contains("pathvault list"));
    }

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let converted = convert_vault_error(VaultError::Io(io_err), "a.txt");
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("a.txt"));
    }
}
