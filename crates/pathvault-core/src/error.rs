//! Error types for vault operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `VaultError`.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Errors that can occur while resolving, archiving or storing files.
///
/// Paths carried by the variants are always the caller-supplied relative
/// path, never the resolved absolute location under the root, so the
/// `Display` output is safe to echo back to a client.
#[derive(Error, Debug)]
pub enum VaultError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured root is missing or is not a directory.
    #[error("invalid vault root {path}: {reason}")]
    InvalidRoot {
        /// The configured root path.
        path: PathBuf,
        /// Why the root was refused.
        reason: String,
    },

    /// The resolved path would leave the root.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The relative path that attempted to escape.
        path: PathBuf,
    },

    /// The requested file or folder does not exist under the root.
    #[error("not found: {path}")]
    NotFound {
        /// The relative path that was requested.
        path: PathBuf,
    },

    /// The target exists but is a directory (or the root itself).
    #[error("not a regular file: {path}")]
    NotAFile {
        /// The relative path that was requested.
        path: PathBuf,
    },

    /// Operation not permitted by the vault policy.
    #[error("operation denied by security policy: {reason}")]
    SecurityViolation {
        /// Reason for the violation.
        reason: String,
    },

    /// Compression level outside 1-9.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// The zip writer failed.
    #[error("archive error: {0}")]
    Archive(String),
}

impl VaultError {
    /// Returns `true` if this error represents a security violation.
    ///
    /// Callers should log these as security-relevant events.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathvault_core::VaultError;
    /// use std::path::PathBuf;
    ///
    /// let err = VaultError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = VaultError::NotFound {
    ///     path: PathBuf::from("missing.txt"),
    /// };
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. } | Self::SecurityViolation { .. }
        )
    }

    /// Returns `true` if the requested resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns a context string for this error, if available.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidRoot { reason, .. } | Self::SecurityViolation { reason } => Some(reason),
            Self::Archive(msg) => Some(msg),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for VaultError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::Archive(other.to_string()),
        }
    }
}

impl From<walkdir::Error> for VaultError {
    fn from(err: walkdir::Error) -> Self {
        let message = err.to_string();
        err.into_io_error()
            .map_or_else(|| Self::Io(std::io::Error::other(message)), Self::Io)
    }
}
