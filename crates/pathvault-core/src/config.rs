//! Vault policy configuration.

use crate::Result;
use crate::VaultError;

/// Extensions accepted by the stock file-vault deployment.
///
/// Compound suffixes (`tar.gz`) are matched against the end of the name, so
/// `backup.tar.gz` is accepted even though its last suffix is just `gz`.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    // images
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tiff",
    // documents
    "pdf", "txt", "md", "rtf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
    // archives
    "zip", "rar", "7z", "tar", "gz", "bz2", "xz", "tar.gz", "tar.bz2", "tar.xz",
];

/// Policy applied to uploads and archives.
///
/// # Performance Note
///
/// Contains a heap-allocated extension list. Pass by reference, or wrap in
/// `Arc` when shared across request workers.
///
/// # Examples
///
/// ```
/// use pathvault_core::VaultConfig;
///
/// // Accept everything up to 50 MiB per file
/// let config = VaultConfig::default();
///
/// // Only documents, at most 1 MiB each
/// let strict = VaultConfig::default()
///     .with_allowed_extensions(vec!["pdf".into(), "txt".into()])
///     .with_max_file_size(1024 * 1024);
/// assert!(strict.is_name_allowed("notes.TXT"));
/// assert!(!strict.is_name_allowed("run.exe"));
/// ```
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Maximum size of a single stored file in bytes.
    pub max_file_size: u64,

    /// Accepted file suffixes without the leading dot (empty = allow all).
    pub allowed_extensions: Vec<String>,

    /// Store zero-length uploads instead of rejecting them.
    pub allow_empty_files: bool,

    /// Maximum number of segments in a stored relative path.
    pub max_path_depth: usize,

    /// Deflate level for folder archives (1-9). `None` uses 6.
    pub compression_level: Option<u8>,
}

impl Default for VaultConfig {
    /// Default values:
    /// - `max_file_size`: 50 MiB
    /// - `allowed_extensions`: empty (allow all)
    /// - `allow_empty_files`: false
    /// - `max_path_depth`: 32
    /// - `compression_level`: `Some(6)`
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            allowed_extensions: Vec::new(),
            allow_empty_files: false,
            max_path_depth: 32,
            compression_level: Some(6),
        }
    }
}

impl VaultConfig {
    /// Creates a new `VaultConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum single file size.
    #[must_use]
    pub fn with_max_file_size(mut self, max_size: u64) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Sets the accepted extensions.
    #[must_use]
    pub fn with_allowed_extensions(mut self, extensions: Vec<String>) -> Self {
        self.allowed_extensions = extensions;
        self
    }

    /// Sets whether zero-length uploads are stored.
    #[must_use]
    pub fn with_allow_empty_files(mut self, allow: bool) -> Self {
        self.allow_empty_files = allow;
        self
    }

    /// Sets the maximum path depth.
    #[must_use]
    pub fn with_max_path_depth(mut self, depth: usize) -> Self {
        self.max_path_depth = depth;
        self
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the compression level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!((1..=9).contains(&level), "compression level must be 1-9");
        self.compression_level = Some(level);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level is set but not in range 1-9
    /// - `max_path_depth` is zero
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(VaultError::InvalidCompressionLevel { level });
        }
        if self.max_path_depth == 0 {
            return Err(VaultError::SecurityViolation {
                reason: "max_path_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Returns whether a file name ends in an accepted extension.
    ///
    /// Matching is case-insensitive and works on the whole suffix, so
    /// compound entries such as `tar.gz` are honoured. A name without any
    /// dot is only accepted when the allow-list is empty.
    #[must_use]
    pub fn is_name_allowed(&self, name: &str) -> bool {
        if self.allowed_extensions.is_empty() {
            return true;
        }
        let lower = name.to_ascii_lowercase();
        if !lower.contains('.') {
            return false;
        }
        self.allowed_extensions.iter().any(|ext| {
            let ext = ext.trim_start_matches('.').to_ascii_lowercase();
            lower
                .strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }

    /// Effective deflate level.
    #[must_use]
    pub fn effective_compression_level(&self) -> u8 {
        self.compression_level.unwrap_or(6)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::field_reassign_with_default)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VaultConfig::default();
        assert_eq!(config.max_file_size, 50 * 1024 * 1024);
        assert!(config.allowed_extensions.is_empty());
        assert!(!config.allow_empty_files);
        assert_eq!(config.effective_compression_level(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_allow_list_accepts_everything() {
        let config = VaultConfig::default();
        assert!(config.is_name_allowed("Makefile"));
        assert!(config.is_name_allowed("a.exe"));
    }

    #[test]
    fn test_allow_list_case_insensitive() {
        let config = VaultConfig::default().with_allowed_extensions(vec!["PDF".into()]);
        assert!(config.is_name_allowed("report.pdf"));
        assert!(config.is_name_allowed("REPORT.PDF"));
        assert!(!config.is_name_allowed("report.pdf.exe"));
        assert!(!config.is_name_allowed("pdf"));
    }

    #[test]
    fn test_compound_extensions() {
        let config = VaultConfig::default().with_allowed_extensions(
            DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        );
        assert!(config.is_name_allowed("backup.tar.gz"));
        assert!(config.is_name_allowed("photo.JPG"));
        assert!(!config.is_name_allowed("script.sh"));
        // "xgz" must not match the "gz" entry
        assert!(!config.is_name_allowed("file.xgz"));
    }

    #[test]
    fn test_leading_dot_in_allow_list() {
        let config = VaultConfig::default().with_allowed_extensions(vec![".txt".into()]);
        assert!(config.is_name_allowed("notes.txt"));
    }

    #[test]
    fn test_validate_rejects_bad_level() {
        let mut config = VaultConfig::default();
        config.compression_level = Some(0);
        assert!(matches!(
            config.validate(),
            Err(VaultError::InvalidCompressionLevel { level: 0 })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let config = VaultConfig::default().with_max_path_depth(0);
        assert!(config.validate().is_err());
    }

    #[test]
    #[should_panic(expected = "compression level must be 1-9")]
    fn test_with_compression_level_panics() {
        let _ = VaultConfig::default().with_compression_level(10);
    }
}
