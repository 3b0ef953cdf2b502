//! Archive build reporting.

use std::time::Duration;

/// Report of a subtree archive build.
///
/// # Examples
///
/// ```
/// use pathvault_core::archive::ArchiveReport;
///
/// let mut report = ArchiveReport::default();
/// report.files_added = 10;
/// report.bytes_written = 1024;
/// report.bytes_compressed = 512;
///
/// assert_eq!(report.compression_ratio(), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    /// Number of regular files added.
    pub files_added: usize,

    /// Number of entries skipped (symlinks, special files).
    pub files_skipped: usize,

    /// Total source bytes copied into the archive (uncompressed).
    pub bytes_written: u64,

    /// Size of the finished archive in bytes.
    pub bytes_compressed: u64,

    /// Duration of the build.
    pub duration: Duration,

    /// Warnings generated during the build.
    pub warnings: Vec<String>,
}

impl ArchiveReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_ratio_edges() {
        let mut report = ArchiveReport::new();
        assert!((report.compression_ratio() - 0.0).abs() < f64::EPSILON);

        report.bytes_written = 1000;
        report.bytes_compressed = 1000;
        assert!((report.compression_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_warnings() {
        let mut report = ArchiveReport::new();
        assert!(!report.has_warnings());
        report.add_warning("Skipped symlink: photos/link");
        assert!(report.has_warnings());
    }
}
