//! Progress reporting hooks.

use std::path::Path;

/// Callback trait for progress reporting during archive building.
///
/// Requires `Send` so a callback can travel with the work onto a blocking
/// thread.
///
/// # Examples
///
/// ```
/// use pathvault_core::ProgressCallback;
/// use std::path::Path;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("Adding {}/{}: {}", current, total, path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, path: &Path) {
///         println!("Added: {}", path.display());
///     }
///
///     fn on_complete(&mut self) {
///         println!("Archive complete");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called when starting to add an entry.
    ///
    /// # Arguments
    ///
    /// * `path` - Archive name of the entry
    /// * `total` - Total number of entries that will be visited
    /// * `current` - Current entry number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called for each chunk of source bytes copied into the archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been completely processed.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once when the archive is finished.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
