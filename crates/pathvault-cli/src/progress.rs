//! Terminal progress for archive builds.

use console::Term;
use indicatif::BinaryBytes;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use pathvault_core::ProgressCallback;
use std::path::Path;

/// Entry-counting progress bar fed by the archiver.
///
/// The running byte total is shown in the message since the archiver only
/// knows the entry count up front.
pub struct CliProgress {
    bar: ProgressBar,
    label: String,
    bytes_written: u64,
}

impl CliProgress {
    /// `label` prefixes the message, e.g. `"Archiving"`.
    #[must_use]
    pub fn new(label: &str) -> Self {
        // Archiving 1.20 MiB [████████░░░░] 42/100 files (12s)
        let style = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");

        let bar = ProgressBar::new(0).with_style(style);
        bar.set_message(label.to_string());

        Self {
            bar,
            label: label.to_string(),
            bytes_written: 0,
        }
    }

    /// Only draw when stdout is a terminal.
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, _path: &Path, total: usize, _current: usize) {
        let total = total as u64;
        if self.bar.length() != Some(total) {
            self.bar.set_length(total);
        }
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar
            .set_message(format!("{} {}", self.label, BinaryBytes(self.bytes_written)));
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_tracks_entries_and_bytes() {
        let mut progress = CliProgress::new("Archiving");

        progress.on_entry_start(Path::new("photos/a.jpg"), 3, 1);
        progress.on_bytes_written(1024);
        progress.on_entry_complete(Path::new("photos/a.jpg"));
        progress.on_entry_start(Path::new("photos/b.jpg"), 3, 2);
        progress.on_bytes_written(512);
        progress.on_entry_complete(Path::new("photos/b.jpg"));

        assert_eq!(progress.bytes_written, 1536);
        assert_eq!(progress.bar.length(), Some(3));
        assert_eq!(progress.bar.position(), 2);
        assert_eq!(progress.bar.message(), "Archiving 1.50 KiB");
    }
}
