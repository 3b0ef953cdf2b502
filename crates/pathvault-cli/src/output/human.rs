//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use indicatif::BinaryBytes;
use indicatif::HumanCount;
use pathvault_core::ArchiveReport;
use pathvault_core::IconCategory;
use pathvault_core::IngestReport;
use pathvault_core::ResolvedPath;
use pathvault_core::SanitizedPath;
use pathvault_core::StoredFile;
use std::path::Path;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        BinaryBytes(bytes).to_string()
    }

    fn format_number(n: usize) -> String {
        HumanCount(n as u64).to_string()
    }

    /// Seconds since the epoch; good enough to sort by and stable in tests.
    fn format_modified(modified: Option<SystemTime>) -> String {
        modified
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map_or_else(|| "-".to_string(), |d| d.as_secs().to_string())
    }

    const fn category_char(category: IconCategory) -> char {
        match category {
            IconCategory::Image => 'i',
            IconCategory::Pdf => 'p',
            IconCategory::Archive => 'a',
            IconCategory::Document => 'd',
            IconCategory::Generic => '-',
        }
    }

    fn headline(&self, message: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(message);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_sanitized(&self, results: &[(String, SanitizedPath)]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for (input, sanitized) in results {
            let shown = if sanitized.is_empty() {
                "(empty)".to_string()
            } else {
                sanitized.to_string()
            };
            if self.verbose || results.len() > 1 {
                let _ = self.term.write_line(&format!("{input} -> {shown}"));
            } else {
                let _ = self.term.write_line(&shown);
            }
        }

        Ok(())
    }

    fn format_resolved(&self, input: &str, resolved: &ResolvedPath) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self
            .term
            .write_line(&resolved.as_path().display().to_string());
        if self.verbose {
            let _ = self.term.write_line(&format!("  Input:    {input}"));
            let _ = self
                .term
                .write_line(&format!("  Relative: {}", resolved.relative_display()));
        }

        Ok(())
    }

    fn format_ingest_result(&self, report: &IngestReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline("Upload complete");
        let _ = self.term.write_line(&format!(
            "  Files saved:      {}",
            Self::format_number(report.saved_count())
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.total_bytes())
        ));

        if self.verbose {
            for saved in &report.saved {
                let _ = self.term.write_line(&format!(
                    "    {}  {}",
                    &saved.sha256[..12.min(saved.sha256.len())],
                    saved.relative_path
                ));
            }
        }

        if !report.is_complete() {
            let _ = self.term.write_line(&format!(
                "  Files rejected:   {}",
                Self::format_number(report.rejected_count())
            ));
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Rejected:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Rejected:");
            }
            for rejected in &report.rejected {
                let _ = self
                    .term
                    .write_line(&format!("  - {}: {}", rejected.name, rejected.reason));
            }
        }

        Ok(())
    }

    fn format_archive_result(&self, output_path: &Path, report: &ArchiveReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&format!("Archive created: {}", output_path.display()));

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(report.files_added)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));

        if report.bytes_compressed > 0 {
            let _ = self.term.write_line(&format!(
                "  Compressed size:  {}",
                Self::format_size(report.bytes_compressed)
            ));
        }

        if report.files_skipped > 0 {
            let _ = self
                .term
                .write_line(&format!("  Files skipped:    {}", report.files_skipped));
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", report.duration));
        }

        if report.has_warnings() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in &report.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_listing(
        &self,
        files: &[StoredFile],
        long: bool,
        human_readable: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if !long {
            for file in files {
                let _ = self.term.write_line(&file.relative_path);
            }
            return Ok(());
        }

        for file in files {
            let size_str = if human_readable {
                Self::format_size(file.size)
            } else {
                file.size.to_string()
            };

            let _ = self.term.write_line(&format!(
                "{} {:>10}  {:>10}  {:<24} {}",
                Self::category_char(file.icon()),
                size_str,
                Self::format_modified(file.modified),
                file.mime,
                file.relative_path
            ));
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Total: {} files, {}",
            Self::format_number(files.len()),
            Self::format_size(files.iter().map(|f| f.size).sum())
        ));

        Ok(())
    }

    fn format_deleted(&self, name: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.headline(&format!("Deleted: {name}"));
        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
