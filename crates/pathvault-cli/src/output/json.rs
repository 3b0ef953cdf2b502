//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use pathvault_core::ArchiveReport;
use pathvault_core::IngestReport;
use pathvault_core::ResolvedPath;
use pathvault_core::SanitizedPath;
use pathvault_core::StoredFile;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use std::time::UNIX_EPOCH;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_sanitized(&self, results: &[(String, SanitizedPath)]) -> Result<()> {
        #[derive(Serialize)]
        struct SanitizedOutput<'a> {
            input: &'a str,
            sanitized: &'a str,
            empty: bool,
        }

        let data: Vec<_> = results
            .iter()
            .map(|(input, sanitized)| SanitizedOutput {
                input,
                sanitized: sanitized.as_str(),
                empty: sanitized.is_empty(),
            })
            .collect();

        Self::output(&JsonOutput::success("sanitize", data))
    }

    fn format_resolved(&self, input: &str, resolved: &ResolvedPath) -> Result<()> {
        #[derive(Serialize)]
        struct ResolvedOutput<'a> {
            input: &'a str,
            relative_path: String,
            absolute_path: String,
            is_root: bool,
        }

        let data = ResolvedOutput {
            input,
            relative_path: resolved.relative_display(),
            absolute_path: resolved.as_path().display().to_string(),
            is_root: resolved.is_root(),
        };

        Self::output(&JsonOutput::success("resolve", data))
    }

    fn format_ingest_result(&self, report: &IngestReport) -> Result<()> {
        #[derive(Serialize)]
        struct SavedOutput<'a> {
            name: &'a str,
            path: &'a str,
            size: u64,
            sha256: &'a str,
        }

        #[derive(Serialize)]
        struct RejectedOutput<'a> {
            name: &'a str,
            reason: &'static str,
            message: String,
        }

        #[derive(Serialize)]
        struct IngestOutput<'a> {
            saved_count: usize,
            rejected_count: usize,
            bytes_written: u64,
            saved: Vec<SavedOutput<'a>>,
            rejected: Vec<RejectedOutput<'a>>,
        }

        let data = IngestOutput {
            saved_count: report.saved_count(),
            rejected_count: report.rejected_count(),
            bytes_written: report.total_bytes(),
            saved: report
                .saved
                .iter()
                .map(|s| SavedOutput {
                    name: &s.original_name,
                    path: &s.relative_path,
                    size: s.size,
                    sha256: &s.sha256,
                })
                .collect(),
            rejected: report
                .rejected
                .iter()
                .map(|r| RejectedOutput {
                    name: &r.name,
                    reason: r.reason.code(),
                    message: r.reason.to_string(),
                })
                .collect(),
        };

        if report.is_complete() {
            Self::output(&JsonOutput::success("ingest", data))
        } else {
            let error = format!("{} upload(s) rejected", report.rejected_count());
            Self::output(&JsonOutput::partial("ingest", data, error))
        }
    }

    fn format_archive_result(&self, output_path: &Path, report: &ArchiveReport) -> Result<()> {
        #[derive(Serialize)]
        struct ArchiveOutput {
            output_path: String,
            files_added: usize,
            files_skipped: usize,
            bytes_written: u64,
            bytes_compressed: u64,
            compression_ratio: f64,
            duration_ms: u128,
            warnings: Vec<String>,
        }

        let data = ArchiveOutput {
            output_path: output_path.display().to_string(),
            files_added: report.files_added,
            files_skipped: report.files_skipped,
            bytes_written: report.bytes_written,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        };

        Self::output(&JsonOutput::success("archive", data))
    }

    fn format_listing(
        &self,
        files: &[StoredFile],
        _long: bool,
        _human_readable: bool,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct FileOutput<'a> {
            path: &'a str,
            size: u64,
            mime: &'a str,
            category: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            modified: Option<u64>,
        }

        #[derive(Serialize)]
        struct ListOutput<'a> {
            total_files: usize,
            total_size: u64,
            files: Vec<FileOutput<'a>>,
        }

        let data = ListOutput {
            total_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
            files: files
                .iter()
                .map(|f| FileOutput {
                    path: &f.relative_path,
                    size: f.size,
                    mime: &f.mime,
                    category: f.icon().as_str(),
                    modified: f
                        .modified
                        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                        .map(|d| d.as_secs()),
                })
                .collect(),
        };

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_deleted(&self, name: &str) -> Result<()> {
        #[derive(Serialize)]
        struct DeleteOutput<'a> {
            deleted: &'a str,
        }

        Self::output(&JsonOutput::success("delete", DeleteOutput { deleted: name }))
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_envelope() {
        let output = JsonOutput::success("list", vec![1, 2]);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["operation"], "list");
        assert_eq!(json["status"], "success");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_json_partial_envelope() {
        let output = JsonOutput::partial("ingest", (), "1 upload(s) rejected");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["status"], "partial");
        assert_eq!(json["error"], "1 upload(s) rejected");
    }
}
