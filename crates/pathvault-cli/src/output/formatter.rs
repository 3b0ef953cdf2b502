//! Output formatter trait for CLI results.

use anyhow::Result;
use pathvault_core::ArchiveReport;
use pathvault_core::IngestReport;
use pathvault_core::ResolvedPath;
use pathvault_core::SanitizedPath;
use pathvault_core::StoredFile;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format sanitized names, paired with their inputs
    fn format_sanitized(&self, results: &[(String, SanitizedPath)]) -> Result<()>;

    /// Format a resolved location
    fn format_resolved(&self, input: &str, resolved: &ResolvedPath) -> Result<()>;

    /// Format batch upload result
    fn format_ingest_result(&self, report: &IngestReport) -> Result<()>;

    /// Format archive build result
    fn format_archive_result(&self, output_path: &Path, report: &ArchiveReport) -> Result<()>;

    /// Format vault listing
    fn format_listing(&self, files: &[StoredFile], long: bool, human_readable: bool)
    -> Result<()>;

    /// Format deletion result
    fn format_deleted(&self, name: &str) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Partial,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn partial(operation: impl Into<String>, data: T, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Partial,
            data: Some(data),
            error: Some(error.into()),
        }
    }
}
