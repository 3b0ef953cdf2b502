//! HTTP request handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::body::Body;
use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header;
use axum::response::Response;
use pathvault_core::IngestReport;
use pathvault_core::StoredFile;
use pathvault_core::UploadItem;
use pathvault_core::VaultError;
use pathvault_core::mime::guess_mime;
use serde::Serialize;
use std::sync::Arc;
use std::time::UNIX_EPOCH;
use tokio_util::io::ReaderStream;

/// Builds a `Content-Disposition: attachment` value.
///
/// Non-ASCII names get an RFC 5987 `filename*` parameter; the plain
/// `filename` fallback has control characters, quotes and backslashes
/// removed so the header cannot be split or broken out of.
pub fn content_disposition_header(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            '"' | '\\' => '_',
            _ => c,
        })
        .collect();

    if filename.is_ascii() && !filename.chars().any(|c| c.is_control() || c == '"' || c == '\\') {
        return format!("attachment; filename=\"{filename}\"");
    }

    let encoded = urlencoding::encode(filename);
    format!("attachment; filename=\"{sanitized}\"; filename*=UTF-8''{encoded}")
}

/// Last segment of a `/`-separated relative path.
fn base_name(relative: &str) -> &str {
    relative.rsplit('/').next().unwrap_or(relative)
}

/// One stored upload in the response.
#[derive(Debug, Serialize)]
pub struct SavedEntry {
    /// Name the client sent.
    pub name: String,
    /// Where it was stored, relative to the root.
    pub path: String,
    /// Bytes written.
    pub size: u64,
    /// Hex SHA-256 of the contents.
    pub sha256: String,
}

/// One refused upload in the response.
#[derive(Debug, Serialize)]
pub struct RejectedEntry {
    /// Name the client sent.
    pub name: String,
    /// Machine-readable reason.
    pub reason: &'static str,
    /// Human-readable reason.
    pub message: String,
}

/// Body returned by `POST /upload`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Number of files stored.
    pub saved_count: usize,
    /// Number of files refused.
    pub rejected_count: usize,
    /// Stored files, in request order.
    pub saved: Vec<SavedEntry>,
    /// Refused files, in request order.
    pub rejected: Vec<RejectedEntry>,
}

impl From<IngestReport> for UploadResponse {
    fn from(report: IngestReport) -> Self {
        Self {
            saved_count: report.saved_count(),
            rejected_count: report.rejected_count(),
            saved: report
                .saved
                .into_iter()
                .map(|s| SavedEntry {
                    name: s.original_name,
                    path: s.relative_path,
                    size: s.size,
                    sha256: s.sha256,
                })
                .collect(),
            rejected: report
                .rejected
                .into_iter()
                .map(|r| RejectedEntry {
                    message: r.reason.to_string(),
                    reason: r.reason.code(),
                    name: r.name,
                })
                .collect(),
        }
    }
}

/// One stored file in the listing.
#[derive(Debug, Serialize)]
pub struct FileEntry {
    /// Relative path, `/`-separated.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// Guessed content type.
    pub mime: String,
    /// Icon category for UIs.
    pub category: &'static str,
    /// Modification time in seconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<u64>,
}

impl From<StoredFile> for FileEntry {
    fn from(file: StoredFile) -> Self {
        Self {
            category: file.icon().as_str(),
            modified: file
                .modified
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs()),
            path: file.relative_path,
            size: file.size,
            mime: file.mime,
        }
    }
}

/// Body returned by `GET /files`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Number of files.
    pub total_files: usize,
    /// Sum of all file sizes.
    pub total_size: u64,
    /// Files sorted by path.
    pub files: Vec<FileEntry>,
}

/// POST /upload
///
/// Every multipart part carrying a filename is one upload item; the
/// filename is the item's relative path. Parts without a filename are
/// ignored.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut items = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let data = field.bytes().await.map_err(multipart_error)?;
        items.push(UploadItem::new(name, data.to_vec()));
    }

    if items.is_empty() {
        return Err(ApiError::bad_request("No files uploaded"));
    }

    let total = items.len();
    let vault = state.vault.clone();
    let report = tokio::task::spawn_blocking(move || vault.ingest(items)).await?;

    tracing::info!(
        saved = report.saved_count(),
        rejected = report.rejected_count(),
        "Upload of {total} file(s) processed"
    );

    Ok(Json(report.into()))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Upload exceeded request size limit");
        return ApiError::payload_too_large("Request body too large");
    }
    tracing::error!("Failed to read multipart field: {err}");
    ApiError::bad_request("Invalid multipart data")
}

/// GET /files
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListResponse>, ApiError> {
    let vault = state.vault.clone();
    let files = tokio::task::spawn_blocking(move || vault.list()).await??;

    Ok(Json(ListResponse {
        total_files: files.len(),
        total_size: files.iter().map(|f| f.size).sum(),
        files: files.into_iter().map(FileEntry::from).collect(),
    }))
}

/// GET /files/*path
///
/// The file is streamed; resolution and open happen on a blocking thread.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let vault = state.vault.clone();
    let (relative, file, size) = tokio::task::spawn_blocking(move || {
        let resolved = vault.resolve_for_read(&path)?;
        let file = std::fs::File::open(resolved.as_path())?;
        let size = file.metadata()?.len();
        Ok::<_, VaultError>((resolved.relative_display(), file, size))
    })
    .await??;

    tracing::debug!(path = %relative, size, "Serving download");

    let stream = ReaderStream::new(tokio::fs::File::from_std(file));

    Response::builder()
        .header(header::CONTENT_TYPE, guess_mime(&relative))
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(base_name(&relative)),
        )
        .header(header::CONTENT_LENGTH, size)
        .body(Body::from_stream(stream))
        .map_err(|e| {
            tracing::error!("Failed to build response: {e}");
            ApiError::internal("Failed to build response")
        })
}

/// DELETE /files/*path
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<StatusCode, ApiError> {
    let vault = state.vault.clone();
    let target = path.clone();
    tokio::task::spawn_blocking(move || vault.delete(&target)).await??;

    tracing::info!(path = %path, "Deleted file");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /archive
///
/// Archives the whole vault.
pub async fn archive_root(state: State<Arc<AppState>>) -> Result<Response, ApiError> {
    archive_folder(state, Path(String::new())).await
}

/// GET /archive/*path
pub async fn archive_folder(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let vault = state.vault.clone();
    let archive = tokio::task::spawn_blocking(move || vault.archive_subtree(&path)).await??;

    tracing::info!(
        file_name = %archive.file_name,
        files = archive.report.files_added,
        skipped = archive.report.files_skipped,
        "Built folder archive"
    );

    Response::builder()
        .header(header::CONTENT_TYPE, "application/zip")
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_header(&archive.file_name),
        )
        .header(header::CONTENT_LENGTH, archive.bytes.len())
        .body(Body::from(archive.bytes))
        .map_err(|e| {
            tracing::error!("Failed to build response: {e}");
            ApiError::internal("Failed to build response")
        })
}

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
