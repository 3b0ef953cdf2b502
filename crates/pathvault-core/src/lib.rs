//! Confined file storage under a single trusted root.
//!
//! `pathvault-core` turns untrusted, client-supplied relative names into
//! paths that are guaranteed to stay inside one root directory, and builds
//! the storage operations of a folder-upload service on top of that
//! guarantee: batch ingestion, listing, deletion and ZIP download of whole
//! folders.
//!
//! Every name goes through two stages:
//!
//! 1. [`sanitize`] degrades hostile input. `..`, `.` and empty segments are
//!    dropped, reserved characters replaced. It never fails.
//! 2. [`security::resolve`] joins the result onto the [`Root`] and refuses
//!    anything that would land outside it, including escapes through
//!    symlinks already on disk.
//!
//! # Examples
//!
//! ```no_run
//! use pathvault_core::PathVault;
//! use pathvault_core::VaultConfig;
//! use pathvault_core::ingest::UploadItem;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let vault = PathVault::open("/srv/uploads", VaultConfig::default())?;
//!
//! let report = vault.ingest(vec![
//!     UploadItem::new("photos/vacation/img1.jpg", std::fs::read("img1.jpg")?),
//!     UploadItem::new("../../etc/passwd", b"nope".to_vec()),
//! ]);
//! println!("saved {}, rejected {}", report.saved_count(), report.rejected_count());
//!
//! let archive = vault.archive_subtree("photos")?;
//! std::fs::write(&archive.file_name, &archive.bytes)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod error;
pub mod ingest;
pub mod listing;
pub mod mime;
pub mod report;
pub mod sanitize;
pub mod security;
pub mod types;
pub mod vault;

pub use archive::ArchiveReport;
pub use archive::SubtreeArchive;
pub use config::VaultConfig;
pub use error::Result;
pub use error::VaultError;
pub use ingest::IngestReport;
pub use ingest::RejectReason;
pub use ingest::UploadItem;
pub use listing::StoredFile;
pub use mime::IconCategory;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use sanitize::sanitize;
pub use vault::PathVault;

pub use types::ResolvedPath;
pub use types::Root;
pub use types::SanitizedPath;
