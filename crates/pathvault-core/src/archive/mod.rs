//! Subtree archiving.
//!
//! Packs a folder under the vault root into a single deflate-compressed
//! ZIP, either buffered in memory or streamed into a seekable writer.

pub mod report;
pub mod walker;
pub mod zip;

pub use self::report::ArchiveReport;
pub use self::walker::EntryKind;
pub use self::walker::SubtreeWalker;
pub use self::walker::WalkEntry;
pub use self::zip::SubtreeArchive;
pub use self::zip::archive_file_name;
pub use self::zip::archive_subtree;
pub use self::zip::resolve_folder;
pub use self::zip::write_subtree_archive;
