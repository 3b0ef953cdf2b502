//! Folder-to-ZIP packaging.
//!
//! Every regular file below the requested folder is stored deflated under
//! its path relative to the root, so the archive unpacks into the same
//! layout the vault holds. Symlinks and special files are skipped.

use crate::ProgressCallback;
use crate::Result;
use crate::VaultConfig;
use crate::VaultError;
use crate::archive::report::ArchiveReport;
use crate::archive::walker::EntryKind;
use crate::archive::walker::SubtreeWalker;
use crate::archive::walker::WalkEntry;
use crate::report::NoopProgress;
use crate::sanitize::sanitize;
use crate::security::resolve;
use crate::types::ResolvedPath;
use crate::types::Root;
use std::fs::File;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Copy buffer size for streaming file contents into the archive.
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// A fully buffered folder archive.
#[derive(Debug, Clone)]
pub struct SubtreeArchive {
    /// The complete ZIP bytes.
    pub bytes: Vec<u8>,

    /// Suggested download name (`<folder>.zip`).
    pub file_name: String,

    /// Build statistics.
    pub report: ArchiveReport,
}

/// Packages a folder under the root into an in-memory ZIP.
///
/// The folder name is sanitized and resolved here as well, so callers that
/// already did so pay only for a second cheap check.
///
/// Memory use is at least the compressed size of the subtree. For large
/// trees prefer [`write_subtree_archive`] with a file or other seekable
/// sink.
///
/// # Errors
///
/// - `VaultError::PathTraversal` if the folder resolves outside the root
/// - `VaultError::NotFound` if the folder is not an existing directory
/// - `VaultError::Io` / `VaultError::Archive` on read or write failure
///
/// # Examples
///
/// ```no_run
/// use pathvault_core::Root;
/// use pathvault_core::VaultConfig;
/// use pathvault_core::archive::archive_subtree;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = Root::new("/srv/uploads")?;
/// let archive = archive_subtree(&root, "photos", &VaultConfig::default())?;
/// std::fs::write(&archive.file_name, &archive.bytes)?;
/// # Ok(())
/// # }
/// ```
pub fn archive_subtree(root: &Root, folder: &str, config: &VaultConfig) -> Result<SubtreeArchive> {
    let dir = resolve_folder(root, folder)?;
    let file_name = archive_file_name(root, &dir);

    let mut cursor = Cursor::new(Vec::new());
    let report = write_resolved(root, &dir, &mut cursor, config, &mut NoopProgress)?;

    Ok(SubtreeArchive {
        bytes: cursor.into_inner(),
        file_name,
        report,
    })
}

/// Streams a folder archive into any seekable writer.
///
/// # Errors
///
/// Same as [`archive_subtree`].
pub fn write_subtree_archive<W: Write + Seek>(
    root: &Root,
    folder: &str,
    writer: W,
    config: &VaultConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ArchiveReport> {
    let dir = resolve_folder(root, folder)?;
    write_resolved(root, &dir, writer, config, progress)
}

/// Resolves a folder name and checks it is a real directory.
///
/// A symlink at the folder position is treated as missing.
///
/// # Errors
///
/// `VaultError::PathTraversal` or `VaultError::NotFound`.
pub fn resolve_folder(root: &Root, folder: &str) -> Result<ResolvedPath> {
    let sanitized = sanitize(folder);
    let resolved = resolve(root, sanitized.as_path())?;

    match std::fs::symlink_metadata(resolved.as_path()) {
        Ok(metadata) if metadata.is_dir() => Ok(resolved),
        Ok(_) => Err(VaultError::NotFound {
            path: sanitized.as_path().to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(VaultError::NotFound {
            path: sanitized.as_path().to_path_buf(),
        }),
        Err(e) => Err(VaultError::Io(e)),
    }
}

/// Suggested archive name: the folder's base name plus `.zip`.
///
/// The root itself is named after the root directory, or `archive.zip`
/// when it has no usable name.
#[must_use]
pub fn archive_file_name(root: &Root, dir: &ResolvedPath) -> String {
    let base = if dir.is_root() {
        root.name()
    } else {
        dir.relative().file_name().and_then(|n| n.to_str())
    };
    match base {
        Some(name) if !name.is_empty() => format!("{name}.zip"),
        _ => "archive.zip".to_string(),
    }
}

fn write_resolved<W: Write + Seek>(
    root: &Root,
    dir: &ResolvedPath,
    writer: W,
    config: &VaultConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ArchiveReport> {
    config.validate()?;

    let start = std::time::Instant::now();
    let mut report = ArchiveReport::default();
    let mut zip = ZipWriter::new(writer);

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(i64::from(config.effective_compression_level())));

    // Single pass over the tree, so progress knows the total up front
    let entries = SubtreeWalker::new(root, dir.as_path())
        .walk()
        .collect::<Result<Vec<_>>>()?;
    let total_entries = entries.len();

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for (idx, entry) in entries.iter().enumerate() {
        let name = Path::new(&entry.archive_name);
        progress.on_entry_start(name, total_entries, idx + 1);

        match entry.kind {
            EntryKind::File => {
                add_file(&mut zip, entry, options, &mut report, progress, &mut buffer)?;
            }
            // Folder structure is implied by file names
            EntryKind::Directory => {}
            EntryKind::Symlink => {
                report.files_skipped += 1;
                report.add_warning(format!("Skipped symlink: {}", entry.archive_name));
            }
            EntryKind::Other => {
                report.files_skipped += 1;
                report.add_warning(format!("Skipped special file: {}", entry.archive_name));
            }
        }

        progress.on_entry_complete(name);
    }

    let mut inner = zip.finish()?;
    report.bytes_compressed = inner.seek(SeekFrom::End(0))?;
    report.duration = start.elapsed();

    progress.on_complete();

    tracing::debug!(
        folder = %dir.relative_display(),
        files = report.files_added,
        skipped = report.files_skipped,
        bytes = report.bytes_compressed,
        "built folder archive"
    );

    Ok(report)
}

fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &WalkEntry,
    options: SimpleFileOptions,
    report: &mut ArchiveReport,
    progress: &mut dyn ProgressCallback,
    buffer: &mut [u8],
) -> Result<()> {
    let mut file = File::open(&entry.path)?;
    let options = options.large_file(entry.size >= u64::from(u32::MAX));

    zip.start_file(entry.archive_name.as_str(), options)?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = file.read(buffer)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
        progress.on_bytes_written(bytes_read as u64);
    }

    report.files_added += 1;
    report.bytes_written += bytes_written;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_root() -> (TempDir, Root) {
        let temp = TempDir::new().unwrap();
        let root = Root::new(temp.path()).unwrap();
        (temp, root)
    }

    fn read_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut out = Vec::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            out.push((entry.name().to_string(), data));
        }
        out
    }

    #[test]
    fn test_archive_names_relative_to_root() {
        let (temp, root) = create_test_root();
        fs::create_dir_all(temp.path().join("photos/vacation")).unwrap();
        fs::write(temp.path().join("photos/vacation/img1.jpg"), "one").unwrap();
        fs::write(temp.path().join("photos/img2.jpg"), "two").unwrap();
        fs::write(temp.path().join("unrelated.txt"), "nope").unwrap();

        let archive = archive_subtree(&root, "photos", &VaultConfig::default()).unwrap();

        assert_eq!(archive.file_name, "photos.zip");
        assert_eq!(archive.report.files_added, 2);
        let entries = read_entries(&archive.bytes);
        assert_eq!(
            entries,
            vec![
                ("photos/img2.jpg".to_string(), b"two".to_vec()),
                ("photos/vacation/img1.jpg".to_string(), b"one".to_vec()),
            ]
        );
    }

    #[test]
    fn test_archive_nested_folder_name() {
        let (temp, root) = create_test_root();
        fs::create_dir_all(temp.path().join("a/b")).unwrap();
        fs::write(temp.path().join("a/b/c.txt"), "c").unwrap();

        let archive = archive_subtree(&root, "a/b", &VaultConfig::default()).unwrap();
        assert_eq!(archive.file_name, "b.zip");
        assert_eq!(read_entries(&archive.bytes)[0].0, "a/b/c.txt");
    }

    #[test]
    fn test_archive_uses_deflate() {
        let (temp, root) = create_test_root();
        fs::create_dir(temp.path().join("logs")).unwrap();
        fs::write(temp.path().join("logs/big.log"), "a".repeat(10_000)).unwrap();

        let archive = archive_subtree(&root, "logs", &VaultConfig::default()).unwrap();
        let mut zip = zip::ZipArchive::new(Cursor::new(&archive.bytes)).unwrap();
        let entry = zip.by_index(0).unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
        assert!(entry.compressed_size() < entry.size());
        assert!(archive.report.compression_ratio() > 1.0);
    }

    #[test]
    fn test_archive_missing_folder() {
        let (_temp, root) = create_test_root();
        let err = archive_subtree(&root, "missing", &VaultConfig::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_archive_file_is_not_a_folder() {
        let (temp, root) = create_test_root();
        fs::write(temp.path().join("file.txt"), "x").unwrap();
        let err = archive_subtree(&root, "file.txt", &VaultConfig::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_archive_traversal_degrades_into_root() {
        let (temp, root) = create_test_root();
        fs::create_dir(temp.path().join("etc")).unwrap();
        fs::write(temp.path().join("etc/inside.txt"), "in").unwrap();

        let archive = archive_subtree(&root, "../../etc", &VaultConfig::default()).unwrap();
        assert_eq!(read_entries(&archive.bytes)[0].0, "etc/inside.txt");
    }

    #[test]
    fn test_archive_whole_root() {
        let (temp, root) = create_test_root();
        fs::write(temp.path().join("top.txt"), "t").unwrap();

        let archive = archive_subtree(&root, "", &VaultConfig::default()).unwrap();
        assert!(archive.file_name.ends_with(".zip"));
        assert_eq!(read_entries(&archive.bytes)[0].0, "top.txt");
    }

    #[test]
    fn test_archive_empty_folder() {
        let (temp, root) = create_test_root();
        fs::create_dir(temp.path().join("empty")).unwrap();

        let archive = archive_subtree(&root, "empty", &VaultConfig::default()).unwrap();
        assert_eq!(archive.report.files_added, 0);
        assert!(read_entries(&archive.bytes).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_archive_skips_symlinks() {
        let (temp, root) = create_test_root();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.txt"), "secret").unwrap();
        fs::create_dir(temp.path().join("up")).unwrap();
        fs::write(temp.path().join("up/real.txt"), "real").unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("up/dir-link")).unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("secret.txt"),
            temp.path().join("up/file-link"),
        )
        .unwrap();

        let archive = archive_subtree(&root, "up", &VaultConfig::default()).unwrap();

        assert_eq!(archive.report.files_added, 1);
        assert_eq!(archive.report.files_skipped, 2);
        assert!(archive.report.warnings[0].contains("Skipped symlink"));
        let entries = read_entries(&archive.bytes);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "up/real.txt");
    }

    #[cfg(unix)]
    #[test]
    fn test_archive_symlinked_folder_is_not_found() {
        let (temp, root) = create_test_root();
        fs::create_dir(temp.path().join("real")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("alias")).unwrap();

        let err = archive_subtree(&root, "alias", &VaultConfig::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_subtree_archive_with_progress() {
        #[derive(Default)]
        struct Recorder {
            started: Vec<String>,
            bytes: u64,
            completed: bool,
        }

        impl ProgressCallback for Recorder {
            fn on_entry_start(&mut self, path: &Path, _total: usize, _current: usize) {
                self.started.push(path.to_string_lossy().to_string());
            }
            fn on_bytes_written(&mut self, bytes: u64) {
                self.bytes += bytes;
            }
            fn on_entry_complete(&mut self, _path: &Path) {}
            fn on_complete(&mut self) {
                self.completed = true;
            }
        }

        let (temp, root) = create_test_root();
        fs::create_dir(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/a.txt"), "12345").unwrap();
        let out_dir = TempDir::new().unwrap();
        let out = File::create(out_dir.path().join("docs.zip")).unwrap();

        let mut progress = Recorder::default();
        let report =
            write_subtree_archive(&root, "docs", out, &VaultConfig::default(), &mut progress)
                .unwrap();

        assert_eq!(report.files_added, 1);
        assert_eq!(report.bytes_written, 5);
        assert!(report.bytes_compressed > 0);
        assert_eq!(progress.started, vec!["docs/a.txt".to_string()]);
        assert_eq!(progress.bytes, 5);
        assert!(progress.completed);
    }
}
