//! Archive command implementation

use crate::cli::ArchiveArgs;
use crate::commands::open_vault;
use crate::error::add_vault_context;
use crate::error::output_exists;
use crate::error::output_inside_folder;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use pathvault_core::NoopProgress;
use pathvault_core::VaultConfig;
use pathvault_core::archive::archive_file_name;
use pathvault_core::archive::resolve_folder;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::path::PathBuf;

pub fn execute(
    args: &ArchiveArgs,
    root: Option<&Path>,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let mut config = VaultConfig::default();
    if let Some(level) = args.compression_level {
        config = config.with_compression_level(level);
    }
    let vault = open_vault(root, config)?;

    let dir = add_vault_context(resolve_folder(vault.root(), &args.folder), &args.folder)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| archive_file_name(vault.root(), &dir).into());

    if lands_inside(&output, dir.as_path()) {
        return Err(output_inside_folder(&output));
    }

    if output.exists() && !args.force {
        return Err(output_exists(&output));
    }

    let file = File::create(&output)
        .with_context(|| format!("Failed to create output file {}", output.display()))?;
    let writer = BufWriter::new(file);

    let result = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Archiving");
        vault.write_subtree_archive(&args.folder, writer, &mut progress)
    } else {
        vault.write_subtree_archive(&args.folder, writer, &mut NoopProgress)
    };

    let report = match add_vault_context(result, &args.folder) {
        Ok(report) => report,
        Err(e) => {
            let _ = std::fs::remove_file(&output);
            return Err(e);
        }
    };

    formatter.format_archive_result(&output, &report)?;

    Ok(())
}

/// Whether `output` would be created somewhere under `dir`.
///
/// `dir` is canonical; the output's parent is canonicalized so relative
/// names and symlinked working directories compare correctly.
fn lands_inside(output: &Path, dir: &Path) -> bool {
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let Ok(parent) = parent.canonicalize() else {
        return false;
    };
    parent.starts_with(dir)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lands_inside() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().canonicalize().unwrap();
        std::fs::create_dir(dir.join("sub")).unwrap();

        assert!(lands_inside(&dir.join("out.zip"), &dir));
        assert!(lands_inside(&dir.join("sub/out.zip"), &dir));
        assert!(!lands_inside(&dir.join("sub/out.zip"), &dir.join("other")));
        assert!(!lands_inside(&dir.join("missing/out.zip"), &dir));
    }
}
