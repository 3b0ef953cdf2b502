//! Ingest command implementation.
//!
//! Local sources are turned into the same `(name, bytes)` batch an HTTP
//! folder upload produces: a directory `photos` contributes entries named
//! `photos/...`, a plain file contributes its own file name.

use crate::cli::IngestArgs;
use crate::commands::open_vault;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use pathvault_core::UploadItem;
use pathvault_core::VaultConfig;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

pub fn execute(
    args: &IngestArgs,
    root: Option<&Path>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let mut config = VaultConfig::default().with_allow_empty_files(args.allow_empty);
    if let Some(max) = args.max_file_size {
        config = config.with_max_file_size(max);
    }
    if !args.allowed_extensions.is_empty() {
        config = config.with_allowed_extensions(args.allowed_extensions.clone());
    }

    let vault = open_vault(root, config)?;

    let mut items = Vec::new();
    for source in &args.sources {
        collect_source(source, args.prefix.as_deref(), &mut items, formatter)?;
    }

    let total = items.len();
    let report = vault.ingest(items);

    formatter.format_ingest_result(&report)?;

    if !report.is_complete() {
        bail!("{} of {} uploads rejected", report.rejected_count(), total);
    }
    Ok(())
}

fn collect_source(
    source: &Path,
    prefix: Option<&str>,
    items: &mut Vec<UploadItem>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let metadata = fs::symlink_metadata(source)
        .with_context(|| format!("Source not found: {}", source.display()))?;

    if metadata.file_type().is_symlink() {
        formatter.format_warning(&format!("Skipped symlink: {}", source.display()));
        return Ok(());
    }

    if metadata.is_file() {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let data = fs::read(source).with_context(|| format!("Failed to read {}", source.display()))?;
        items.push(UploadItem::new(upload_name(prefix, &name), data));
        return Ok(());
    }

    // Directory: keep its own name as the top-level folder, like a browser
    // folder upload does
    let base = source
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()));

    for entry in WalkDir::new(source)
        .follow_links(false)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        let file_type = entry.file_type();

        if file_type.is_symlink() {
            formatter.format_warning(&format!("Skipped symlink: {}", entry.path().display()));
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .context("walked entry outside source")?;
        let mut segments: Vec<String> = base.iter().cloned().collect();
        segments.extend(
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string()),
        );

        let data = fs::read(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        items.push(UploadItem::new(upload_name(prefix, &segments.join("/")), data));
    }

    Ok(())
}

fn upload_name(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}/{name}", prefix.trim_end_matches('/')),
        _ => name.to_string(),
    }
}
