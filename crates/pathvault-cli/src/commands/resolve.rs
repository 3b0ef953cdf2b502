//! Resolve command implementation

use crate::cli::ResolveArgs;
use crate::commands::open_vault;
use crate::error::add_vault_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use pathvault_core::VaultConfig;
use std::path::Path;

pub fn execute(
    args: &ResolveArgs,
    root: Option<&Path>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let vault = open_vault(root, VaultConfig::default())?;

    // --raw shows what the containment check alone would do with the name
    let resolved = if args.raw {
        vault.resolve(&args.name)
    } else {
        let sanitized = vault.sanitize(&args.name);
        vault.resolve(sanitized.as_path())
    };
    let resolved = add_vault_context(resolved, &args.name)?;

    formatter.format_resolved(&args.name, &resolved)
}
