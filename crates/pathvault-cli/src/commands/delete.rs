//! Delete command implementation

use crate::cli::DeleteArgs;
use crate::commands::open_vault;
use crate::error::add_vault_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use pathvault_core::VaultConfig;
use std::path::Path;

pub fn execute(
    args: &DeleteArgs,
    root: Option<&Path>,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let vault = open_vault(root, VaultConfig::default())?;
    add_vault_context(vault.delete(&args.name), &args.name)?;
    formatter.format_deleted(&args.name)
}
