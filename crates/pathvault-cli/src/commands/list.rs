//! List command implementation

use crate::cli::ListArgs;
use crate::commands::open_vault;
use crate::error::add_vault_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use pathvault_core::VaultConfig;
use std::path::Path;

pub fn execute(args: &ListArgs, root: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<()> {
    let vault = open_vault(root, VaultConfig::default())?;
    let files = add_vault_context(vault.list(), "")?;

    formatter.format_listing(&files, args.long, args.human_readable)
}
