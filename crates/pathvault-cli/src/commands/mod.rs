//! Subcommand implementations.

pub mod archive;
pub mod completion;
pub mod delete;
pub mod ingest;
pub mod list;
pub mod resolve;
pub mod sanitize;

use crate::error::add_vault_context;
use crate::error::missing_root;
use anyhow::Result;
use pathvault_core::PathVault;
use pathvault_core::VaultConfig;
use std::path::Path;

/// Opens the vault named by `--root` / `PATHVAULT_ROOT`.
pub fn open_vault(root: Option<&Path>, config: VaultConfig) -> Result<PathVault> {
    let root = root.ok_or_else(missing_root)?;
    add_vault_context(
        PathVault::open(root, config),
        &root.display().to_string(),
    )
}
