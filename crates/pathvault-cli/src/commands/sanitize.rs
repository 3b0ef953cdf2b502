//! Sanitize command implementation

use crate::cli::SanitizeArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use pathvault_core::sanitize;

pub fn execute(args: &SanitizeArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let results: Vec<_> = args
        .names
        .iter()
        .map(|name| (name.clone(), sanitize(name)))
        .collect();

    formatter.format_sanitized(&results)
}
