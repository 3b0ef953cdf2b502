//! PathVault CLI - Command-line utility for a root-confined upload vault.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let root = cli.root.as_deref();
    let show_progress = !cli.quiet && !cli.json;

    match &cli.command {
        cli::Commands::Sanitize(args) => commands::sanitize::execute(args, &*formatter),
        cli::Commands::Resolve(args) => commands::resolve::execute(args, root, &*formatter),
        cli::Commands::Ingest(args) => commands::ingest::execute(args, root, &*formatter),
        cli::Commands::Archive(args) => {
            commands::archive::execute(args, root, &*formatter, show_progress)
        }
        cli::Commands::List(args) => commands::list::execute(args, root, &*formatter),
        cli::Commands::Delete(args) => commands::delete::execute(args, root, &*formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}
