//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pathvault")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault root directory
    #[arg(short, long, global = true, env = "PATHVAULT_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how untrusted names would be sanitized
    Sanitize(SanitizeArgs),
    /// Resolve a name to its location under the vault root
    Resolve(ResolveArgs),
    /// Store local files and folders in the vault
    Ingest(IngestArgs),
    /// Package a vault folder as a ZIP archive
    Archive(ArchiveArgs),
    /// List files stored in the vault
    List(ListArgs),
    /// Delete a file from the vault
    Delete(DeleteArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct SanitizeArgs {
    /// Names to sanitize
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
}

#[derive(clap::Args)]
pub struct ResolveArgs {
    /// Name relative to the vault root
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Skip sanitization and check the name exactly as given
    #[arg(long)]
    pub raw: bool,
}

#[derive(clap::Args)]
pub struct IngestArgs {
    /// Local files or directories to upload
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Vault folder to store the sources under
    #[arg(long, value_name = "FOLDER")]
    pub prefix: Option<String>,

    /// Maximum single file size (accepts K, M, G, T suffixes)
    #[arg(long, value_parser = parse_byte_size)]
    pub max_file_size: Option<u64>,

    /// Accepted file extension (can be repeated; default: any)
    #[arg(long = "allow-ext", short = 'e', value_name = "EXT")]
    pub allowed_extensions: Vec<String>,

    /// Accept zero-byte files
    #[arg(long)]
    pub allow_empty: bool,
}

#[derive(clap::Args)]
pub struct ArchiveArgs {
    /// Vault folder to archive (empty for the whole vault)
    #[arg(value_name = "FOLDER", default_value = "")]
    pub folder: String,

    /// Output archive path (default: <folder>.zip in the current directory)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Overwrite output file if exists
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Show size, type and modification time
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    /// Name of the file relative to the vault root
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: Shell,
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
