//! Server configuration loaded from a TOML file.

use pathvault_core::VaultConfig;
use pathvault_core::config::DEFAULT_ALLOWED_EXTENSIONS;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

const MIB: u64 = 1024 * 1024;

/// Errors raised while loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or has wrong types.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Storage root and upload policy.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory every stored file lives under. Created at startup.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Maximum size of a single file in megabytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u64,
    /// Maximum size of one upload request in megabytes.
    #[serde(default = "default_max_request_size")]
    pub max_request_size_mb: u64,
    /// Accepted extensions; an empty list accepts everything.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Store zero-length uploads.
    #[serde(default)]
    pub allow_empty_files: bool,
    /// Deflate level for folder downloads.
    #[serde(default = "default_compression_level")]
    pub compression_level: u8,
    /// Maximum number of path segments in a stored name.
    #[serde(default = "default_max_path_depth")]
    pub max_path_depth: usize,
}

fn default_root() -> PathBuf {
    PathBuf::from("uploads")
}

const fn default_max_file_size() -> u64 {
    50
}

const fn default_max_request_size() -> u64 {
    50
}

fn default_allowed_extensions() -> Vec<String> {
    DEFAULT_ALLOWED_EXTENSIONS
        .iter()
        .map(ToString::to_string)
        .collect()
}

const fn default_compression_level() -> u8 {
    6
}

const fn default_max_path_depth() -> usize {
    32
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            max_file_size_mb: default_max_file_size(),
            max_request_size_mb: default_max_request_size(),
            allowed_extensions: default_allowed_extensions(),
            allow_empty_files: false,
            compression_level: default_compression_level(),
            max_path_depth: default_max_path_depth(),
        }
    }
}

impl StorageConfig {
    /// Builds the core policy from the file settings.
    #[must_use]
    ///
    /// The compression level is copied as-is; an out-of-range value is
    /// reported by [`VaultConfig::validate`] when the vault is opened.
    pub fn to_vault_config(&self) -> VaultConfig {
        let base = VaultConfig::default()
            .with_max_file_size(self.max_file_size_mb.saturating_mul(MIB))
            .with_allowed_extensions(self.allowed_extensions.clone())
            .with_allow_empty_files(self.allow_empty_files)
            .with_max_path_depth(self.max_path_depth);
        VaultConfig {
            compression_level: Some(self.compression_level),
            ..base
        }
    }

    /// Request body cap in bytes.
    #[must_use]
    pub fn max_request_bytes(&self) -> usize {
        usize::try_from(self.max_request_size_mb.saturating_mul(MIB)).unwrap_or(usize::MAX)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Listener configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub vault: StorageConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read and
    /// `ConfigError::Parse` if it is not valid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed input.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Socket address string for the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
