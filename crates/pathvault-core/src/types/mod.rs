//! Type-safe wrappers for vault paths.
//!
//! Security-relevant paths are newtypes validated on construction. None of
//! them can be built from a raw string or `PathBuf` without going through
//! the sanitizer or the resolver.

pub mod resolved_path;
pub mod root;
pub mod sanitized_path;

pub use resolved_path::ResolvedPath;
pub use root::Root;
pub use sanitized_path::SanitizedPath;
