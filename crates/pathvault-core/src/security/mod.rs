//! Containment checks for caller-supplied paths.
//!
//! Every filesystem read or write driven by a caller-supplied name passes
//! through [`resolve`] (directly or via the `resolve_for_*` helpers). There
//! is no other route from a string to a path under the root.

pub mod containment;

pub use containment::resolve;
pub use containment::resolve_components;
pub use containment::resolve_for_read;
pub use containment::resolve_for_write;
