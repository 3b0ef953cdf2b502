//! Output type of the path sanitizer.

use std::fmt;
use std::path::Path;

/// A relative path made only of filesystem-safe segments.
///
/// Segments are joined with `/` and are never empty, `.` or `..`. An empty
/// `SanitizedPath` means the input carried nothing usable and the caller
/// should skip it.
///
/// There is deliberately no `From<String>`: the only way to obtain one is
/// [`crate::sanitize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SanitizedPath(String);

impl SanitizedPath {
    pub(crate) fn from_segments(segments: &[String]) -> Self {
        Self(segments.join("/"))
    }

    /// Returns `true` if sanitization left no segments.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the `/`-joined string form.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path form, suitable for joining onto a root.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Iterates over the segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Last segment, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }
}

impl fmt::Display for SanitizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for SanitizedPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}
