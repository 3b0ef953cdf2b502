//! MIME type guessing and icon categories for stored files.

use std::path::Path;

/// Fallback MIME type when the extension is unknown.
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Guesses a MIME type from a file name's extension.
#[must_use]
pub fn guess_mime(path: impl AsRef<Path>) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_MIME)
        .to_string()
}

/// Coarse file category used to pick an icon in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconCategory {
    /// `image/*`
    Image,
    /// PDF documents.
    Pdf,
    /// Compressed archives.
    Archive,
    /// Text and word-processor documents.
    Document,
    /// Anything else.
    Generic,
}

impl IconCategory {
    /// Maps a MIME type string to a category. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathvault_core::mime::IconCategory;
    ///
    /// assert_eq!(IconCategory::from_mime("image/png"), IconCategory::Image);
    /// assert_eq!(IconCategory::from_mime("application/zip"), IconCategory::Archive);
    /// assert_eq!(IconCategory::from_mime(""), IconCategory::Generic);
    /// ```
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();

        if mime.starts_with("image/") {
            Self::Image
        } else if mime.contains("pdf") {
            Self::Pdf
        } else if ["zip", "compressed", "x-tar", "gzip", "x-7z"]
            .iter()
            .any(|marker| mime.contains(marker))
        {
            Self::Archive
        } else if mime.starts_with("text/")
            || mime.contains("msword")
            || mime.contains("wordprocessingml")
        {
            Self::Document
        } else {
            Self::Generic
        }
    }

    /// Categorizes a file by its name.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::from_mime(&guess_mime(path))
    }

    /// Lowercase name, stable for serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::Archive => "archive",
            Self::Document => "document",
            Self::Generic => "generic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(IconCategory::from_mime("image/jpeg"), IconCategory::Image);
        assert_eq!(IconCategory::from_mime("application/pdf"), IconCategory::Pdf);
        assert_eq!(
            IconCategory::from_mime("application/x-7z-compressed"),
            IconCategory::Archive
        );
        assert_eq!(IconCategory::from_mime("application/gzip"), IconCategory::Archive);
        assert_eq!(IconCategory::from_mime("application/x-tar"), IconCategory::Archive);
        assert_eq!(IconCategory::from_mime("text/plain"), IconCategory::Document);
        assert_eq!(IconCategory::from_mime("application/msword"), IconCategory::Document);
        assert_eq!(
            IconCategory::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            IconCategory::Document
        );
        assert_eq!(IconCategory::from_mime("video/mp4"), IconCategory::Generic);
        assert_eq!(IconCategory::from_mime("IMAGE/PNG"), IconCategory::Image);
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime("photo.jpg"), "image/jpeg");
        assert_eq!(guess_mime("report.pdf"), "application/pdf");
        assert_eq!(guess_mime("no_extension"), DEFAULT_MIME);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(IconCategory::from_path("a/b/c.png"), IconCategory::Image);
        assert_eq!(IconCategory::from_path("bundle.zip"), IconCategory::Archive);
        assert_eq!(IconCategory::from_path("blob"), IconCategory::Generic);
    }
}
