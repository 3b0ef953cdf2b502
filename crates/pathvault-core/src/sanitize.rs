//! Untrusted relative path sanitization.
//!
//! The sanitizer degrades hostile input instead of rejecting it: empty, `.`
//! and `..` segments are dropped and every remaining segment is made safe to
//! use as a single file name on common filesystems. `"../../etc/passwd"`
//! therefore becomes `"etc/passwd"`, which is NOT what the caller asked for.
//! Anything that must match the caller's intent exactly has to compare the
//! sanitized form with the input itself.
//!
//! Sanitizing is not containment. Every sanitized path must still go through
//! [`crate::security::resolve`] before it touches the filesystem.

use crate::types::SanitizedPath;

/// Longest segment, in bytes, accepted by common filesystems.
pub const MAX_SEGMENT_BYTES: usize = 255;

/// Replacement for characters that are illegal in file names.
const REPLACEMENT: char = '_';

const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Sanitizes an untrusted relative path.
///
/// Both `/` and `\` separate segments. Never fails; input with nothing
/// usable yields an empty [`SanitizedPath`].
///
/// # Examples
///
/// ```
/// use pathvault_core::sanitize;
///
/// assert_eq!(sanitize("photos/./vacation//img1.jpg").as_str(), "photos/vacation/img1.jpg");
/// assert_eq!(sanitize("../../etc/passwd").as_str(), "etc/passwd");
/// assert_eq!(sanitize("dir\\con.txt").as_str(), "dir/_con.txt");
/// assert!(sanitize("../..").is_empty());
/// ```
#[must_use]
pub fn sanitize(input: &str) -> SanitizedPath {
    let segments: Vec<String> = input
        .split(['/', '\\'])
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
        .map(sanitize_segment)
        .collect();

    SanitizedPath::from_segments(&segments)
}

/// Makes a single path segment safe to use as a file name.
///
/// Control characters are removed, separators and other reserved
/// punctuation become `_`, trailing dots and spaces are trimmed, Windows
/// device names get a `_` prefix and the result is capped at
/// [`MAX_SEGMENT_BYTES`]. The result is never empty, `.` or `..`.
///
/// # Examples
///
/// ```
/// use pathvault_core::sanitize::sanitize_segment;
///
/// assert_eq!(sanitize_segment("a:b?.txt"), "a_b_.txt");
/// assert_eq!(sanitize_segment("NUL"), "_NUL");
/// assert_eq!(sanitize_segment("\0"), "_");
/// ```
#[must_use]
pub fn sanitize_segment(segment: &str) -> String {
    let mut cleaned: String = segment
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| {
            if ILLEGAL_CHARS.contains(&c) {
                REPLACEMENT
            } else {
                c
            }
        })
        .collect();

    trim_trailing(&mut cleaned);

    if is_reserved_device_name(&cleaned) {
        cleaned.insert(0, REPLACEMENT);
    }

    truncate_to_boundary(&mut cleaned, MAX_SEGMENT_BYTES);
    trim_trailing(&mut cleaned);

    if cleaned.is_empty() {
        cleaned.push(REPLACEMENT);
    }
    cleaned
}

fn trim_trailing(segment: &mut String) {
    let keep = segment.trim_end_matches(['.', ' ']).len();
    segment.truncate(keep);
}

fn truncate_to_boundary(segment: &mut String, max_bytes: usize) {
    if segment.len() <= max_bytes {
        return;
    }
    let mut end = max_bytes;
    while !segment.is_char_boundary(end) {
        end -= 1;
    }
    segment.truncate(end);
}

/// Device names are reserved regardless of extension (`con.txt` included).
fn is_reserved_device_name(segment: &str) -> bool {
    let stem = segment.split('.').next().unwrap_or(segment).trim_end();
    RESERVED_DEVICE_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
}
