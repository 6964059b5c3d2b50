//! Key-path translation between the hierarchical folder view and the
//! store's flat key space.
//!
//! A [`Prefix`] is a normalized folder position: either empty (the bucket
//! root) or a `/`-terminated string with no leading delimiter, no empty
//! segments, and no traversal segments. [`normalize`] is idempotent:
//! normalizing an already-normalized prefix returns it unchanged.
//!
//! Everything here is pure; no I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BrowseError, BrowseResult};

/// The delimiter simulating hierarchy over the flat key space.
pub const DELIMITER: char = '/';

/// Maximum object key length in bytes.
const MAX_KEY_BYTES: usize = 1024;

/// A normalized folder position within the bucket.
///
/// Always empty or delimiter-terminated; never delimiter-prefixed.
/// Construct via [`normalize`] (or [`Prefix::root`] for the bucket root).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prefix(String);

impl Prefix {
    /// The bucket root (empty prefix).
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// The prefix as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the bucket root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The prefix's display name: its last path segment, or `""` at the root.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0
            .trim_end_matches(DELIMITER)
            .rsplit(DELIMITER)
            .next()
            .unwrap_or("")
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize a raw folder path into a [`Prefix`].
///
/// Strips leading and redundant delimiters, appends the trailing delimiter
/// when missing, and rejects unsafe input.
///
/// # Errors
///
/// Returns [`BrowseError::InvalidPath`] if the path contains a NUL byte or
/// other control character, a `.` or `..` segment, or normalizes to a key
/// longer than the store's limit.
///
/// # Examples
///
/// ```
/// use bucketview_core::path::normalize;
///
/// let p = normalize("/docs//2024").unwrap();
/// assert_eq!(p.as_str(), "docs/2024/");
/// assert_eq!(normalize(p.as_str()).unwrap(), p);
/// assert!(normalize("docs/../secrets").is_err());
/// ```
pub fn normalize(path: &str) -> BrowseResult<Prefix> {
    if path.chars().any(char::is_control) {
        return Err(BrowseError::invalid_path(
            path,
            "contains control characters",
        ));
    }

    let mut segments = Vec::new();
    for segment in path.split(DELIMITER) {
        match segment {
            "" => {} // leading, trailing, or doubled delimiter
            "." | ".." => {
                return Err(BrowseError::invalid_path(
                    path,
                    "contains a path traversal segment",
                ));
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Ok(Prefix::root());
    }

    let mut normalized = segments.join("/");
    normalized.push(DELIMITER);

    if normalized.len() > MAX_KEY_BYTES {
        return Err(BrowseError::invalid_path(path, "exceeds maximum key length"));
    }

    Ok(Prefix(normalized))
}

/// Join a file name onto a prefix, producing a full object key.
///
/// The prefix is already delimiter-terminated (or empty), so concatenation
/// never introduces a double delimiter.
///
/// # Errors
///
/// Returns [`BrowseError::InvalidPath`] if the name is empty, contains the
/// delimiter or control characters, is a traversal segment, or produces a
/// key longer than the store's limit.
///
/// # Examples
///
/// ```
/// use bucketview_core::path::{join, normalize};
///
/// let prefix = normalize("docs/").unwrap();
/// assert_eq!(join(&prefix, "a.txt").unwrap(), "docs/a.txt");
/// assert!(join(&prefix, "a/b.txt").is_err());
/// ```
pub fn join(prefix: &Prefix, name: &str) -> BrowseResult<String> {
    if name.is_empty() {
        return Err(BrowseError::invalid_path(name, "name is empty"));
    }
    if name.contains(DELIMITER) {
        return Err(BrowseError::invalid_path(name, "name contains a delimiter"));
    }
    if name.chars().any(char::is_control) {
        return Err(BrowseError::invalid_path(
            name,
            "name contains control characters",
        ));
    }
    if name == "." || name == ".." {
        return Err(BrowseError::invalid_path(
            name,
            "name is a path traversal segment",
        ));
    }

    let key = format!("{}{name}", prefix.as_str());
    if key.len() > MAX_KEY_BYTES {
        return Err(BrowseError::invalid_path(
            &key,
            "exceeds maximum key length",
        ));
    }
    Ok(key)
}

/// Validate a caller-supplied object key.
///
/// Keys reach the core raw (from listings the caller echoes back), so the
/// same safety rules as [`normalize`] apply: no control characters, no
/// traversal or empty segments, no leading delimiter, bounded length. A
/// single trailing delimiter is allowed — folder markers are legitimate
/// keys.
///
/// # Errors
///
/// Returns [`BrowseError::InvalidPath`] when any rule is violated.
pub fn validate_key(key: &str) -> BrowseResult<()> {
    if key.is_empty() {
        return Err(BrowseError::invalid_path(key, "key is empty"));
    }
    if key.len() > MAX_KEY_BYTES {
        return Err(BrowseError::invalid_path(key, "exceeds maximum key length"));
    }
    if key.chars().any(char::is_control) {
        return Err(BrowseError::invalid_path(
            key,
            "contains control characters",
        ));
    }
    if key.starts_with(DELIMITER) {
        return Err(BrowseError::invalid_path(key, "has a leading delimiter"));
    }

    let body = key.strip_suffix(DELIMITER).unwrap_or(key);
    for segment in body.split(DELIMITER) {
        match segment {
            "" => {
                return Err(BrowseError::invalid_path(key, "contains an empty segment"));
            }
            "." | ".." => {
                return Err(BrowseError::invalid_path(
                    key,
                    "contains a path traversal segment",
                ));
            }
            _ => {}
        }
    }
    Ok(())
}
