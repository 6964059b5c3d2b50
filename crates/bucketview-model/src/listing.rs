//! Listing entries and pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::AccessLevel;

/// One entry in a folder listing: a sub-folder or an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ListingEntry {
    /// A "folder": a common prefix grouping keys one level deeper.
    Folder {
        /// The folder's display name (the last path segment, no delimiter).
        name: String,
        /// The full prefix of the folder, delimiter-terminated.
        prefix: String,
    },
    /// An object directly under the listed prefix.
    Object {
        /// The full object key.
        key: String,
        /// Object size in bytes.
        size: u64,
        /// Last modification time reported by the store.
        last_modified: DateTime<Utc>,
        /// The object's access level, present only when the bucket supports
        /// ACLs and the per-object lookup succeeded.
        #[serde(skip_serializing_if = "Option::is_none")]
        access_level: Option<AccessLevel>,
    },
}

impl ListingEntry {
    /// The entry's display name: folder name or the object key's last segment.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Folder { name, .. } => name,
            Self::Object { key, .. } => key.rsplit('/').next().unwrap_or(key),
        }
    }

    /// Whether this entry is a folder.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder { .. })
    }
}

/// One page of a folder listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    /// The normalized prefix this page was listed under.
    pub prefix: String,
    /// Entries, folders first, each group sorted lexicographically by name.
    pub entries: Vec<ListingEntry>,
    /// Opaque continuation marker; present when more entries exist beyond
    /// this page. Pass it back unchanged to fetch the next page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ListingPage {
    /// Whether more entries exist beyond this page.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.next_token.is_some()
    }
}
