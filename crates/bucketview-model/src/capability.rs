//! Per-bucket ACL capability tri-state.

use serde::{Deserialize, Serialize};

/// Whether a bucket's configuration permits per-object ACL operations.
///
/// Starts as [`AclCapability::Unknown`] and transitions to a terminal state
/// on the first conclusive probe. Terminal states never revert for the
/// lifetime of the process; a restart is required to re-probe (bucket
/// configuration is assumed stable).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AclCapability {
    /// Not yet probed, or the last probe failed transiently.
    #[default]
    Unknown,
    /// The bucket accepts per-object ACL reads and writes.
    Supported,
    /// The bucket's configuration disables per-object ACLs.
    Unsupported,
}

impl AclCapability {
    /// Whether this is a terminal (cacheable) state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// String form of the state.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown => "unknown",
            Self::Supported => "supported",
            Self::Unsupported => "unsupported",
        }
    }
}
