//! Bucket metadata reported to consumers.

use serde::{Deserialize, Serialize};

use crate::capability::AclCapability;

/// Identity and capability summary of the browsed bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketInfo {
    /// Bucket name.
    pub name: String,
    /// Region the bucket lives in.
    pub region: String,
    /// Current ACL capability state for the bucket.
    pub acl_capability: AclCapability,
}
