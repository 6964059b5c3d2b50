//! ACL capability detection and caching.
//!
//! Whether a bucket permits per-object ACLs is probed at most once per
//! terminal outcome and memoized for the process lifetime. The probe is a
//! harmless bucket-ACL read; its result is classified through the store
//! error-code table:
//!
//! - success → cache [`AclCapability::Supported`]
//! - an ACL-unsupported class error → cache [`AclCapability::Unsupported`]
//! - anything else (auth, network, timeout) → return
//!   [`AclCapability::Unknown`] *without* caching, so a later call retries
//!   the probe instead of a transient failure permanently disabling ACLs.
//!
//! Terminal states never revert; a process restart is required to re-probe.

use dashmap::DashMap;
use tracing::{debug, warn};

use bucketview_model::AclCapability;

use crate::store::{ObjectStore, StoreErrorClass};

/// Process-scoped, per-bucket ACL capability cache.
///
/// Safe for concurrent use: duplicate probes racing to insert the same
/// terminal value are harmless.
///
/// # Examples
///
/// ```
/// use bucketview_core::capability::AclCapabilityCache;
///
/// let cache = AclCapabilityCache::new();
/// assert!(cache.cached("any-bucket").is_none());
/// ```
#[derive(Debug, Default)]
pub struct AclCapabilityCache {
    entries: DashMap<String, AclCapability>,
}

impl AclCapabilityCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached terminal state for `bucket`, if any.
    #[must_use]
    pub fn cached(&self, bucket: &str) -> Option<AclCapability> {
        self.entries.get(bucket).map(|entry| *entry)
    }

    /// The capability of the store's bucket, probing lazily when unknown.
    pub async fn get(&self, store: &dyn ObjectStore) -> AclCapability {
        if let Some(capability) = self.cached(store.bucket()) {
            return capability;
        }
        self.probe(store).await
    }

    /// Probe the store's bucket and cache a terminal outcome.
    ///
    /// Idempotent: once a terminal state is cached, further probes return it
    /// without touching the store.
    pub async fn probe(&self, store: &dyn ObjectStore) -> AclCapability {
        let bucket = store.bucket();
        if let Some(capability) = self.cached(bucket) {
            return capability;
        }

        match store.get_bucket_acl().await {
            Ok(_) => {
                debug!(bucket = %bucket, "bucket supports per-object ACLs");
                self.entries
                    .insert(bucket.to_owned(), AclCapability::Supported);
                AclCapability::Supported
            }
            Err(err) => match err.class() {
                StoreErrorClass::AclUnsupported => {
                    debug!(bucket = %bucket, "bucket configuration disables per-object ACLs");
                    self.entries
                        .insert(bucket.to_owned(), AclCapability::Unsupported);
                    AclCapability::Unsupported
                }
                _ => {
                    // Transient: leave the cache empty so a later call retries.
                    warn!(bucket = %bucket, error = %err, "ACL capability probe failed transiently");
                    AclCapability::Unknown
                }
            },
        }
    }
}
