//! The [`BucketView`] facade.
//!
//! `BucketView` owns the store handle, the ACL capability cache, and the
//! configuration, and exposes the transport-agnostic operation surface:
//! listing, upload, access-level read/write, download links, folder
//! creation, and bucket info. Individual operations are implemented in the
//! [`crate::ops`] submodules as `impl BucketView` blocks.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use bucketview_model::{AclCapability, BucketInfo};

use crate::capability::AclCapabilityCache;
use crate::config::Config;
use crate::store::{ObjectStore, StoreError, StoreResult};

/// Browsing and transfer core facade over one bucket.
///
/// All fields are `Arc`-wrapped for cheap cloning and shared ownership
/// across handler tasks; requests may be served concurrently from clones.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use bucketview_core::config::Config;
/// use bucketview_core::store::MemoryStore;
/// use bucketview_core::BucketView;
///
/// let store = Arc::new(MemoryStore::new("my-bucket"));
/// let view = BucketView::new(store, Config::default());
/// assert_eq!(view.config().bucket_name, "bucketview");
/// ```
#[derive(Clone)]
pub struct BucketView {
    /// The object-store client the core consumes.
    pub(crate) store: Arc<dyn ObjectStore>,
    /// Per-bucket ACL capability cache.
    pub(crate) capability: Arc<AclCapabilityCache>,
    /// Core configuration.
    pub(crate) config: Arc<Config>,
}

impl BucketView {
    /// Create a facade over `store` with the given configuration.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, config: Config) -> Self {
        Self {
            store,
            capability: Arc::new(AclCapabilityCache::new()),
            config: Arc::new(config),
        }
    }

    /// Create a facade sharing an existing capability cache.
    ///
    /// Useful when several facades (e.g. one per request handler) must agree
    /// on the process-wide capability state.
    #[must_use]
    pub fn with_capability_cache(
        store: Arc<dyn ObjectStore>,
        capability: Arc<AclCapabilityCache>,
        config: Config,
    ) -> Self {
        Self {
            store,
            capability,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a reference to the capability cache.
    #[must_use]
    pub fn capability_cache(&self) -> &AclCapabilityCache {
        &self.capability
    }

    /// Identity and capability summary of the browsed bucket.
    ///
    /// Probes the ACL capability lazily; a transient probe failure reports
    /// [`bucketview_model::AclCapability::Unknown`].
    pub async fn bucket_info(&self) -> BucketInfo {
        BucketInfo {
            name: self.store.bucket().to_owned(),
            region: self.store.region().to_owned(),
            acl_capability: self.acl_capability().await,
        }
    }

    /// Current ACL capability of the bucket, probing lazily under the
    /// configured deadline. A timed-out probe reports
    /// [`AclCapability::Unknown`] and caches nothing, like any other
    /// transient probe failure.
    pub(crate) async fn acl_capability(&self) -> AclCapability {
        let deadline = self.config.store_timeout();
        match tokio::time::timeout(deadline, self.capability.get(self.store.as_ref())).await {
            Ok(capability) => capability,
            Err(_) => AclCapability::Unknown,
        }
    }

    /// Run a store call under the configured deadline.
    ///
    /// An elapsed deadline becomes a timeout [`StoreError`], which the
    /// callers classify as unreachable; no store call may hang a worker.
    pub(crate) async fn with_timeout<T>(
        &self,
        fut: impl Future<Output = StoreResult<T>> + Send,
    ) -> StoreResult<T> {
        let deadline = self.config.store_timeout();
        match tokio::time::timeout(deadline, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::timeout(deadline)),
        }
    }
}

impl fmt::Debug for BucketView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketView")
            .field("bucket", &self.store.bucket())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
