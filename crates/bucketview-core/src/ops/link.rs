//! Time-limited download link issuance.
//!
//! Pure delegation to the store's signed-URL mechanism, with two guards in
//! front of it: the TTL must sit inside the configured bounds, and the
//! object must exist (no link is ever signed for a missing key).

use std::time::Duration;

use tracing::debug;

use crate::error::{BrowseError, BrowseResult};
use crate::path;
use crate::provider::BucketView;

impl BucketView {
    /// Produce a time-limited download URL for one object.
    ///
    /// When `ttl` is `None` the configured default lifetime applies.
    ///
    /// # Errors
    ///
    /// [`BrowseError::InvalidTtl`] for a zero TTL or one beyond the
    /// configured maximum, [`BrowseError::ObjectNotFound`] when the key does
    /// not exist (checked before any signing happens),
    /// [`BrowseError::BucketUnreachable`] for store failures.
    pub async fn get_download_link(
        &self,
        key: &str,
        ttl: Option<Duration>,
    ) -> BrowseResult<String> {
        path::validate_key(key)?;

        let ttl = ttl.unwrap_or_else(|| self.config.default_link_ttl());
        let max_secs = self.config.max_link_ttl_secs;
        if ttl.is_zero() || ttl.as_secs() > max_secs {
            return Err(BrowseError::InvalidTtl {
                ttl_secs: ttl.as_secs(),
                max_secs,
            });
        }

        let exists = self
            .with_timeout(self.store.object_exists(key))
            .await
            .map_err(|e| BrowseError::from_store_for_object(key, e))?;
        if !exists {
            return Err(BrowseError::ObjectNotFound {
                key: key.to_owned(),
            });
        }

        let url = self
            .with_timeout(self.store.presign_get(key, ttl))
            .await
            .map_err(|e| BrowseError::from_store_for_object(key, e))?;

        debug!(key = %key, ttl_secs = ttl.as_secs(), "issued download link");
        Ok(url)
    }
}
