//! Access designation management for single objects.
//!
//! Reads reduce the store's native grant list to the nearest
//! [`AccessLevel`] through the central mapping in `bucketview-model`;
//! unrecognized grant combinations report [`AccessLevel::Unknown`] rather
//! than failing. Writes re-check the capability flag even though callers
//! are expected to have consulted it first.

use tracing::info;

use bucketview_model::{AccessLevel, AclCapability};

use crate::error::{BrowseError, BrowseResult};
use crate::path;
use crate::provider::BucketView;

impl BucketView {
    /// Read the access level of one object.
    ///
    /// # Errors
    ///
    /// [`BrowseError::ObjectNotFound`] if the key does not exist,
    /// [`BrowseError::AclUnsupported`] if the bucket configuration disables
    /// ACLs, [`BrowseError::BucketUnreachable`] for store failures.
    pub async fn get_access_level(&self, key: &str) -> BrowseResult<AccessLevel> {
        path::validate_key(key)?;
        let acl = self
            .with_timeout(self.store.get_object_acl(key))
            .await
            .map_err(|e| BrowseError::from_store_for_object(key, e))?;
        Ok(AccessLevel::from_grants(&acl))
    }

    /// Update the access level of one object.
    ///
    /// # Errors
    ///
    /// [`BrowseError::InvalidAccessLevel`] for [`AccessLevel::Unknown`]
    /// (a reporting sentinel, not a grantable level),
    /// [`BrowseError::AclUnsupported`] when the capability flag says the
    /// bucket cannot, [`BrowseError::ObjectNotFound`] if the key does not
    /// exist, [`BrowseError::BucketUnreachable`] for store failures.
    pub async fn set_access_level(&self, key: &str, level: AccessLevel) -> BrowseResult<()> {
        path::validate_key(key)?;
        if !level.is_requestable() {
            return Err(BrowseError::InvalidAccessLevel {
                level: level.as_str().to_owned(),
            });
        }
        if self.acl_capability().await == AclCapability::Unsupported {
            return Err(BrowseError::AclUnsupported);
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

        self.with_timeout(self.store.put_object_acl(key, level))
            .await
            .map_err(|e| BrowseError::from_store_for_object(key, e))?;

        info!(key = %key, level = %level, "updated access level");
        Ok(())
    }
}
