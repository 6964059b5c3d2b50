//! Listing aggregation.
//!
//! Merges one or more paginated store calls into a single hierarchical
//! [`ListingPage`]: common prefixes become `Folder` entries, object records
//! become `Object` entries, and the folder-marker key (a key exactly equal
//! to the listed prefix) is excluded. When the configured entry cap fills
//! before the store is exhausted, the store's continuation marker is passed
//! through to the caller unchanged.

use std::collections::BTreeSet;

use futures::future::join_all;
use tracing::debug;

use bucketview_model::{AccessLevel, AclCapability, ListingEntry, ListingPage};

use crate::error::{BrowseError, BrowseResult};
use crate::path::{self, DELIMITER, Prefix};
use crate::provider::BucketView;
use crate::store::{ListPageRequest, RawObject};

impl BucketView {
    /// List the folders and objects directly under a prefix.
    ///
    /// `token` is an opaque continuation marker from a previous page.
    ///
    /// # Errors
    ///
    /// [`BrowseError::InvalidPath`] for a malformed prefix,
    /// [`BrowseError::PrefixNotFound`] when the store signals the prefix's
    /// parent does not exist (an empty folder is a successful empty page),
    /// [`BrowseError::BucketUnreachable`] for any other store failure.
    pub async fn list_files(
        &self,
        prefix: &str,
        token: Option<&str>,
    ) -> BrowseResult<ListingPage> {
        let prefix = path::normalize(prefix)?;
        self.list_prefix(&prefix, token).await
    }

    pub(crate) async fn list_prefix(
        &self,
        prefix: &Prefix,
        token: Option<&str>,
    ) -> BrowseResult<ListingPage> {
        let cap = self.config.max_listing_entries;
        let mut folders: BTreeSet<String> = BTreeSet::new();
        let mut objects: Vec<RawObject> = Vec::new();
        let mut cursor = token.map(ToOwned::to_owned);
        let mut next_token = None;

        loop {
            let collected = folders.len() + objects.len();
            let request = ListPageRequest {
                prefix: prefix.as_str().to_owned(),
                delimiter: DELIMITER.to_string(),
                token: cursor.clone(),
                max_keys: cap.saturating_sub(collected).max(1),
            };
            let page = self
                .with_timeout(self.store.list_page(request))
                .await
                .map_err(|e| BrowseError::from_store_for_listing(prefix.as_str(), e))?;

            folders.extend(page.common_prefixes);
            objects.extend(
                page.objects
                    .into_iter()
                    .filter(|o| o.key != prefix.as_str()),
            );

            match page.next_token {
                None => break,
                Some(marker) => {
                    if folders.len() + objects.len() >= cap {
                        // Cap reached: hand the store's marker through verbatim.
                        next_token = Some(marker);
                        break;
                    }
                    cursor = Some(marker);
                }
            }
        }

        objects.sort_by(|a, b| a.key.cmp(&b.key));

        let levels = self.annotate_levels(&objects).await;

        let mut entries: Vec<ListingEntry> = folders
            .into_iter()
            .map(|folder_prefix| folder_entry(prefix, folder_prefix))
            .collect();
        entries.extend(objects.into_iter().zip(levels).map(|(object, level)| {
            ListingEntry::Object {
                key: object.key,
                size: object.size,
                last_modified: object.last_modified,
                access_level: level,
            }
        }));

        debug!(
            prefix = %prefix,
            entries = entries.len(),
            truncated = next_token.is_some(),
            "listing aggregated"
        );

        Ok(ListingPage {
            prefix: prefix.to_string(),
            entries,
            next_token,
        })
    }

    /// Look up per-object access levels when the bucket supports ACLs.
    ///
    /// A per-object failure leaves that entry unannotated; availability of
    /// the folder view outranks completeness of the annotations.
    async fn annotate_levels(&self, objects: &[RawObject]) -> Vec<Option<AccessLevel>> {
        if self.acl_capability().await != AclCapability::Supported {
            return vec![None; objects.len()];
        }
        join_all(objects.iter().map(|object| self.object_level(&object.key))).await
    }

    async fn object_level(&self, key: &str) -> Option<AccessLevel> {
        match self.with_timeout(self.store.get_object_acl(key)).await {
            Ok(acl) => Some(AccessLevel::from_grants(&acl)),
            Err(err) => {
                debug!(key = %key, error = %err, "skipping access level annotation");
                None
            }
        }
    }
}

/// Build a `Folder` entry from a store common prefix.
fn folder_entry(parent: &Prefix, folder_prefix: String) -> ListingEntry {
    let name = folder_prefix[parent.as_str().len()..]
        .trim_end_matches(DELIMITER)
        .to_owned();
    ListingEntry::Folder {
        name,
        prefix: folder_prefix,
    }
}
