//! Folder creation.
//!
//! A "folder" is a zero-byte placeholder object whose key ends with the
//! delimiter. Creation validates the name, refuses a folder that already
//! has any key under it, and writes the marker.

use bytes::Bytes;
use tracing::info;

use crate::error::{BrowseError, BrowseResult};
use crate::path::{self, DELIMITER};
use crate::provider::BucketView;
use crate::store::{ListPageRequest, PutObjectOptions, byte_stream};

impl BucketView {
    /// Create a folder named `name` under `prefix`, returning the folder key.
    ///
    /// # Errors
    ///
    /// [`BrowseError::InvalidPath`] for a malformed prefix or a name outside
    /// the allowed character set (ASCII letters, digits, `-`, `_`, `.`),
    /// [`BrowseError::FolderAlreadyExists`] when any key already lives under
    /// the folder, [`BrowseError::BucketUnreachable`] for store failures.
    pub async fn create_folder(&self, prefix: &str, name: &str) -> BrowseResult<String> {
        let parent = path::normalize(prefix)?;
        let name = name.trim();
        validate_folder_name(name)?;

        let folder_key = format!("{}{name}{DELIMITER}", parent.as_str());

        // Any key under the folder prefix, marker included, means it exists.
        let probe = ListPageRequest {
            prefix: folder_key.clone(),
            delimiter: String::new(),
            token: None,
            max_keys: 1,
        };
        let page = self
            .with_timeout(self.store.list_page(probe))
            .await
            .map_err(|e| BrowseError::from_store_for_listing(&folder_key, e))?;
        if !page.objects.is_empty() || !page.common_prefixes.is_empty() {
            return Err(BrowseError::FolderAlreadyExists { prefix: folder_key });
        }

        let options = PutObjectOptions {
            server_side_encryption: self.config.server_side_encryption,
        };
        self.with_timeout(
            self.store
                .put_object(&folder_key, byte_stream(Bytes::new()), options),
        )
        .await
        .map_err(|e| BrowseError::from_store_for_object(&folder_key, e))?;

        info!(folder = %folder_key, "created folder");
        Ok(folder_key)
    }
}

/// Validate a folder name: non-empty, no traversal, and only characters the
/// browsing surface accepts.
fn validate_folder_name(name: &str) -> BrowseResult<()> {
    if name.is_empty() {
        return Err(BrowseError::invalid_path(name, "folder name is empty"));
    }
    if name == "." || name == ".." {
        return Err(BrowseError::invalid_path(
            name,
            "folder name is a path traversal segment",
        ));
    }
    if !name
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.')
    {
        return Err(BrowseError::invalid_path(
            name,
            "folder name may only contain letters, digits, hyphens, underscores, and periods",
        ));
    }
    Ok(())
}
