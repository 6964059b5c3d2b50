//! Domain error types for the browsing and transfer core.
//!
//! Defines [`BrowseError`], the error surface every public operation
//! returns. Variants distinguish client mistakes (`InvalidPath`,
//! `InvalidTtl`), missing targets (`PrefixNotFound`, `ObjectNotFound`),
//! configuration limits (`AclUnsupported`), and retryable store trouble
//! (`BucketUnreachable`); [`BrowseError::is_retryable`] encodes that split
//! so callers can decide whether to retry.
//!
//! Store-level failures arrive as [`StoreError`](crate::store::StoreError)
//! values carrying a documented error code; the helpers at the bottom map
//! them into `BrowseError` by classification, never by message text.

use crate::store::{StoreError, StoreErrorClass};

/// Browsing/transfer core error type.
#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    // -----------------------------------------------------------------------
    // Client errors
    // -----------------------------------------------------------------------
    /// The supplied path or name is malformed or unsafe.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath {
        /// The offending path as supplied.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The requested access level cannot be applied.
    #[error("access level {level:?} cannot be requested")]
    InvalidAccessLevel {
        /// The rejected level's spelling.
        level: String,
    },

    /// The requested link lifetime is out of bounds.
    #[error("invalid link TTL of {ttl_secs}s (must be positive and at most {max_secs}s)")]
    InvalidTtl {
        /// The requested TTL in seconds.
        ttl_secs: u64,
        /// The configured maximum in seconds.
        max_secs: u64,
    },

    // -----------------------------------------------------------------------
    // Missing targets
    // -----------------------------------------------------------------------
    /// The listed prefix's parent does not exist (distinct from an empty folder).
    #[error("prefix not found: {prefix}")]
    PrefixNotFound {
        /// The prefix that was not found.
        prefix: String,
    },

    /// The specified object does not exist.
    #[error("object not found: {key}")]
    ObjectNotFound {
        /// The key that was not found.
        key: String,
    },

    /// A folder with the requested name already exists.
    #[error("folder already exists: {prefix}")]
    FolderAlreadyExists {
        /// The folder prefix that already exists.
        prefix: String,
    },

    // -----------------------------------------------------------------------
    // Store / configuration
    // -----------------------------------------------------------------------
    /// The store could not be reached or failed transiently. Retryable.
    #[error("bucket unreachable: {message}")]
    BucketUnreachable {
        /// Description of the underlying failure.
        message: String,
    },

    /// The bucket's configuration does not support per-object ACLs.
    #[error("bucket configuration does not support per-object ACLs")]
    AclUnsupported,

    // -----------------------------------------------------------------------
    // Internal / catch-all
    // -----------------------------------------------------------------------
    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BrowseError {
    /// Whether a caller may meaningfully retry the failed operation.
    ///
    /// Only [`BrowseError::BucketUnreachable`] is retryable; every other
    /// variant is terminal for the given input.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::BucketUnreachable { .. })
    }

    /// Map a store failure from an operation targeting a single object.
    pub(crate) fn from_store_for_object(key: &str, err: StoreError) -> Self {
        match err.class() {
            StoreErrorClass::NotFound => Self::ObjectNotFound {
                key: key.to_owned(),
            },
            StoreErrorClass::AclUnsupported => Self::AclUnsupported,
            StoreErrorClass::Unreachable | StoreErrorClass::Other => Self::BucketUnreachable {
                message: err.to_string(),
            },
        }
    }

    /// Map a store failure from a listing operation under a prefix.
    pub(crate) fn from_store_for_listing(prefix: &str, err: StoreError) -> Self {
        match err.class() {
            StoreErrorClass::NotFound => Self::PrefixNotFound {
                prefix: prefix.to_owned(),
            },
            // ACL-unsupported cannot arise from a plain listing call; treat
            // it like any other store-side failure.
            StoreErrorClass::AclUnsupported
            | StoreErrorClass::Unreachable
            | StoreErrorClass::Other => Self::BucketUnreachable {
                message: err.to_string(),
            },
        }
    }

    /// Convenience constructor for path rejections.
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Convenience result type for core operations.
pub type BrowseResult<T> = Result<T, BrowseError>;
