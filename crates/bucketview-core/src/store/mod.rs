//! Object-store client abstraction.
//!
//! [`ObjectStore`] is the seam between the core and whatever backs the
//! bucket: a cloud SDK adapter in production, [`MemoryStore`] in tests and
//! demos. The trait mirrors exactly the store surface the core consumes:
//! paginated prefix+delimiter listing, object head, ACL read/write,
//! streaming object write, existence check, and signed-URL generation.
//!
//! Store failures are [`StoreError`] values carrying a [`StoreErrorCode`]
//! drawn from the store's documented error codes. The core never inspects
//! message text; [`StoreErrorCode::classify`] is the single mapping table
//! from codes to the classes the core acts on.

pub mod memory;

use std::fmt;
use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{Deserialize, Serialize};

use bucketview_model::{AccessLevel, ObjectAcl};

pub use memory::MemoryStore;

/// A streaming object payload: chunks of bytes or an I/O error.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Wrap a complete in-memory payload as a [`ByteStream`].
///
/// # Examples
///
/// ```
/// use bucketview_core::store::byte_stream;
///
/// let _body = byte_stream("hello");
/// ```
pub fn byte_stream(bytes: impl Into<Bytes>) -> ByteStream {
    Box::pin(futures::stream::once(std::future::ready(Ok(bytes.into()))))
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Documented error codes a store adapter may surface.
///
/// Adapters translate their SDK's error representation into one of these
/// codes; anything without a documented counterpart becomes
/// [`StoreErrorCode::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreErrorCode {
    /// The bucket does not exist.
    NoSuchBucket,
    /// The object key does not exist.
    NoSuchKey,
    /// The bucket's configuration does not support per-object ACLs.
    AccessControlListNotSupported,
    /// The caller's credentials were rejected.
    AccessDenied,
    /// The store did not answer within its own deadline, or ours.
    RequestTimeout,
    /// The store asked us to back off.
    ServiceUnavailable,
    /// The store reported an internal failure.
    InternalError,
    /// The request was malformed at the store layer.
    InvalidRequest,
    /// A code with no documented counterpart.
    Unrecognized,
}

/// Classification of a store error, as the core acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorClass {
    /// The target (bucket or key) does not exist.
    NotFound,
    /// The bucket's configuration disables per-object ACLs. Terminal.
    AclUnsupported,
    /// Network/auth/transient store failure. Retryable by the caller.
    Unreachable,
    /// None of the above; surfaced as a generic store failure.
    Other,
}

impl StoreErrorCode {
    /// Classify this code. The single mapping table between documented store
    /// codes and the classes the core acts on.
    #[must_use]
    pub fn classify(&self) -> StoreErrorClass {
        match self {
            Self::NoSuchBucket | Self::NoSuchKey => StoreErrorClass::NotFound,
            Self::AccessControlListNotSupported => StoreErrorClass::AclUnsupported,
            Self::AccessDenied
            | Self::RequestTimeout
            | Self::ServiceUnavailable
            | Self::InternalError => StoreErrorClass::Unreachable,
            Self::InvalidRequest | Self::Unrecognized => StoreErrorClass::Other,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    // Variant names are the documented wire codes, so Debug is the wire form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// An error surfaced by a store adapter.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{code}: {message}")]
pub struct StoreError {
    /// The documented error code.
    pub code: StoreErrorCode,
    /// Human-readable detail from the adapter.
    pub message: String,
}

impl StoreError {
    /// Create a store error from a code and message.
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A deadline-exceeded error for a call bounded by `timeout`.
    #[must_use]
    pub fn timeout(timeout: Duration) -> Self {
        Self::new(
            StoreErrorCode::RequestTimeout,
            format!("store call exceeded the {}s deadline", timeout.as_secs()),
        )
    }

    /// Classify this error via its code.
    #[must_use]
    pub fn class(&self) -> StoreErrorClass {
        self.code.classify()
    }
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Parameters of one paginated listing call.
#[derive(Debug, Clone)]
pub struct ListPageRequest {
    /// Key prefix to list under.
    pub prefix: String,
    /// Grouping delimiter (always `"/"` from the core).
    pub delimiter: String,
    /// Opaque continuation token from a previous page, if any.
    pub token: Option<String>,
    /// Maximum entries (objects + common prefixes) wanted in this page. The
    /// store may return fewer.
    pub max_keys: usize,
}

/// One object as reported by a listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObject {
    /// The full object key.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last modification time.
    pub last_modified: DateTime<Utc>,
}

/// One raw page from the store's listing API.
#[derive(Debug, Clone, Default)]
pub struct RawListPage {
    /// Objects directly under the requested prefix.
    pub objects: Vec<RawObject>,
    /// Common prefixes (keys grouped at the delimiter), delimiter-terminated.
    pub common_prefixes: Vec<String>,
    /// Continuation token; present exactly when the listing is truncated.
    pub next_token: Option<String>,
}

/// Head metadata of one object.
#[derive(Debug, Clone)]
pub struct ObjectHead {
    /// The object key.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last modification time.
    pub last_modified: DateTime<Utc>,
    /// The object's ETag.
    pub etag: String,
}

/// Options for a streaming object write.
#[derive(Debug, Clone, Default)]
pub struct PutObjectOptions {
    /// Whether to request server-side encryption for the written object.
    pub server_side_encryption: bool,
}

/// Result of a streaming object write.
#[derive(Debug, Clone)]
pub struct PutResult {
    /// Number of bytes actually written. Authoritative over any declared size.
    pub size: u64,
    /// The ETag of the written object.
    pub etag: String,
}

// ---------------------------------------------------------------------------
// ObjectStore trait
// ---------------------------------------------------------------------------

/// The object-store client surface the core consumes.
///
/// All methods are fallible and asynchronous; implementations must be safe
/// to share across tasks. Credential acquisition is the adapter's problem —
/// the core never sees credentials.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// The bucket identity this store is bound to.
    fn bucket(&self) -> &str;

    /// The region the bucket lives in.
    fn region(&self) -> &str;

    /// One page of a prefix+delimiter listing.
    async fn list_page(&self, request: ListPageRequest) -> StoreResult<RawListPage>;

    /// Head metadata for one object.
    async fn head_object(&self, key: &str) -> StoreResult<ObjectHead>;

    /// Whether an object exists under `key`.
    ///
    /// The default implementation heads the object and treats a not-found
    /// code as `false`; adapters with a cheaper existence call may override.
    async fn object_exists(&self, key: &str) -> StoreResult<bool> {
        match self.head_object(key).await {
            Ok(_) => Ok(true),
            Err(err) if err.class() == StoreErrorClass::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Read the ACL of the bucket itself. Used by the capability probe.
    async fn get_bucket_acl(&self) -> StoreResult<ObjectAcl>;

    /// Read the native ACL grants of one object.
    async fn get_object_acl(&self, key: &str) -> StoreResult<ObjectAcl>;

    /// Apply a canned access level to one object.
    async fn put_object_acl(&self, key: &str, level: AccessLevel) -> StoreResult<()>;

    /// Stream a payload into the store under `key`.
    async fn put_object(
        &self,
        key: &str,
        body: ByteStream,
        options: PutObjectOptions,
    ) -> StoreResult<PutResult>;

    /// Produce a time-limited signed URL for direct download of `key`.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> StoreResult<String>;
}
