//! In-memory [`ObjectStore`] implementation.
//!
//! Backs tests and demos with the listing semantics of a real bucket:
//! `BTreeMap` key order, delimiter grouping into common prefixes, opaque
//! base64 continuation tokens, and a configurable native page size. ACL
//! support can be switched off at construction to model a bucket whose
//! configuration disables per-object ACLs, and individual operations can be
//! made to fail with a chosen error code to exercise degraded paths.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use md5::{Digest, Md5};
use parking_lot::RwLock;
use percent_encoding::{AsciiSet, CONTROLS, percent_encode};
use rand::RngExt;
use tracing::trace;
use uuid::Uuid;

use bucketview_model::{AccessLevel, Grant, ObjectAcl};

use super::{
    ByteStream, ListPageRequest, ObjectHead, ObjectStore, PutObjectOptions, PutResult,
    RawListPage, RawObject, StoreError, StoreErrorCode, StoreResult,
};

/// Default native page size of the store's listing API.
const DEFAULT_PAGE_SIZE: usize = 1000;

/// Characters percent-encoded in presigned-URL key paths. The delimiter is
/// left as-is so the URL path mirrors the key hierarchy.
const KEY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'%')
    .add(b'{')
    .add(b'}');

/// One stored object.
#[derive(Debug, Clone)]
struct StoredObject {
    body: Bytes,
    etag: String,
    last_modified: DateTime<Utc>,
    grants: Vec<Grant>,
    server_side_encryption: bool,
}

/// Per-operation fault plan. Keys map to the error code the next matching
/// call should fail with; listing/bucket-ACL faults apply until cleared.
#[derive(Debug, Default)]
struct Faults {
    put: RwLock<HashMap<String, StoreErrorCode>>,
    object_acl: RwLock<HashMap<String, StoreErrorCode>>,
    listing: RwLock<Option<StoreErrorCode>>,
    bucket_acl: RwLock<Option<StoreErrorCode>>,
}

/// In-memory object store.
///
/// # Examples
///
/// ```
/// use bucketview_core::store::MemoryStore;
///
/// let store = MemoryStore::new("my-bucket");
/// store.seed("docs/a.txt", "hello");
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    bucket: String,
    region: String,
    owner_id: String,
    acl_enabled: bool,
    page_size: usize,
    objects: RwLock<BTreeMap<String, StoredObject>>,
    faults: Faults,
    presign_calls: AtomicU64,
}

impl MemoryStore {
    /// Create an empty store for `bucket` with ACLs enabled.
    #[must_use]
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: String::from("us-east-1"),
            owner_id: Uuid::new_v4().simple().to_string(),
            acl_enabled: true,
            page_size: DEFAULT_PAGE_SIZE,
            objects: RwLock::new(BTreeMap::new()),
            faults: Faults::default(),
            presign_calls: AtomicU64::new(0),
        }
    }

    /// Set the bucket's region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Enable or disable per-object ACL support for the bucket.
    #[must_use]
    pub fn with_acl_enabled(mut self, enabled: bool) -> Self {
        self.acl_enabled = enabled;
        self
    }

    /// Override the store's native listing page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// The canonical owner ID this store stamps on ACLs.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// Whether the store holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Insert an object directly, bypassing the streaming write path.
    pub fn seed(&self, key: &str, body: impl Into<Bytes>) {
        self.seed_with_level(key, body, AccessLevel::Private);
    }

    /// Insert an object directly with the given access level.
    pub fn seed_with_level(&self, key: &str, body: impl Into<Bytes>, level: AccessLevel) {
        let body = body.into();
        let object = StoredObject {
            etag: compute_etag(&body),
            last_modified: Utc::now(),
            grants: level.to_grants(&self.owner_id).unwrap_or_default(),
            server_side_encryption: false,
            body,
        };
        self.objects.write().insert(key.to_owned(), object);
    }

    /// The stored body of an object, if present.
    #[must_use]
    pub fn body_of(&self, key: &str) -> Option<Bytes> {
        self.objects.read().get(key).map(|o| o.body.clone())
    }

    /// The stored access level of an object, reduced from its grants.
    #[must_use]
    pub fn level_of(&self, key: &str) -> Option<AccessLevel> {
        self.objects.read().get(key).map(|o| {
            AccessLevel::from_grants(&ObjectAcl {
                owner_id: self.owner_id.clone(),
                grants: o.grants.clone(),
            })
        })
    }

    /// Whether an object was written with server-side encryption requested.
    #[must_use]
    pub fn encrypted(&self, key: &str) -> Option<bool> {
        self.objects.read().get(key).map(|o| o.server_side_encryption)
    }

    /// How many presign calls this store has served.
    #[must_use]
    pub fn presign_calls(&self) -> u64 {
        self.presign_calls.load(Ordering::Relaxed)
    }

    // -----------------------------------------------------------------------
    // Fault injection (test seams)
    // -----------------------------------------------------------------------

    /// Make the next write to `key` fail with `code`.
    pub fn fail_put(&self, key: &str, code: StoreErrorCode) {
        self.faults.put.write().insert(key.to_owned(), code);
    }

    /// Make object-ACL reads/writes for `key` fail with `code`.
    pub fn fail_object_acl(&self, key: &str, code: StoreErrorCode) {
        self.faults.object_acl.write().insert(key.to_owned(), code);
    }

    /// Make every listing call fail with `code` until cleared.
    pub fn fail_listing(&self, code: StoreErrorCode) {
        *self.faults.listing.write() = Some(code);
    }

    /// Restore normal listing behavior.
    pub fn clear_listing_failure(&self) {
        *self.faults.listing.write() = None;
    }

    /// Make the bucket-ACL read fail with `code` until cleared.
    pub fn fail_bucket_acl(&self, code: StoreErrorCode) {
        *self.faults.bucket_acl.write() = Some(code);
    }

    /// Restore normal bucket-ACL behavior.
    pub fn clear_bucket_acl_failure(&self) {
        *self.faults.bucket_acl.write() = None;
    }

    fn acl_disabled_error(&self) -> StoreError {
        StoreError::new(
            StoreErrorCode::AccessControlListNotSupported,
            format!("bucket {} does not allow per-object ACLs", self.bucket),
        )
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn region(&self) -> &str {
        &self.region
    }

    async fn list_page(&self, request: ListPageRequest) -> StoreResult<RawListPage> {
        if let Some(code) = *self.faults.listing.read() {
            return Err(StoreError::new(code, "injected listing failure"));
        }

        let start_after = match &request.token {
            Some(token) => decode_continuation_token(token)?,
            None => String::new(),
        };
        let limit = request.max_keys.clamp(1, self.page_size);
        let use_delim = !request.delimiter.is_empty();

        let objects = self.objects.read();
        let mut page = RawListPage::default();
        let mut seen_prefixes: HashSet<String> = HashSet::new();
        let mut count = 0usize;
        let mut last_processed: Option<String> = None;
        let mut truncated = false;

        let range = objects.range::<String, _>((Bound::Excluded(&start_after), Bound::Unbounded));
        for (key, object) in range {
            if !key.starts_with(&request.prefix) {
                if key.as_str() < request.prefix.as_str() {
                    continue;
                }
                // Sorted keys: once past the prefix range, nothing else matches.
                break;
            }

            if use_delim {
                let rest = &key[request.prefix.len()..];
                if let Some(pos) = rest.find(&request.delimiter) {
                    let common =
                        format!("{}{}{}", request.prefix, &rest[..pos], request.delimiter);
                    if seen_prefixes.contains(&common) {
                        // Key rolls up into a prefix already in this page.
                        last_processed = Some(key.clone());
                        continue;
                    }
                    if count >= limit {
                        truncated = true;
                        break;
                    }
                    seen_prefixes.insert(common.clone());
                    page.common_prefixes.push(common);
                    count += 1;
                    last_processed = Some(key.clone());
                    continue;
                }
            }

            if count >= limit {
                truncated = true;
                break;
            }
            page.objects.push(RawObject {
                key: key.clone(),
                size: object.body.len() as u64,
                last_modified: object.last_modified,
            });
            count += 1;
            last_processed = Some(key.clone());
        }

        if truncated {
            page.next_token = last_processed.as_deref().map(encode_continuation_token);
        }

        trace!(
            prefix = %request.prefix,
            objects = page.objects.len(),
            common_prefixes = page.common_prefixes.len(),
            truncated,
            "memory store listed page"
        );
        Ok(page)
    }

    async fn head_object(&self, key: &str) -> StoreResult<ObjectHead> {
        let objects = self.objects.read();
        let object = objects
            .get(key)
            .ok_or_else(|| StoreError::new(StoreErrorCode::NoSuchKey, key))?;
        Ok(ObjectHead {
            key: key.to_owned(),
            size: object.body.len() as u64,
            last_modified: object.last_modified,
            etag: object.etag.clone(),
        })
    }

    async fn get_bucket_acl(&self) -> StoreResult<ObjectAcl> {
        if let Some(code) = *self.faults.bucket_acl.read() {
            return Err(StoreError::new(code, "injected bucket ACL failure"));
        }
        if !self.acl_enabled {
            return Err(self.acl_disabled_error());
        }
        Ok(ObjectAcl {
            owner_id: self.owner_id.clone(),
            grants: AccessLevel::Private
                .to_grants(&self.owner_id)
                .unwrap_or_default(),
        })
    }

    async fn get_object_acl(&self, key: &str) -> StoreResult<ObjectAcl> {
        if let Some(code) = self.faults.object_acl.read().get(key) {
            return Err(StoreError::new(*code, "injected object ACL failure"));
        }
        if !self.acl_enabled {
            return Err(self.acl_disabled_error());
        }
        let objects = self.objects.read();
        let object = objects
            .get(key)
            .ok_or_else(|| StoreError::new(StoreErrorCode::NoSuchKey, key))?;
        Ok(ObjectAcl {
            owner_id: self.owner_id.clone(),
            grants: object.grants.clone(),
        })
    }

    async fn put_object_acl(&self, key: &str, level: AccessLevel) -> StoreResult<()> {
        if let Some(code) = self.faults.object_acl.read().get(key) {
            return Err(StoreError::new(*code, "injected object ACL failure"));
        }
        if !self.acl_enabled {
            return Err(self.acl_disabled_error());
        }
        let grants = level.to_grants(&self.owner_id).ok_or_else(|| {
            StoreError::new(
                StoreErrorCode::InvalidRequest,
                format!("access level {level} has no grant representation"),
            )
        })?;
        let mut objects = self.objects.write();
        let object = objects
            .get_mut(key)
            .ok_or_else(|| StoreError::new(StoreErrorCode::NoSuchKey, key))?;
        object.grants = grants;
        Ok(())
    }

    async fn put_object(
        &self,
        key: &str,
        body: ByteStream,
        options: PutObjectOptions,
    ) -> StoreResult<PutResult> {
        if let Some(code) = self.faults.put.write().remove(key) {
            return Err(StoreError::new(code, "injected write failure"));
        }

        let mut body = body;
        let mut buf = BytesMut::new();
        while let Some(chunk) = body.next().await {
            let chunk =
                chunk.map_err(|e| StoreError::new(StoreErrorCode::InvalidRequest, e.to_string()))?;
            buf.extend_from_slice(&chunk);
        }
        let body = buf.freeze();
        let etag = compute_etag(&body);
        let size = body.len() as u64;

        let object = StoredObject {
            etag: etag.clone(),
            last_modified: Utc::now(),
            grants: AccessLevel::Private
                .to_grants(&self.owner_id)
                .unwrap_or_default(),
            server_side_encryption: options.server_side_encryption,
            body,
        };
        self.objects.write().insert(key.to_owned(), object);
        Ok(PutResult { size, etag })
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> StoreResult<String> {
        self.presign_calls.fetch_add(1, Ordering::Relaxed);

        let mut sig = [0u8; 32];
        rand::rng().fill(&mut sig);
        let encoded_key = percent_encode(key.as_bytes(), KEY_ENCODE_SET);
        let date = Utc::now().format("%Y%m%dT%H%M%SZ");
        Ok(format!(
            "https://{}.object-store.local/{}?X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Date={}&X-Amz-Expires={}&X-Amz-SignedHeaders=host&X-Amz-Signature={}",
            self.bucket,
            encoded_key,
            date,
            expires_in.as_secs(),
            hex::encode(sig)
        ))
    }
}

/// Compute the quoted MD5 ETag of a payload.
fn compute_etag(body: &[u8]) -> String {
    let digest = Md5::digest(body);
    format!("\"{}\"", hex::encode(digest))
}

/// Encode a key as an opaque base64 continuation token.
fn encode_continuation_token(key: &str) -> String {
    BASE64_STANDARD.encode(key.as_bytes())
}

/// Decode a continuation token back to the key it points past.
fn decode_continuation_token(token: &str) -> StoreResult<String> {
    let bytes = BASE64_STANDARD.decode(token).map_err(|_| {
        StoreError::new(StoreErrorCode::InvalidRequest, "invalid continuation token")
    })?;
    String::from_utf8(bytes).map_err(|_| {
        StoreError::new(
            StoreErrorCode::InvalidRequest,
            "continuation token contains invalid UTF-8",
        )
    })
}
