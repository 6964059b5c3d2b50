//! Transfer coordination for multi-file uploads.
//!
//! Every file in a batch is attempted independently: a failure marks that
//! file and never aborts or rolls back its siblings. Outcome order equals
//! input order, so `outcomes[i]` corresponds to `files[i]`. The requested
//! access level is applied after the write, and only when the capability
//! detector reports support; otherwise the object keeps the store default.

use std::fmt;

use bytes::Bytes;
use futures::StreamExt;
use tracing::{debug, info};

use bucketview_model::{AccessLevel, AclCapability, UploadOutcome, UploadStatus};

use crate::error::BrowseError;
use crate::path::{self, Prefix};
use crate::provider::BucketView;
use crate::store::{ByteStream, PutObjectOptions, byte_stream};

/// One file within an upload batch.
///
/// The caller owns the byte stream; the coordinator consumes it during the
/// call and never retains it.
pub struct UploadFile {
    /// The file name (a single path segment; joined onto the target prefix).
    pub name: String,
    /// The payload stream.
    pub body: ByteStream,
    /// Size the caller claims the payload has. A hint only: the bytes
    /// actually transferred are authoritative, and a mismatch is not an
    /// error.
    pub declared_size: Option<u64>,
}

impl UploadFile {
    /// Create an upload file from a streaming payload.
    #[must_use]
    pub fn new(name: impl Into<String>, body: ByteStream, declared_size: Option<u64>) -> Self {
        Self {
            name: name.into(),
            body,
            declared_size,
        }
    }

    /// Create an upload file from an in-memory payload.
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let declared_size = Some(body.len() as u64);
        Self {
            name: name.into(),
            body: byte_stream(body),
            declared_size,
        }
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("declared_size", &self.declared_size)
            .finish_non_exhaustive()
    }
}

/// A multi-file upload request.
#[derive(Debug)]
pub struct UploadRequest {
    /// Raw folder path the files are uploaded under.
    pub target_prefix: String,
    /// The files, in the order outcomes will be reported.
    pub files: Vec<UploadFile>,
    /// Access level requested for every file in the batch.
    pub access_level: AccessLevel,
}

impl UploadRequest {
    /// Create a request targeting `prefix` with the store-default access level.
    #[must_use]
    pub fn new(target_prefix: impl Into<String>, files: Vec<UploadFile>) -> Self {
        Self {
            target_prefix: target_prefix.into(),
            files,
            access_level: AccessLevel::default(),
        }
    }

    /// Set the requested access level.
    #[must_use]
    pub fn with_access_level(mut self, level: AccessLevel) -> Self {
        self.access_level = level;
        self
    }
}

impl BucketView {
    /// Upload a batch of files under the request's target prefix.
    ///
    /// Never fails as a whole: each file's outcome is reported individually,
    /// in input order. A bad target prefix or an unrequestable access level
    /// marks every file failed without touching the store.
    pub async fn upload_files(&self, request: UploadRequest) -> Vec<UploadOutcome> {
        let level = request.access_level;

        let precondition = if level.is_requestable() {
            path::normalize(&request.target_prefix)
        } else {
            Err(BrowseError::InvalidAccessLevel {
                level: level.as_str().to_owned(),
            })
        };

        let prefix = match precondition {
            Ok(prefix) => prefix,
            Err(err) => {
                let reason = err.to_string();
                return request
                    .files
                    .into_iter()
                    .map(|file| UploadOutcome {
                        name: file.name,
                        status: UploadStatus::Failure {
                            reason: reason.clone(),
                        },
                    })
                    .collect();
            }
        };

        // One capability read covers the whole batch; the cache makes this
        // cheap after the first probe.
        let capability = if level == AccessLevel::Private {
            AclCapability::Unknown
        } else {
            self.acl_capability().await
        };

        let mut outcomes = Vec::with_capacity(request.files.len());
        for file in request.files {
            let name = file.name.clone();
            let status = match self.upload_one(&prefix, file, level, capability).await {
                Ok(key) => UploadStatus::Success { key },
                Err(reason) => UploadStatus::Failure { reason },
            };
            outcomes.push(UploadOutcome { name, status });
        }
        outcomes
    }

    /// Upload a single file; the error side is the per-file failure reason.
    async fn upload_one(
        &self,
        prefix: &Prefix,
        file: UploadFile,
        level: AccessLevel,
        capability: AclCapability,
    ) -> Result<String, String> {
        let key = path::join(prefix, &file.name).map_err(|e| e.to_string())?;

        let body = cap_stream(file.body, self.config.max_upload_size);
        let options = PutObjectOptions {
            server_side_encryption: self.config.server_side_encryption,
        };
        let written = self
            .with_timeout(self.store.put_object(&key, body, options))
            .await
            .map_err(|e| e.to_string())?;

        if let Some(declared) = file.declared_size {
            if declared != written.size {
                // Declared size is a caller hint; the transferred bytes win.
                debug!(
                    key = %key,
                    declared,
                    actual = written.size,
                    "declared size differed from bytes written"
                );
            }
        }

        if level != AccessLevel::Private {
            if capability == AclCapability::Supported {
                self.with_timeout(self.store.put_object_acl(&key, level))
                    .await
                    .map_err(|e| e.to_string())?;
            } else {
                debug!(
                    key = %key,
                    capability = capability.as_str(),
                    "skipping access level on upload; object keeps the store default"
                );
            }
        }

        info!(key = %key, size = written.size, "uploaded object");
        Ok(key)
    }
}

/// Bound a payload stream to `max` bytes, failing the stream once exceeded.
fn cap_stream(body: ByteStream, max: u64) -> ByteStream {
    Box::pin(body.scan(0u64, move |written, chunk| {
        let item = match chunk {
            Ok(bytes) => {
                *written += bytes.len() as u64;
                if *written > max {
                    Err(std::io::Error::other(format!(
                        "upload exceeds maximum size of {max} bytes"
                    )))
                } else {
                    Ok(bytes)
                }
            }
            Err(e) => Err(e),
        };
        std::future::ready(Some(item))
    }))
}
