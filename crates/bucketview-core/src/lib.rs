//! Object-namespace browsing and transfer core for BucketView.
//!
//! Maps a flat key/value object store onto a hierarchical folder view:
//! listing "folders" and objects under a prefix, multi-file upload with
//! per-file outcomes, per-object access-level management with graceful
//! degradation on buckets that disable ACLs, time-limited download links,
//! and folder placeholders. Transport-agnostic: the routing layer calls
//! plain async methods and serializes results itself.
//!
//! # Architecture
//!
//! ```text
//! Routing layer (HTTP, CLI, ...)
//!        |
//!        v
//! BucketView (facade: listing, transfer, access, links, folders)
//!        |                         |
//!        v                         v
//! AclCapabilityCache        ObjectStore trait
//! (per-bucket memoized       (cloud SDK adapter,
//!  probe)                     MemoryStore for tests)
//! ```
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use bucketview_core::config::Config;
//! use bucketview_core::store::MemoryStore;
//! use bucketview_core::BucketView;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> anyhow::Result<()> {
//! let store = Arc::new(MemoryStore::new("media"));
//! store.seed("docs/a.txt", "hello");
//! store.seed("docs/sub/b.txt", "world");
//!
//! let view = BucketView::new(store, Config::default());
//! let page = view.list_files("docs/", None).await?;
//! assert_eq!(page.entries.len(), 2); // Folder "sub", then object "a.txt"
//! # Ok(())
//! # }
//! ```

pub mod capability;
pub mod config;
pub mod error;
mod ops;
pub mod path;
pub mod provider;
pub mod store;

pub use capability::AclCapabilityCache;
pub use config::Config;
pub use error::{BrowseError, BrowseResult};
pub use ops::{UploadFile, UploadRequest};
pub use provider::BucketView;
