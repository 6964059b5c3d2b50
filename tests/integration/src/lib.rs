//! End-to-end tests for the BucketView core.
//!
//! These tests exercise the public [`BucketView`] facade against the
//! in-memory store, covering the full paths a routing layer would drive:
//! listing and pagination, batch uploads with partial failure, access-level
//! management and its degraded modes, download links, and folder creation.
//!
//! Run them with:
//! ```text
//! cargo test -p bucketview-integration
//! ```

use std::sync::Arc;
use std::sync::Once;

use bucketview_core::config::Config;
use bucketview_core::store::MemoryStore;
use bucketview_core::BucketView;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// A facade over a fresh ACL-enabled store, plus the typed store handle for
/// seeding and inspection.
#[must_use]
pub fn view_with_store(bucket: &str) -> (BucketView, Arc<MemoryStore>) {
    init_tracing();
    let store = Arc::new(MemoryStore::new(bucket));
    let view = BucketView::new(store.clone(), Config::default());
    (view, store)
}

/// Like [`view_with_store`], but over a bucket whose configuration disables
/// per-object ACLs.
#[must_use]
pub fn view_without_acls(bucket: &str) -> (BucketView, Arc<MemoryStore>) {
    init_tracing();
    let store = Arc::new(MemoryStore::new(bucket).with_acl_enabled(false));
    let view = BucketView::new(store.clone(), Config::default());
    (view, store)
}

/// A facade with a custom configuration.
#[must_use]
pub fn view_with_config(bucket: &str, config: Config) -> (BucketView, Arc<MemoryStore>) {
    init_tracing();
    let store = Arc::new(MemoryStore::new(bucket));
    let view = BucketView::new(store.clone(), config);
    (view, store)
}

mod test_access;
mod test_folder;
mod test_link;
mod test_listing;
mod test_upload;
