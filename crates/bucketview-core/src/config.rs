//! Core configuration.
//!
//! Provides [`Config`] for the browsing and transfer core. Values are loaded
//! from environment variables via [`Config::from_env`] or built explicitly
//! with the typed builder.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default cap on entries per listing call.
const DEFAULT_MAX_LISTING_ENTRIES: usize = 1000;

/// Default maximum upload size: 100 MiB.
const DEFAULT_MAX_UPLOAD_SIZE: u64 = 100 * 1024 * 1024;

/// Default download-link lifetime: one hour.
const DEFAULT_LINK_TTL_SECS: u64 = 3600;

/// Default upper bound on download-link lifetime: seven days.
const DEFAULT_MAX_LINK_TTL_SECS: u64 = 7 * 24 * 3600;

/// Default per-call store deadline.
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;

/// Browsing and transfer core configuration.
///
/// # Examples
///
/// ```
/// use bucketview_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.max_listing_entries, 1000);
/// assert_eq!(config.default_link_ttl_secs, 3600);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Name of the browsed bucket.
    #[builder(default = String::from("bucketview"))]
    pub bucket_name: String,

    /// Region the bucket lives in.
    #[builder(default = String::from("us-east-1"))]
    pub region: String,

    /// Cap on total entries returned by one listing call. Beyond this the
    /// caller is handed a continuation token instead.
    #[builder(default = DEFAULT_MAX_LISTING_ENTRIES)]
    pub max_listing_entries: usize,

    /// Maximum accepted size, in bytes, of a single uploaded file.
    #[builder(default = DEFAULT_MAX_UPLOAD_SIZE)]
    pub max_upload_size: u64,

    /// Whether uploads request server-side encryption from the store.
    #[builder(default = true)]
    pub server_side_encryption: bool,

    /// Download-link lifetime used when the caller does not pick one.
    #[builder(default = DEFAULT_LINK_TTL_SECS)]
    pub default_link_ttl_secs: u64,

    /// Upper bound on caller-requested download-link lifetimes.
    #[builder(default = DEFAULT_MAX_LINK_TTL_SECS)]
    pub max_link_ttl_secs: u64,

    /// Deadline applied to every individual store round trip.
    #[builder(default = DEFAULT_STORE_TIMEOUT_SECS)]
    pub store_timeout_secs: u64,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bucket_name: String::from("bucketview"),
            region: String::from("us-east-1"),
            max_listing_entries: DEFAULT_MAX_LISTING_ENTRIES,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            server_side_encryption: true,
            default_link_ttl_secs: DEFAULT_LINK_TTL_SECS,
            max_link_ttl_secs: DEFAULT_MAX_LINK_TTL_SECS,
            store_timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
            log_level: String::from("info"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `BUCKET_NAME` | `bucketview` |
    /// | `BUCKET_REGION` | `us-east-1` |
    /// | `MAX_LISTING_ENTRIES` | `1000` |
    /// | `MAX_UPLOAD_SIZE` | `104857600` |
    /// | `SERVER_SIDE_ENCRYPTION` | `true` |
    /// | `DEFAULT_LINK_TTL_SECS` | `3600` |
    /// | `MAX_LINK_TTL_SECS` | `604800` |
    /// | `STORE_TIMEOUT_SECS` | `30` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("BUCKET_NAME") {
            config.bucket_name = v;
        }
        if let Ok(v) = std::env::var("BUCKET_REGION") {
            config.region = v;
        }
        if let Ok(v) = std::env::var("MAX_LISTING_ENTRIES") {
            if let Ok(n) = v.parse::<usize>() {
                config.max_listing_entries = n;
            }
        }
        if let Ok(v) = std::env::var("MAX_UPLOAD_SIZE") {
            if let Ok(n) = v.parse::<u64>() {
                config.max_upload_size = n;
            }
        }
        if let Ok(v) = std::env::var("SERVER_SIDE_ENCRYPTION") {
            config.server_side_encryption = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("DEFAULT_LINK_TTL_SECS") {
            if let Ok(n) = v.parse::<u64>() {
                config.default_link_ttl_secs = n;
            }
        }
        if let Ok(v) = std::env::var("MAX_LINK_TTL_SECS") {
            if let Ok(n) = v.parse::<u64>() {
                config.max_link_ttl_secs = n;
            }
        }
        if let Ok(v) = std::env::var("STORE_TIMEOUT_SECS") {
            if let Ok(n) = v.parse::<u64>() {
                config.store_timeout_secs = n;
            }
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }

    /// The per-call store deadline as a [`Duration`].
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }

    /// The default link lifetime as a [`Duration`].
    #[must_use]
    pub fn default_link_ttl(&self) -> Duration {
        Duration::from_secs(self.default_link_ttl_secs)
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
