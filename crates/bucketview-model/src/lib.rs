//! Shared data types for the BucketView browsing and transfer core.
//!
//! This crate holds the plain, wire-representable types exchanged between
//! the core and its consumers: listing entries and pages, access levels and
//! their native grant representation, per-file upload outcomes, the ACL
//! capability tri-state, and bucket metadata. It carries no I/O and no
//! store-specific logic.

pub mod access;
pub mod bucket;
pub mod capability;
pub mod listing;
pub mod upload;

pub use access::{
    AccessLevel, Grant, Grantee, ObjectAcl, ParseAccessLevelError, Permission,
    ALL_USERS_GROUP_URI, AUTHENTICATED_USERS_GROUP_URI,
};
pub use bucket::BucketInfo;
pub use capability::AclCapability;
pub use listing::{ListingEntry, ListingPage};
pub use upload::{UploadOutcome, UploadStatus};
