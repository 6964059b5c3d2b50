//! Access levels and their native grant representation.
//!
//! [`AccessLevel`] is the small, user-facing designation set. The object
//! store itself deals in grant lists ([`Grant`], [`Grantee`],
//! [`Permission`]); the bijective mapping between the two lives here, in
//! [`AccessLevel::to_grants`] and [`AccessLevel::from_grants`], so every
//! component reduces and materializes grants the same way. Grant
//! combinations with no corresponding level reduce to
//! [`AccessLevel::Unknown`] instead of failing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// URI of the `AllUsers` group (anonymous access).
pub const ALL_USERS_GROUP_URI: &str = "http://acs.amazonaws.com/groups/global/AllUsers";

/// URI of the `AuthenticatedUsers` group (any authenticated principal).
pub const AUTHENTICATED_USERS_GROUP_URI: &str =
    "http://acs.amazonaws.com/groups/global/AuthenticatedUsers";

// ---------------------------------------------------------------------------
// AccessLevel
// ---------------------------------------------------------------------------

/// User-facing access designation for a single object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessLevel {
    /// Owner gets `FULL_CONTROL`. No one else has access rights (store default).
    #[default]
    Private,
    /// Owner gets `FULL_CONTROL`. The `AllUsers` group gets `READ` access.
    PublicRead,
    /// Owner gets `FULL_CONTROL`. The `AllUsers` group gets `READ` and `WRITE` access.
    PublicReadWrite,
    /// Owner gets `FULL_CONTROL`. The `AuthenticatedUsers` group gets `READ` access.
    AuthenticatedRead,
    /// The object's grant set does not correspond to any known level.
    ///
    /// `Unknown` is a reporting sentinel only; it cannot be requested on an
    /// upload or passed to an access-level update.
    Unknown,
}

impl AccessLevel {
    /// Return the store's canned spelling of the level.
    ///
    /// [`AccessLevel::Unknown`] has no canned spelling and returns `"unknown"`,
    /// which round-trips through neither [`FromStr`] nor the store.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AuthenticatedRead => "authenticated-read",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this level can be requested by a caller.
    #[must_use]
    pub fn is_requestable(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Materialize the grant set for this level, owned by `owner_id`.
    ///
    /// Returns `None` for [`AccessLevel::Unknown`], which has no grant
    /// representation.
    #[must_use]
    pub fn to_grants(&self, owner_id: &str) -> Option<Vec<Grant>> {
        let owner_grant = Grant {
            grantee: Grantee::CanonicalUser {
                id: owner_id.to_owned(),
            },
            permission: Permission::FullControl,
        };
        let group = |uri: &str, permission| Grant {
            grantee: Grantee::Group {
                uri: uri.to_owned(),
            },
            permission,
        };

        let grants = match self {
            Self::Private => vec![owner_grant],
            Self::PublicRead => vec![owner_grant, group(ALL_USERS_GROUP_URI, Permission::Read)],
            Self::PublicReadWrite => vec![
                owner_grant,
                group(ALL_USERS_GROUP_URI, Permission::Read),
                group(ALL_USERS_GROUP_URI, Permission::Write),
            ],
            Self::AuthenticatedRead => vec![
                owner_grant,
                group(AUTHENTICATED_USERS_GROUP_URI, Permission::Read),
            ],
            Self::Unknown => return None,
        };
        Some(grants)
    }

    /// Reduce a native grant set to the nearest access level.
    ///
    /// The reduction is the inverse of [`AccessLevel::to_grants`]: any grant
    /// the materialization never produces (a non-owner canonical user, an
    /// unrecognized group URI, an unexpected permission) makes the whole set
    /// [`AccessLevel::Unknown`]. An empty grant list is also `Unknown`: the
    /// store always reports at least the owner grant.
    #[must_use]
    pub fn from_grants(acl: &ObjectAcl) -> Self {
        if acl.grants.is_empty() {
            return Self::Unknown;
        }

        let mut all_users_read = false;
        let mut all_users_write = false;
        let mut authenticated_read = false;

        for grant in &acl.grants {
            match &grant.grantee {
                Grantee::CanonicalUser { id } => {
                    if *id != acl.owner_id || grant.permission != Permission::FullControl {
                        return Self::Unknown;
                    }
                }
                Grantee::Group { uri } => match (uri.as_str(), grant.permission) {
                    (ALL_USERS_GROUP_URI, Permission::Read) => all_users_read = true,
                    (ALL_USERS_GROUP_URI, Permission::Write) => all_users_write = true,
                    (AUTHENTICATED_USERS_GROUP_URI, Permission::Read) => {
                        authenticated_read = true;
                    }
                    _ => return Self::Unknown,
                },
                Grantee::Email { .. } => return Self::Unknown,
            }
        }

        match (all_users_read, all_users_write, authenticated_read) {
            (false, false, false) => Self::Private,
            (true, false, false) => Self::PublicRead,
            (true, true, false) => Self::PublicReadWrite,
            (false, false, true) => Self::AuthenticatedRead,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an [`AccessLevel`] from a string fails.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown access level: {0}")]
pub struct ParseAccessLevelError(String);

impl FromStr for AccessLevel {
    type Err = ParseAccessLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Self::Private),
            "public-read" => Ok(Self::PublicRead),
            "public-read-write" => Ok(Self::PublicReadWrite),
            "authenticated-read" => Ok(Self::AuthenticatedRead),
            _ => Err(ParseAccessLevelError(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Grant / Grantee / Permission
// ---------------------------------------------------------------------------

/// An ACL grant that pairs a grantee with a permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    /// The entity receiving the permission.
    pub grantee: Grantee,
    /// The permission granted.
    pub permission: Permission,
}

/// A grantee in an ACL grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Grantee {
    /// A canonical user identified by an account ID.
    CanonicalUser {
        /// The canonical user ID.
        id: String,
    },
    /// A predefined store group, identified by URI.
    Group {
        /// The URI of the group (e.g. [`ALL_USERS_GROUP_URI`]).
        uri: String,
    },
    /// A grantee identified by email (legacy, seldom used).
    Email {
        /// The email address of the grantee.
        email: String,
    },
}

/// A permission that can be granted to a grantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    /// Grants full control (READ, WRITE, READ_ACP, WRITE_ACP).
    FullControl,
    /// Allows the grantee to read the object data.
    Read,
    /// Allows the grantee to overwrite the object.
    Write,
    /// Allows the grantee to read the object ACL.
    ReadAcp,
    /// Allows the grantee to write the object ACL.
    WriteAcp,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FullControl => "FULL_CONTROL",
            Self::Read => "READ",
            Self::Write => "WRITE",
            Self::ReadAcp => "READ_ACP",
            Self::WriteAcp => "WRITE_ACP",
        };
        f.write_str(s)
    }
}

/// The full ACL of one object: its owner and the grant list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAcl {
    /// Canonical ID of the object owner.
    pub owner_id: String,
    /// The grants attached to the object.
    pub grants: Vec<Grant>,
}
