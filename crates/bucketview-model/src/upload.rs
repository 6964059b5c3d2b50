//! Per-file upload outcomes.

use serde::{Deserialize, Serialize};

/// Terminal status of one file within an upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum UploadStatus {
    /// The file was written (and, when requested and supported, its access
    /// level applied).
    Success {
        /// The key the file was written under.
        key: String,
    },
    /// The file could not be uploaded. Sibling files are unaffected.
    Failure {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// Outcome of one file in an upload batch.
///
/// The batch result is a sequence of these in input order, so `outcomes[i]`
/// always corresponds to `files[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    /// The file name as supplied by the caller.
    pub name: String,
    /// What happened to the file.
    #[serde(flatten)]
    pub status: UploadStatus,
}

impl UploadOutcome {
    /// Whether this file was uploaded successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, UploadStatus::Success { .. })
    }
}
