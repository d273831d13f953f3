//! Error types and handling
//!
//! Failures in the editor and administration workflows are surfaced to the
//! host UI through `AccessError`; the permission cache itself never returns
//! errors (its predicate is total and fail-open by design).

use thiserror::Error;

/// Access engine error types
#[derive(Debug, Error)]
pub enum AccessError {
    /// The permission backend could not be reached or the request failed
    /// in transit
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The permission backend answered with a non-success status
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// The backend's response body could not be decoded
    #[error("failed to decode backend response: {0}")]
    Decode(String),

    /// Editor validation: `save` requires a selected role
    #[error("no role selected")]
    NoRoleSelected,

    /// Editor validation: `save` requires a seeded, non-empty matrix
    #[error("permission matrix is empty; load the menu directory first")]
    EmptyMatrix,

    /// A menu id was not found in the loaded directory
    #[error("unknown menu: {0}")]
    UnknownMenu(String),
}

impl AccessError {
    /// Whether the failure came from the backend or the network, as opposed
    /// to local validation. Transport failures are retryable; validation
    /// failures are not.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AccessError::Http(_) | AccessError::Backend { .. } | AccessError::Decode(_)
        )
    }
}

/// Result type alias for engine operations
pub type AccessResult<T> = Result<T, AccessError>;
