//! Helper errors

use thiserror::Error;

use crate::aws::error::{format_service_error, ServiceError};

/// A required domain object does not exist
///
/// Distinct from [`ServiceError`]: the calls succeeded, the object is absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("no reference store found in this account and region; create a reference store before continuing")]
    ReferenceStore,

    #[error("could not find reference {name}")]
    Reference { name: String },

    #[error("no shared resources found; verify that an Omics analytics store has been created")]
    SharedResources,

    #[error("no shared resources matching {store_type} store id {store_id} found")]
    MatchingSharedResource { store_type: String, store_id: String },

    #[error("shared resource {resource_arn} has no resource share")]
    ShareArn { resource_arn: String },

    #[error("resource share {arn} not found")]
    ResourceShare { arn: String },
}

/// Errors returned by the helpers
#[derive(Debug, Error)]
pub enum OmicsError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid policy document: {0}")]
    PolicyDocument(#[from] serde_json::Error),
}

impl OmicsError {
    /// The provider error, if this came from a service call
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            OmicsError::Service(err) => Some(err),
            _ => None,
        }
    }

    /// The missing object, if this is a not-found error
    pub fn not_found(&self) -> Option<&NotFound> {
        match self {
            OmicsError::NotFound(err) => Some(err),
            _ => None,
        }
    }
}

/// Format a helper error for display on the command line
pub fn format_error(error: &OmicsError) -> String {
    match error {
        OmicsError::Service(err) => format_service_error(err),
        other => other.to_string(),
    }
}
