//! Service errors
//!
//! Every failed AWS call is reduced to a [`ServiceError`] carrying the
//! provider error code, so callers can branch on codes such as
//! `NoSuchEntity` without depending on per-operation SDK error enums.

use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata};
use thiserror::Error;

/// Error code IAM returns when a role or policy does not exist
pub const NO_SUCH_ENTITY: &str = "NoSuchEntity";

/// A failure returned by an external AWS API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{service} {operation} failed: {}: {message}", .code.as_deref().unwrap_or("Unknown"))]
pub struct ServiceError {
    pub service: &'static str,
    pub operation: &'static str,
    pub code: Option<String>,
    pub message: String,
}

impl ServiceError {
    pub fn new(
        service: &'static str,
        operation: &'static str,
        code: Option<&str>,
        message: &str,
    ) -> Self {
        Self {
            service,
            operation,
            code: code.map(|c| c.to_string()),
            message: message.to_string(),
        }
    }

    /// Build from any SDK error, keeping the provider code and message
    pub fn from_sdk<E>(service: &'static str, operation: &'static str, err: E) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
    {
        let code = err.code().map(|c| c.to_string());
        let message = err
            .message()
            .map(|m| m.to_string())
            .unwrap_or_else(|| DisplayErrorContext(&err).to_string());

        Self {
            service,
            operation,
            code,
            message,
        }
    }

    /// Whether the provider returned the given error code
    pub fn is_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

/// Closure for `map_err` that converts an SDK error into a [`ServiceError`]
pub(crate) fn sdk_error<E>(
    service: &'static str,
    operation: &'static str,
) -> impl FnOnce(E) -> ServiceError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    move |err| {
        let err = ServiceError::from_sdk(service, operation, err);
        tracing::debug!("{}", err);
        err
    }
}

/// Format a service error for display on the command line
pub fn format_service_error(error: &ServiceError) -> String {
    let code = error.code.as_deref().unwrap_or("");

    match code {
        "AccessDenied" | "AccessDeniedException" | "UnauthorizedOperation" => format!(
            "Permission denied calling {} {}. Check your IAM permissions.",
            error.service, error.operation
        ),
        "ExpiredToken" | "ExpiredTokenException" | "InvalidClientTokenId"
        | "UnrecognizedClientException" => {
            "Authentication failed. Refresh your AWS credentials and retry.".to_string()
        }
        "Throttling" | "ThrottlingException" | "TooManyRequestsException" => {
            "Rate limit exceeded. Please try again later.".to_string()
        }
        "AlreadyExistsException" | "EntityAlreadyExists" | "ConflictException" => {
            "Resource conflict. The resource may already exist.".to_string()
        }
        NO_SUCH_ENTITY | "EntityNotFoundException" | "ResourceNotFoundException"
        | "NotFoundException" => format!("{} {}: resource not found.", error.service, error.operation),
        _ => error.to_string(),
    }
}
