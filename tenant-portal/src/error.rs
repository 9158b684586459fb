use reqwest::StatusCode;
use thiserror::Error;

use crate::validation::FieldErrors;

/// Shown when a failure has no message meant for the user.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Failure of a call to the remote auth API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// The request never produced a response.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body could not be understood.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ApiError {
    /// Text suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Transport(_) | ApiError::UnexpectedResponse(_) => {
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            ApiError::UnexpectedResponse(_) => None,
        }
    }
}

/// Failure of a login request.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Validation error: {0}")]
    Invalid(FieldErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl LoginError {
    /// Whether the user has already been told about this failure.
    pub fn is_notified(&self) -> bool {
        matches!(self, LoginError::Api(_))
    }
}

impl From<FieldErrors> for LoginError {
    fn from(errors: FieldErrors) -> Self {
        LoginError::Invalid(errors)
    }
}
