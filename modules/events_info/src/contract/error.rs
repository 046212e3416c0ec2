use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventsInfoError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl EventsInfoError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for EventsInfoError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        let message = domain_error.to_string();
        match domain_error {
            EventNotFound { .. } | UserNotFound { .. } | EmailNotFound { .. } => {
                Self::not_found(message)
            }
            Forbidden { .. } => Self::forbidden(message),
            InvalidCredentials => Self::unauthorized(message),
            AttendeeAlreadyExists { .. } | EmailAlreadyExists { .. } => Self::conflict(message),
            Validation { field, message } => Self::validation(format!("{field}: {message}")),
            Database { .. } | Internal { .. } => Self::internal(),
        }
    }
}

impl From<crate::auth::error::AuthError> for EventsInfoError {
    fn from(e: crate::auth::error::AuthError) -> Self {
        Self::unauthorized(e.to_string())
    }
}
