use thiserror::Error;

use crate::domain::repo::StoreError;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Event not found: {id}")]
    EventNotFound { id: i64 },

    #[error("User not found: {id}")]
    UserNotFound { id: i64 },

    #[error("No user registered with email '{email}'")]
    EmailNotFound { email: String },

    #[error("User {user_id} does not own event {event_id}")]
    Forbidden { event_id: i64, user_id: i64 },

    #[error("User {user_id} already attends event {event_id}")]
    AttendeeAlreadyExists { event_id: i64, user_id: i64 },

    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid password")]
    InvalidCredentials,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn event_not_found(id: i64) -> Self {
        Self::EventNotFound { id }
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::UserNotFound { id }
    }

    pub fn email_not_found(email: impl Into<String>) -> Self {
        Self::EmailNotFound {
            email: email.into(),
        }
    }

    pub fn forbidden(event_id: i64, user_id: i64) -> Self {
        Self::Forbidden { event_id, user_id }
    }

    pub fn attendee_already_exists(event_id: i64, user_id: i64) -> Self {
        Self::AttendeeAlreadyExists { event_id, user_id }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        Self::database(format!("{e:#}"))
    }
}
