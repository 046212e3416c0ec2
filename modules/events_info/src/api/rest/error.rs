use axum::http::StatusCode;
use modkit::api::problem::{Problem, ProblemResponse, ValidationError};

use crate::auth::error::AuthError;
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.eventhub.local/{}", code))
        .with_code(code)
        .with_instance(instance);

    ProblemResponse(problem)
}

pub fn map_auth_error(e: &AuthError, instance: &str) -> ProblemResponse {
    let code = match e {
        AuthError::MissingToken => "AUTH_MISSING_TOKEN",
        AuthError::Malformed => "AUTH_MALFORMED_TOKEN",
        AuthError::InvalidSignature => "AUTH_INVALID_SIGNATURE",
        AuthError::Expired => "AUTH_TOKEN_EXPIRED",
    };
    from_parts(
        StatusCode::UNAUTHORIZED,
        code,
        "Unauthorized",
        e.to_string(),
        instance,
    )
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::EventNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "EVENTS_NOT_FOUND",
            "Event not found",
            format!("Event with id {} was not found", id),
            instance,
        ),
        DomainError::UserNotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "USERS_NOT_FOUND",
            "User not found",
            format!("User with id {} was not found", id),
            instance,
        ),
        DomainError::EmailNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "USERS_NOT_FOUND",
            "User not found",
            "No user is registered with this email",
            instance,
        ),
        DomainError::Forbidden { event_id, .. } => from_parts(
            StatusCode::FORBIDDEN,
            "EVENTS_FORBIDDEN",
            "Forbidden",
            format!("You are not the owner of event {}", event_id),
            instance,
        ),
        DomainError::AttendeeAlreadyExists { event_id, user_id } => from_parts(
            StatusCode::CONFLICT,
            "ATTENDEES_CONFLICT",
            "Attendee already exists",
            format!("User {} already attends event {}", user_id, event_id),
            instance,
        ),
        DomainError::EmailAlreadyExists { email } => from_parts(
            StatusCode::CONFLICT,
            "USERS_EMAIL_CONFLICT",
            "Email already exists",
            format!("Email '{}' is already in use", email),
            instance,
        ),
        DomainError::Validation { field, message } => {
            let ProblemResponse(problem) = from_parts(
                StatusCode::BAD_REQUEST,
                "EVENTS_VALIDATION",
                "Validation error",
                format!("{}", e),
                instance,
            );
            ProblemResponse(problem.with_errors(vec![ValidationError {
                detail: message.clone(),
                pointer: format!("/{}", field),
            }]))
        }
        DomainError::InvalidCredentials => from_parts(
            StatusCode::UNAUTHORIZED,
            "AUTH_INVALID_CREDENTIALS",
            "Unauthorized",
            "Invalid password",
            instance,
        ),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
        DomainError::Internal { .. } => {
            tracing::error!(error = ?e, "Internal error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
                "Internal error",
                "An internal error occurred",
                instance,
            )
        }
    }
}
