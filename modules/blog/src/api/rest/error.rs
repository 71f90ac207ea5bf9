use axum::http::StatusCode;
use demo_kit::Problem;

use crate::domain::error::DomainError;

pub const ARTICLE_NOT_FOUND: &str = "This article does not exist";
pub const USER_NOT_FOUND: &str = "This user does not exist";

/// Map domain error to RFC 9457 Problem
#[must_use]
pub fn domain_error_to_problem(e: &DomainError) -> Problem {
    match e {
        DomainError::ArticleNotFound { .. } => Problem::not_found(ARTICLE_NOT_FOUND),
        DomainError::UserNotFound { .. } => Problem::not_found(USER_NOT_FOUND),
        DomainError::UnknownAuthor { .. } | DomainError::Validation { .. } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error", e.to_string())
        }
        DomainError::AlreadyExists { .. } => {
            Problem::new(StatusCode::CONFLICT, "Conflict", e.to_string())
        }
        DomainError::Database(_) => {
            // Log the details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            Problem::internal("An internal database error occurred")
        }
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e)
    }
}
