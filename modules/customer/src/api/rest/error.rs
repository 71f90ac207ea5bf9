use axum::http::StatusCode;
use demo_kit::Problem;

use crate::domain::error::DomainError;

/// Map domain errors to RFC 9457 problems.
#[must_use]
pub fn domain_error_to_problem(e: &DomainError) -> Problem {
    match e {
        DomainError::Validation { .. } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error", e.to_string())
        }
        DomainError::Database(_) => {
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
