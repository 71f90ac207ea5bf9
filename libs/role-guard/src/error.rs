use http::Method;
use thiserror::Error;

/// Errors raised while freezing the permission registry at startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("route {method} {path} is registered more than once")]
    DuplicateRoute { method: Method, path: String },

    #[error("operation id '{0}' is registered more than once")]
    DuplicateOperationId(String),
}

/// Invalid role guard configuration.
#[derive(Debug, Error)]
pub enum RoleGuardConfigError {
    #[error("deny_status {0} is not a valid HTTP status code")]
    InvalidDenyStatus(u16),

    #[error("role_param must not be empty")]
    EmptyRoleParam,
}
