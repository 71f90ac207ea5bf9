use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::RoleGuardConfigError;

fn default_enabled() -> bool {
    true
}

fn default_deny_message() -> String {
    "no permission".to_owned()
}

fn default_deny_status() -> u16 {
    StatusCode::FORBIDDEN.as_u16()
}

fn default_role_param() -> String {
    "role".to_owned()
}

fn default_read_form_body() -> bool {
    true
}

fn default_form_body_limit_bytes() -> usize {
    64 * 1024
}

/// Role guard configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoleGuardConfig {
    /// When false the middleware lets every request through (declarations are still registered).
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Text placed in the `msg` field of the deny body.
    #[serde(default = "default_deny_message")]
    pub deny_message: String,

    /// HTTP status used for deny responses.
    #[serde(default = "default_deny_status")]
    pub deny_status: u16,

    /// Name of the request parameter carrying the caller's role.
    #[serde(default = "default_role_param")]
    pub role_param: String,

    /// Also look for the role in `application/x-www-form-urlencoded` bodies.
    #[serde(default = "default_read_form_body")]
    pub read_form_body: bool,

    /// Form bodies larger than this are not inspected.
    #[serde(default = "default_form_body_limit_bytes")]
    pub form_body_limit_bytes: usize,
}

impl Default for RoleGuardConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            deny_message: default_deny_message(),
            deny_status: default_deny_status(),
            role_param: default_role_param(),
            read_form_body: default_read_form_body(),
            form_body_limit_bytes: default_form_body_limit_bytes(),
        }
    }
}

impl RoleGuardConfig {
    /// Validated deny status.
    ///
    /// # Errors
    /// Returns [`RoleGuardConfigError::InvalidDenyStatus`] if `deny_status` is outside 100..=999.
    pub fn deny_status(&self) -> Result<StatusCode, RoleGuardConfigError> {
        StatusCode::from_u16(self.deny_status)
            .map_err(|_| RoleGuardConfigError::InvalidDenyStatus(self.deny_status))
    }

    /// Check every field that can be wrong.
    ///
    /// # Errors
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), RoleGuardConfigError> {
        self.deny_status()?;
        if self.role_param.trim().is_empty() {
            return Err(RoleGuardConfigError::EmptyRoleParam);
        }
        Ok(())
    }
}
