//! The gating decision.

use std::fmt;

use crate::declaration::PermissionDeclaration;
use crate::params::RequestParams;

/// Outcome of gating a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

/// Why a request was denied. All reasons produce the same client-facing body;
/// the distinction exists for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The handler declares a permission with an empty role list.
    NoRolesDeclared,
    /// The role parameter is a valid integer outside the allowed set.
    RoleNotAllowed { role: i32 },
    /// The handler requires a role but the request carries none.
    MissingRole,
    /// The role parameter is present but not a base-10 integer.
    MalformedRole { raw: String },
}

impl Decision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl DenyReason {
    /// Stable short label used as a log field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoRolesDeclared => "no_roles_declared",
            Self::RoleNotAllowed { .. } => "role_not_allowed",
            Self::MissingRole => "missing_role",
            Self::MalformedRole { .. } => "malformed_role",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRolesDeclared => f.write_str("handler declares no allowed roles"),
            Self::RoleNotAllowed { role } => write!(f, "role {role} is not allowed"),
            Self::MissingRole => f.write_str("role parameter is missing"),
            Self::MalformedRole { raw } => write!(f, "role parameter '{raw}' is not an integer"),
        }
    }
}

/// Decide whether a request may reach its handler.
///
/// - no declaration: allow, whatever the parameters;
/// - declaration with no roles: deny, whatever the parameters;
/// - otherwise `params[role_param]` must parse as an `i32` contained in the role set.
///
/// A missing or non-numeric role is a deny with its own reason rather than an error.
#[must_use]
pub fn decide(
    declaration: Option<&PermissionDeclaration>,
    params: &RequestParams,
    role_param: &str,
) -> Decision {
    let Some(declaration) = declaration else {
        return Decision::Allow;
    };

    if !declaration.has_roles() {
        return Decision::Deny(DenyReason::NoRolesDeclared);
    }

    let Some(raw) = params.get(role_param) else {
        return Decision::Deny(DenyReason::MissingRole);
    };

    match raw.parse::<i32>() {
        Ok(role) if declaration.permits(role) => Decision::Allow,
        Ok(role) => Decision::Deny(DenyReason::RoleNotAllowed { role }),
        Err(_) => Decision::Deny(DenyReason::MalformedRole {
            raw: raw.to_owned(),
        }),
    }
}
