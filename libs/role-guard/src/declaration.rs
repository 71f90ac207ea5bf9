use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Static permission metadata attached to a single handler.
///
/// Declared once while routes are registered and never mutated afterwards.
/// `allowed_roles` is written as a sequence but behaves as a set: order and
/// duplicates have no effect on decisions. `allowed_values` is carried for
/// completeness and is not consulted by [`crate::decide`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PermissionDeclaration {
    pub allowed_values: Vec<String>,
    pub allowed_roles: BTreeSet<i32>,
}

impl PermissionDeclaration {
    /// Declaration that admits exactly the given role identifiers.
    #[must_use]
    pub fn roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        Self {
            allowed_values: Vec::new(),
            allowed_roles: roles.into_iter().collect(),
        }
    }

    /// Declaration with an empty role list: nobody is authorized.
    #[must_use]
    pub fn deny_all() -> Self {
        Self::default()
    }

    /// Attach informational values (kept for parity with the declaration shape).
    #[must_use]
    pub fn with_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn permits(&self, role: i32) -> bool {
        self.allowed_roles.contains(&role)
    }

    #[must_use]
    pub fn has_roles(&self) -> bool {
        !self.allowed_roles.is_empty()
    }
}
