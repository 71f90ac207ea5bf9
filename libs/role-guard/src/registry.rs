//! Handler registry: the explicit mapping from a routed handler to its permission declaration.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use http::Method;

use crate::declaration::PermissionDeclaration;
use crate::error::RegistryError;

/// Identity of a routed handler: HTTP method plus the route pattern as
/// registered with axum (e.g. `/customers/{last_name}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: Method,
    pub path: String,
}

impl RouteKey {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

/// What the registry knows about one handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerEntry {
    pub operation_id: String,
    /// `None` means the handler carries no declaration and is not gated.
    pub permission: Option<PermissionDeclaration>,
}

/// Collects handler declarations while routers are being assembled.
///
/// Registration goes through `&self` so every module can share one registry.
/// Call [`PermissionRegistry::freeze`] once all routes are in.
#[derive(Debug, Default)]
pub struct PermissionRegistry {
    entries: DashMap<RouteKey, HandlerEntry>,
}

impl PermissionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a handler and its (optional) declaration.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateRoute`] if the route already has a handler.
    pub fn declare(&self, key: RouteKey, entry: HandlerEntry) -> Result<(), RegistryError> {
        match self.entries.entry(key) {
            Entry::Occupied(slot) => Err(RegistryError::DuplicateRoute {
                method: slot.key().method.clone(),
                path: slot.key().path.clone(),
            }),
            Entry::Vacant(slot) => {
                tracing::debug!(
                    method = %slot.key().method,
                    path = %slot.key().path,
                    operation_id = %entry.operation_id,
                    gated = entry.permission.is_some(),
                    "Handler declared"
                );
                slot.insert(entry);
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate and produce the read-only policy used at request time.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateOperationId`] when two handlers share an operation id.
    pub fn freeze(&self) -> Result<RolePolicy, RegistryError> {
        let mut by_method: HashMap<Method, HashMap<String, HandlerEntry>> = HashMap::new();
        let mut operation_ids = HashSet::new();

        for item in &self.entries {
            let (key, entry) = item.pair();
            if !operation_ids.insert(entry.operation_id.clone()) {
                return Err(RegistryError::DuplicateOperationId(
                    entry.operation_id.clone(),
                ));
            }
            by_method
                .entry(key.method.clone())
                .or_default()
                .insert(key.path.clone(), entry.clone());
        }

        let gated = by_method
            .values()
            .flat_map(HashMap::values)
            .filter(|e| e.permission.is_some())
            .count();
        tracing::info!(
            handlers = operation_ids.len(),
            gated_handlers = gated,
            "Role policy built from handler declarations"
        );

        Ok(RolePolicy {
            routes: Arc::new(by_method),
        })
    }
}

/// Frozen, shareable view of the registry.
#[derive(Debug, Clone, Default)]
pub struct RolePolicy {
    routes: Arc<HashMap<Method, HashMap<String, HandlerEntry>>>,
}

impl RolePolicy {
    /// Look up the handler registered for `(method, route pattern)`.
    ///
    /// `HEAD` falls back to the `GET` entry, since axum serves `HEAD` through `GET` handlers.
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&HandlerEntry> {
        let direct = self.routes.get(method).and_then(|m| m.get(path));
        if direct.is_none() && method == Method::HEAD {
            return self.routes.get(&Method::GET).and_then(|m| m.get(path));
        }
        direct
    }

    #[must_use]
    pub fn declaration(&self, method: &Method, path: &str) -> Option<&PermissionDeclaration> {
        self.lookup(method, path)
            .and_then(|e| e.permission.as_ref())
    }
}
