//! Route registration that records permission declarations alongside axum routes.
//!
//! Type-state keeps `register()` unavailable until a handler is set.

use std::marker::PhantomData;

use axum::Router;
use axum::handler::Handler;
use axum::routing::{MethodFilter, MethodRouter};
use http::{Method, StatusCode};

use crate::declaration::PermissionDeclaration;
use crate::error::RegistryError;
use crate::registry::{HandlerEntry, PermissionRegistry, RouteKey};

/// Type-state markers.
pub mod state {
    /// No handler set yet.
    #[derive(Debug, Clone, Copy)]
    pub struct Missing;

    /// Handler set; the operation can be registered.
    #[derive(Debug, Clone, Copy)]
    pub struct Present;
}

use state::{Missing, Present};

/// Maps the handler type-state to the storage it needs.
pub trait HandlerSlot<S> {
    type Slot;
}

impl<S> HandlerSlot<S> for Missing {
    type Slot = ();
}

impl<S> HandlerSlot<S> for Present {
    type Slot = MethodRouter<S>;
}

/// Builder for one routed operation.
#[must_use]
pub struct OperationBuilder<H = Missing, S = ()>
where
    H: HandlerSlot<S>,
{
    method: Method,
    path: String,
    operation_id: Option<String>,
    summary: Option<String>,
    permission: Option<PermissionDeclaration>,
    method_router: <H as HandlerSlot<S>>::Slot,
    _has_handler: PhantomData<H>,
    _state: PhantomData<fn() -> S>,
}

impl<S> OperationBuilder<Missing, S> {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            operation_id: None,
            summary: None,
            permission: None,
            method_router: (),
            _has_handler: PhantomData,
            _state: PhantomData,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }
}

impl<H, S> OperationBuilder<H, S>
where
    H: HandlerSlot<S>,
{
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    pub fn summary(mut self, text: impl Into<String>) -> Self {
        self.summary = Some(text.into());
        self
    }

    /// Attach a permission declaration. Without this call the handler is ungated.
    pub fn permission(mut self, declaration: PermissionDeclaration) -> Self {
        self.permission = Some(declaration);
        self
    }

    /// Operation id, or one derived from method and path when none was set.
    #[must_use]
    pub fn resolved_operation_id(&self) -> String {
        self.operation_id.clone().unwrap_or_else(|| {
            format!(
                "{}:{}",
                self.method.as_str().to_lowercase(),
                self.path.replace(['/', '{', '}'], "_")
            )
        })
    }
}

impl<S> OperationBuilder<Missing, S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Set the handler; transitions to the registrable state.
    pub fn handler<F, T>(self, h: F) -> OperationBuilder<Present, S>
    where
        F: Handler<T, S> + Clone + Send + 'static,
        T: 'static,
    {
        // Mounted for exactly the declared method: the registry key must match what the router serves.
        let method_router = match MethodFilter::try_from(self.method.clone()) {
            Ok(filter) => axum::routing::on(filter, h),
            Err(_) => {
                tracing::warn!(
                    method = %self.method,
                    path = %self.path,
                    "Unsupported HTTP method; operation will answer 405"
                );
                axum::routing::any(|| async { StatusCode::METHOD_NOT_ALLOWED })
            }
        };

        OperationBuilder {
            method: self.method,
            path: self.path,
            operation_id: self.operation_id,
            summary: self.summary,
            permission: self.permission,
            method_router,
            _has_handler: PhantomData,
            _state: PhantomData,
        }
    }
}

impl<S> OperationBuilder<Present, S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Record the declaration in `registry`, then add the route to `router`.
    ///
    /// # Errors
    /// Returns [`RegistryError::DuplicateRoute`] if the method and path are already registered.
    pub fn register(
        self,
        router: Router<S>,
        registry: &PermissionRegistry,
    ) -> Result<Router<S>, RegistryError> {
        let operation_id = self.resolved_operation_id();
        if let Some(summary) = &self.summary {
            tracing::trace!(operation_id = %operation_id, summary = %summary, "Registering operation");
        }
        registry.declare(
            RouteKey::new(self.method.clone(), self.path.clone()),
            HandlerEntry {
                operation_id,
                permission: self.permission,
            },
        )?;
        Ok(router.route(&self.path, self.method_router))
    }
}
