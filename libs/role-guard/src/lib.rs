//! Role guard
//!
//! Gates every routed request against a per-handler role allow-list.
//!
//! ## Pieces
//!
//! - [`PermissionDeclaration`] - static metadata attached to a handler at registration time
//!   (`allowed_roles` set plus an informational `allowed_values` list).
//! - [`decide`] - the pure gating decision: no declaration allows, an empty role set denies,
//!   otherwise the numeric `role` request parameter must be a member of the set.
//! - [`deny_response`] - the fixed JSON body written when a request is denied.
//! - [`PermissionRegistry`] / [`OperationBuilder`] - explicit route registration that records
//!   each handler's declaration next to its axum route.
//! - [`role_guard_middleware`] - the axum middleware that ties the above together.
//!
//! ## Wiring
//!
//! ```ignore
//! let registry = PermissionRegistry::new();
//! let router = OperationBuilder::get("/customers")
//!     .operation_id("customer.find_all")
//!     .permission(PermissionDeclaration::roles([2, 3, 4]))
//!     .handler(find_all)
//!     .register(Router::new(), &registry)?;
//!
//! let state = RoleGuardState::new(registry.freeze()?, &RoleGuardConfig::default())?;
//! let router = router.route_layer(axum::middleware::from_fn_with_state(state, role_guard_middleware));
//! ```
//!
//! Declarations are keyed by the route pattern given to the builder. Routers
//! carrying declarations must be merged, not `nest`ed under a prefix: a nested
//! route's matched path includes the prefix and would not be found.

pub mod config;
pub mod decision;
pub mod declaration;
pub mod error;
pub mod middleware;
pub mod operation;
pub mod params;
pub mod registry;
pub mod response;

pub use config::RoleGuardConfig;
pub use decision::{Decision, DenyReason, decide};
pub use declaration::PermissionDeclaration;
pub use error::{RegistryError, RoleGuardConfigError};
pub use middleware::{RoleGuardState, role_guard_middleware};
pub use operation::OperationBuilder;
pub use params::RequestParams;
pub use registry::{HandlerEntry, PermissionRegistry, RolePolicy, RouteKey};
pub use response::{DENY_CODE, deny_body, deny_response};
