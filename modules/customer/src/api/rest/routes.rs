use std::sync::Arc;

use axum::{Extension, Router};
use role_guard::{OperationBuilder, PermissionDeclaration, PermissionRegistry, RegistryError};

use crate::api::rest::handlers;
use crate::domain::service::Service;
use crate::infra::storage::sea_orm_repo::SeaOrmCustomerRepository;

pub type ConcreteService = Service<SeaOrmCustomerRepository>;

/// Roles allowed to list every customer.
pub const LIST_CUSTOMERS_ROLES: [i32; 3] = [2, 3, 4];

/// # Errors
/// Returns [`RegistryError`] if one of the routes is already registered.
pub fn register_routes(
    mut router: Router,
    registry: &PermissionRegistry,
    service: Arc<ConcreteService>,
) -> Result<Router, RegistryError> {
    router = OperationBuilder::get("/customers")
        .operation_id("customer.list_customers")
        .summary("List all customers")
        .permission(PermissionDeclaration::roles(LIST_CUSTOMERS_ROLES))
        .handler(handlers::list_customers)
        .register(router, registry)?;

    router = OperationBuilder::get("/customers/{last_name}")
        .operation_id("customer.find_by_last_name")
        .summary("Find customers by last name")
        .handler(handlers::find_by_last_name)
        .register(router, registry)?;

    Ok(router.layer(Extension(service)))
}
