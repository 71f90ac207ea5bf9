use std::sync::Arc;

use axum::{Extension, Router};
use role_guard::{OperationBuilder, PermissionRegistry, RegistryError};

use crate::api::rest::handlers;
use crate::domain::service::Service;
use crate::infra::storage::sea_orm_repo::{SeaOrmArticleRepository, SeaOrmUserRepository};

pub type ConcreteService = Service<SeaOrmUserRepository, SeaOrmArticleRepository>;

/// # Errors
/// Returns [`RegistryError`] if one of the routes is already registered.
pub fn register_routes(
    mut router: Router,
    registry: &PermissionRegistry,
    service: Arc<ConcreteService>,
) -> Result<Router, RegistryError> {
    router = OperationBuilder::get("/home")
        .operation_id("blog.home")
        .summary("Greeting")
        .handler(handlers::home)
        .register(router, registry)?;

    router = OperationBuilder::get("/")
        .operation_id("blog.list_rendered_articles")
        .summary("Blog index, newest article first")
        .handler(handlers::list_rendered_articles)
        .register(router, registry)?;

    router = OperationBuilder::get("/article/{slug}")
        .operation_id("blog.get_rendered_article")
        .summary("Single article page")
        .handler(handlers::get_rendered_article)
        .register(router, registry)?;

    router = OperationBuilder::get("/blogProperties")
        .operation_id("blog.properties")
        .summary("Blog title and banner")
        .handler(handlers::blog_properties)
        .register(router, registry)?;

    router = OperationBuilder::get("/api/article/")
        .operation_id("blog.api.list_articles")
        .summary("List stored articles")
        .handler(handlers::list_articles)
        .register(router, registry)?;

    router = OperationBuilder::get("/api/article/{slug}")
        .operation_id("blog.api.get_article")
        .summary("Get a stored article by slug")
        .handler(handlers::get_article)
        .register(router, registry)?;

    router = OperationBuilder::get("/api/user/")
        .operation_id("blog.api.list_users")
        .summary("List users")
        .handler(handlers::list_users)
        .register(router, registry)?;

    router = OperationBuilder::get("/api/user/{login}")
        .operation_id("blog.api.get_user")
        .summary("Get a user by login")
        .handler(handlers::get_user)
        .register(router, registry)?;

    Ok(router.layer(Extension(service)))
}
