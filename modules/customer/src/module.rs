use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use demo_kit::{DatabaseCapability, Module, ModuleCtx, RestApiCapability, run_migrator};
use role_guard::PermissionRegistry;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::api::rest::routes::{self, ConcreteService};
use crate::config::CustomerConfig;
use crate::domain::service::Service;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::SeaOrmCustomerRepository;

pub const MODULE_NAME: &str = "customer";

pub struct CustomerModule {
    service: arc_swap::ArcSwapOption<ConcreteService>,
}

impl Default for CustomerModule {
    fn default() -> Self {
        Self {
            service: arc_swap::ArcSwapOption::from(None),
        }
    }
}

#[async_trait]
impl DatabaseCapability for CustomerModule {
    async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running customer migrations");
        run_migrator::<Migrator>(db).await?;
        Ok(())
    }
}

#[async_trait]
impl Module for CustomerModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing customer module");

        let cfg: CustomerConfig = ctx.config()?;
        let service = Arc::new(Service::new(
            ctx.db().clone(),
            Arc::new(SeaOrmCustomerRepository::new()),
        ));

        if cfg.seed {
            service
                .seed()
                .await
                .map_err(|e| anyhow::anyhow!("failed to seed customers: {e}"))?;
        }

        self.service.store(Some(service));
        Ok(())
    }
}

impl RestApiCapability for CustomerModule {
    fn register_rest(
        &self,
        router: Router,
        registry: &PermissionRegistry,
    ) -> anyhow::Result<Router> {
        let service = self
            .service
            .load()
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?
            .clone();

        let router = routes::register_routes(router, registry, service)?;
        info!("Customer module: REST routes registered");
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_module_has_no_service() {
        let module = CustomerModule::default();
        assert!(module.service.load().is_none());
        assert_eq!(module.name(), "customer");
    }

    #[test]
    fn register_rest_before_init_fails() {
        let module = CustomerModule::default();
        let res = module.register_rest(Router::new(), &PermissionRegistry::new());
        assert!(res.is_err());
    }
}
