use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use demo_kit::{DatabaseCapability, Module, ModuleCtx, RestApiCapability, run_migrator};
use role_guard::PermissionRegistry;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::api::rest::routes::{self, ConcreteService};
use crate::config::BlogConfig;
use crate::domain::service::{BlogProperties, Service};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::sea_orm_repo::{SeaOrmArticleRepository, SeaOrmUserRepository};

pub const MODULE_NAME: &str = "blog";

pub struct BlogModule {
    service: arc_swap::ArcSwapOption<ConcreteService>,
}

impl Default for BlogModule {
    fn default() -> Self {
        Self {
            service: arc_swap::ArcSwapOption::from(None),
        }
    }
}

#[async_trait]
impl DatabaseCapability for BlogModule {
    async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running blog migrations");
        run_migrator::<Migrator>(db).await?;
        Ok(())
    }
}

#[async_trait]
impl Module for BlogModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing blog module");

        let cfg: BlogConfig = ctx.config()?;
        let properties = BlogProperties {
            title: cfg.title,
            banner: cfg.banner,
        };
        let service = Arc::new(Service::new(
            ctx.db().clone(),
            Arc::new(SeaOrmUserRepository::new()),
            Arc::new(SeaOrmArticleRepository::new()),
            properties,
        ));

        if cfg.seed {
            service
                .seed()
                .await
                .map_err(|e| anyhow::anyhow!("failed to seed blog: {e}"))?;
        }

        self.service.store(Some(service));
        Ok(())
    }
}

impl RestApiCapability for BlogModule {
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
        info!("Blog module: REST routes registered");
        Ok(router)
    }
}
