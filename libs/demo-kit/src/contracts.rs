use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use role_guard::PermissionRegistry;
use sea_orm::DatabaseConnection;

use crate::context::ModuleCtx;

/// Core module: has a name and is initialized once before routes are registered.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()>;
}

/// Modules that own tables run their migrations before `init`.
#[async_trait]
pub trait DatabaseCapability: Send + Sync {
    async fn migrate(&self, db: &DatabaseConnection) -> anyhow::Result<()>;
}

/// Modules that expose HTTP routes.
///
/// Routes are added through `role_guard::OperationBuilder` so their permission
/// declarations land in `registry` next to the axum route.
pub trait RestApiCapability: Send + Sync {
    /// # Errors
    /// Fails when the module was not initialized.
    fn register_rest(&self, router: Router, registry: &PermissionRegistry)
    -> anyhow::Result<Router>;
}

/// A module together with its capabilities, as wired by the composition root.
#[derive(Clone)]
pub struct ModuleEntry {
    pub module: Arc<dyn Module>,
    pub db: Arc<dyn DatabaseCapability>,
    pub rest: Arc<dyn RestApiCapability>,
}

impl ModuleEntry {
    #[must_use]
    pub fn new<T>(module: T) -> Self
    where
        T: Module + DatabaseCapability + RestApiCapability,
    {
        let module = Arc::new(module);
        Self {
            db: module.clone(),
            rest: module.clone(),
            module,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.module.name()
    }
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}
