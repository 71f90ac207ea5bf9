use serde::de::DeserializeOwned;
use sea_orm::DatabaseConnection;

/// What a module gets during `init`.
#[derive(Debug, Clone)]
pub struct ModuleCtx {
    name: &'static str,
    db: DatabaseConnection,
    config: Option<serde_json::Value>,
}

impl ModuleCtx {
    #[must_use]
    pub fn new(name: &'static str, db: DatabaseConnection, config: Option<serde_json::Value>) -> Self {
        Self { name, db, config }
    }

    #[must_use]
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Typed module configuration. A module without a config section gets `T::default()`.
    ///
    /// # Errors
    /// Returns an error if the section does not deserialize into `T`.
    pub fn config<T>(&self) -> anyhow::Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match &self.config {
            None | Some(serde_json::Value::Null) => Ok(T::default()),
            Some(raw) => serde_json::from_value(raw.clone())
                .map_err(|e| anyhow::anyhow!("invalid config for module '{}': {e}", self.name)),
        }
    }
}
