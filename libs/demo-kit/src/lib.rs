//! Demo kit
//!
//! The small runtime shared by the demo modules and the server binary:
//!
//! - [`contracts`] - `Module`, `DatabaseCapability` and `RestApiCapability` traits
//! - [`context`] - per-module context handed to `init` (database + typed config)
//! - [`problem`] - RFC 9457 problem responses
//! - [`db`] - sea-orm connection setup and migration runner
//! - [`config`] - layered configuration loading (defaults, YAML file, environment)
//! - [`logging`] - tracing subscriber bootstrap

pub mod config;
pub mod context;
pub mod contracts;
pub mod db;
pub mod logging;
pub mod problem;

pub use config::{ConfigError, load_layered};
pub use context::ModuleCtx;
pub use contracts::{DatabaseCapability, Module, ModuleEntry, RestApiCapability};
pub use db::{DbConfig, DbError, connect_db, run_migrator};
pub use logging::{LogFormat, LoggingConfig, init_tracing};
pub use problem::{ApiResult, Problem};
