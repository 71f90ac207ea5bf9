//! Blog Module
//!
//! Users and their articles, stored in `SQLite` and served over HTTP.
//! None of the blog routes carry a permission declaration, so the role
//! guard lets every request through.
//!
//! ## Layout
//!
//! - `api::rest` - routes, handlers, DTOs and problem mapping
//! - `domain` - models, slug and date formatting, repository ports, service
//! - `infra::storage` - sea-orm entities, migrations and repositories
//! - `module` - lifecycle wiring

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use module::BlogModule;
