//! Customer Module
//!
//! A small customer directory over `SQLite`:
//!
//! - `GET /customers` lists every customer and is gated to roles 2, 3 and 4
//! - `GET /customers/{last_name}` looks customers up by last name and is open
//!
//! ## Layout
//!
//! - `api::rest` - routes, handlers, DTOs and problem mapping
//! - `domain` - `Customer`, the repository port and the service
//! - `infra::storage` - sea-orm entity, migrations and repository
//! - `module` - lifecycle wiring (`migrate`, `init`, `register_rest`)

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use module::CustomerModule;
