pub mod error;
pub mod format;
pub mod model;
pub mod repo;
pub mod service;
