use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::info;

use super::error::DomainError;
use super::model::{Customer, NewCustomer};
use super::repo::CustomerRepository;

/// Customers inserted when seeding is enabled.
pub const DEMO_CUSTOMERS: [(&str, &str); 5] = [
    ("Jack", "Bauer"),
    ("Chloe", "O'Brian"),
    ("Kim", "Bauer"),
    ("David", "Palmer"),
    ("Michelle", "Dessler"),
];

pub struct Service<R: CustomerRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
}

impl<R: CustomerRepository> Service<R> {
    #[must_use]
    pub fn new(db: DatabaseConnection, repo: Arc<R>) -> Self {
        Self { db, repo }
    }

    /// # Errors
    /// Returns [`DomainError::Validation`] for blank names.
    pub async fn add_customer(&self, customer: NewCustomer) -> Result<Customer, DomainError> {
        if customer.first_name.trim().is_empty() {
            return Err(DomainError::validation("first_name", "must not be empty"));
        }
        if customer.last_name.trim().is_empty() {
            return Err(DomainError::validation("last_name", "must not be empty"));
        }
        let saved = self.repo.save(&self.db, customer).await?;
        tracing::debug!(customer.id = saved.id, "Customer saved");
        Ok(saved)
    }

    /// # Errors
    /// Returns [`DomainError::Database`] on storage failure.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, DomainError> {
        self.repo.find_all(&self.db).await
    }

    /// # Errors
    /// Returns [`DomainError::Database`] on storage failure.
    pub async fn get_customer(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        self.repo.find_by_id(&self.db, id).await
    }

    /// # Errors
    /// Returns [`DomainError::Database`] on storage failure.
    pub async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, DomainError> {
        self.repo.find_by_last_name(&self.db, last_name).await
    }

    /// Insert [`DEMO_CUSTOMERS`] and log a few lookups over them.
    ///
    /// Not idempotent: every call inserts another copy.
    ///
    /// # Errors
    /// Returns the first storage error.
    pub async fn seed(&self) -> Result<(), DomainError> {
        for (first, last) in DEMO_CUSTOMERS {
            self.add_customer(NewCustomer::new(first, last)).await?;
        }

        info!("Customers found with find_all():");
        for customer in self.list_customers().await? {
            info!("{customer}");
        }

        if let Some(customer) = self.get_customer(1).await? {
            info!("Customer found with find_by_id(1):");
            info!("{customer}");
        }

        info!("Customers found with find_by_last_name(\"Bauer\"):");
        for customer in self.find_by_last_name("Bauer").await? {
            info!("{customer}");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;
