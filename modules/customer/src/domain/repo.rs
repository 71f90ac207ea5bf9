use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use super::error::DomainError;
use super::model::{Customer, NewCustomer};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn save<C: ConnectionTrait>(
        &self,
        conn: &C,
        customer: NewCustomer,
    ) -> Result<Customer, DomainError>;

    async fn find_all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<Customer>, DomainError>;

    async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Customer>, DomainError>;

    /// Exact, case-sensitive match, ordered by id.
    async fn find_by_last_name<C: ConnectionTrait>(
        &self,
        conn: &C,
        last_name: &str,
    ) -> Result<Vec<Customer>, DomainError>;
}
