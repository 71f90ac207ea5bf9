use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::domain::error::DomainError;
use crate::domain::model::{Customer, NewCustomer};
use crate::domain::repo::CustomerRepository;

use super::entity::{self, Entity as CustomerEntity};

#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmCustomerRepository;

impl SeaOrmCustomerRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn save<C: ConnectionTrait>(
        &self,
        conn: &C,
        customer: NewCustomer,
    ) -> Result<Customer, DomainError> {
        let model = entity::ActiveModel {
            id: ActiveValue::NotSet,
            first_name: ActiveValue::Set(customer.first_name),
            last_name: ActiveValue::Set(customer.last_name),
        }
        .insert(conn)
        .await?;
        Ok(model.into())
    }

    async fn find_all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<Customer>, DomainError> {
        let rows = CustomerEntity::find()
            .order_by_asc(entity::Column::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Customer>, DomainError> {
        Ok(CustomerEntity::find_by_id(id).one(conn).await?.map(Into::into))
    }

    async fn find_by_last_name<C: ConnectionTrait>(
        &self,
        conn: &C,
        last_name: &str,
    ) -> Result<Vec<Customer>, DomainError> {
        let rows = CustomerEntity::find()
            .filter(entity::Column::LastName.eq(last_name))
            .order_by_asc(entity::Column::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
