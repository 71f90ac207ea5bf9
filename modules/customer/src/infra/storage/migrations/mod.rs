use sea_orm_migration::prelude::*;

mod m20240601_000001_create_customers;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000001_create_customers::Migration)]
    }

    // Modules share one database; each keeps its own migration history.
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_customer").into_iden()
    }
}
