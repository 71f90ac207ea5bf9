use sea_orm_migration::prelude::*;

mod m20240601_000001_create_users;
mod m20240601_000002_create_articles;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_users::Migration),
            Box::new(m20240601_000002_create_articles::Migration),
        ]
    }

    // Modules share one database; each keeps its own migration history.
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_blog").into_iden()
    }
}
