use sea_orm_migration::prelude::*;

mod m20250601_000001_create_clients_by_owner;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250601_000001_create_clients_by_owner::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("clients_migrations").into_iden()
    }
}
