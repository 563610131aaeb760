use sea_orm_migration::prelude::*;

mod m20250601_000001_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250601_000001_create_users::Migration)]
    }

    // Each module tracks its own migrations so modules can share one database.
    fn migration_table_name() -> DynIden {
        Alias::new("identity_migrations").into_iden()
    }
}
