use sea_orm_migration::prelude::*;

mod initial_001;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(initial_001::Migration)]
    }

    // Auth and notes migrators run against the same database; each keeps its
    // own bookkeeping table so one does not reject the other's entries.
    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("seaql_migrations_notes").into_iden()
    }
}
