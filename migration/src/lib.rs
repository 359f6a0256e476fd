pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_owners_table;
mod m20250301_000002_create_tenants_table;
mod m20250301_000003_create_properties_table;
mod m20250301_000004_create_contracts_table;
mod m20250301_000005_create_payments_table;
mod m20250302_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_owners_table::Migration),
            Box::new(m20250301_000002_create_tenants_table::Migration),
            Box::new(m20250301_000003_create_properties_table::Migration),
            Box::new(m20250301_000004_create_contracts_table::Migration),
            Box::new(m20250301_000005_create_payments_table::Migration),
            Box::new(m20250302_000001_add_indexes::Migration),
        ]
    }
}
