pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_admins_table;
mod m20260301_000002_create_content_tables;
mod m20260301_000003_create_portfolio_stats_function;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_admins_table::Migration),
            Box::new(m20260301_000002_create_content_tables::Migration),
            Box::new(m20260301_000003_create_portfolio_stats_function::Migration),
        ]
    }
}
