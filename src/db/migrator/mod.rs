use sea_orm_migration::prelude::*;

mod m20260113_initial;
mod m20260119_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260113_initial::Migration),
            Box::new(m20260119_add_indexes::Migration),
        ]
    }
}
