pub use sea_orm_migration::prelude::*;

mod m20250911_000001_users_and_roles;
mod m20250911_000002_employees;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250911_000001_users_and_roles::Migration),
            Box::new(m20250911_000002_employees::Migration),
        ]
    }
}
