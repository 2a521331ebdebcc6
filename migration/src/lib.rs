pub use sea_orm_migration::prelude::*;

mod m20251101_000001_users;
mod m20251101_000002_donations;
mod m20251101_000003_requests;
mod m20251101_000004_ratings;
mod m20251101_000005_notifications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_users::Migration),
            Box::new(m20251101_000002_donations::Migration),
            Box::new(m20251101_000003_requests::Migration),
            Box::new(m20251101_000004_ratings::Migration),
            Box::new(m20251101_000005_notifications::Migration),
        ]
    }
}
