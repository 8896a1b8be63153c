pub use sea_orm_migration::prelude::*;

mod m20250601_000000_bootstrap;
mod m20250601_000001_create_users;
mod m20250602_000000_create_catalog;
mod m20250603_000000_create_cart_wishlist;
mod m20250604_000000_create_orders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000000_bootstrap::Migration),
            Box::new(m20250601_000001_create_users::Migration),
            Box::new(m20250602_000000_create_catalog::Migration),
            Box::new(m20250603_000000_create_cart_wishlist::Migration),
            Box::new(m20250604_000000_create_orders::Migration),
        ]
    }
}
