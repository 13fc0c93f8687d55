//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;

// Re-export commonly used database components
pub use connection::{create_pool, health_check, run_migrations, DatabasePool};
pub use repositories::{
    BanRepository, CatalogRepository, DepositRepository, OrderRepository, UserRepository,
};

/// One handle bundling every repository over a shared pool
#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub orders: OrderRepository,
    pub deposits: DepositRepository,
    pub bans: BanRepository,
    pub catalog: CatalogRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            deposits: DepositRepository::new(pool.clone()),
            bans: BanRepository::new(pool.clone()),
            catalog: CatalogRepository::new(pool),
        }
    }
}
